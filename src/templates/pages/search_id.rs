use crate::domain::listing::Listing;
use crate::domain::validation::FieldError;
use crate::templates::components::{button, text_field};
use crate::templates::{desktop_layout, form_errors, listing_table, status_message};
use maud::{html, Markup};

#[derive(Debug, Default)]
pub struct SearchIdVm {
    pub id: Option<String>,
    pub errors: Vec<FieldError>,
    pub result: Option<Listing>,
    pub message: Option<String>,
}

pub fn search_id_page(vm: &SearchIdVm) -> Markup {
    desktop_layout(
        "Search by Property ID",
        html! {
            (form_errors(&vm.errors))

            form method="post" action="/searchID" class="search-form" {
                (text_field("id", "Property ID", vm.id.as_deref(), true))
                (button("Search"))
            }

            (status_message(vm.message.as_deref()))

            @if let Some(listing) = &vm.result {
                (listing_table(std::slice::from_ref(listing)))
            }
        },
    )
}
