use crate::domain::listing::Listing;
use crate::domain::validation::FieldError;
use crate::templates::components::{button, text_field};
use crate::templates::{desktop_layout, form_errors, listing_table};
use maud::{html, Markup};

#[derive(Debug, Default)]
pub struct SearchNameVm {
    pub query: Option<String>,
    pub errors: Vec<FieldError>,
    pub results: Option<Vec<Listing>>,
}

pub fn search_name_page(vm: &SearchNameVm) -> Markup {
    desktop_layout(
        "Search by Property Name",
        html! {
            (form_errors(&vm.errors))

            form method="post" action="/searchName" class="search-form" {
                (text_field("name", "Property name", vm.query.as_deref(), true))
                (button("Search"))
            }

            @if let Some(results) = &vm.results {
                @if results.is_empty() {
                    p class="status-message" {
                        "No properties match \"" (vm.query.as_deref().unwrap_or("")) "\"."
                    }
                } @else {
                    (listing_table(results))
                }
            }
        },
    )
}
