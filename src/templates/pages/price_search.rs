use crate::domain::listing::Listing;
use crate::domain::validation::FieldError;
use crate::templates::components::{button, text_field};
use crate::templates::{desktop_layout, form_errors, listing_table};
use maud::{html, Markup};

#[derive(Debug, Default)]
pub struct PriceSearchVm {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub errors: Vec<FieldError>,
    /// `None` until a valid search ran.
    pub results: Option<Vec<Listing>>,
}

pub fn price_search_page(vm: &PriceSearchVm) -> Markup {
    desktop_layout(
        "Search by Price Range",
        html! {
            (form_errors(&vm.errors))

            form method="post" action="/viewData/price" class="search-form" {
                (text_field("minPrice", "Minimum price", vm.min_price.as_deref(), true))
                (text_field("maxPrice", "Maximum price", vm.max_price.as_deref(), true))
                (button("Search"))
            }

            @if let Some(results) = &vm.results {
                @if results.is_empty() {
                    p class="status-message" { "No properties found in that price range." }
                } @else {
                    p { "Found " strong { (results.len()) } " properties." }
                    (listing_table(results))
                }
            }
        },
    )
}
