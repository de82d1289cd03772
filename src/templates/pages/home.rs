// templates/pages/home.rs

use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Home Page",
        html! {
            (card("Browse", html! {
                ul {
                    li { a href="/viewData" { "All properties" } }
                    li { a href="/viewData/price" { "Search by price range" } }
                    li { a href="/searchName" { "Search by property name" } }
                    li { a href="/searchID" { "Search by property ID" } }
                }
            }))

            (card("Manage", html! {
                ul {
                    li { a href="/addAirbnb" { "Add a property" } }
                    li { a href="/updateAirbnb" { "Update a property" } }
                    li { a href="/deleteAirbnb" { "Delete a property" } }
                }
            }))
        },
    )
}
