use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn not_found_page(message: &str) -> Markup {
    desktop_layout(
        "Error",
        html! {
            p { (message) }
            p { a href="/" { "← Back to home" } }
        },
    )
}

pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        html! {
            p { (message) }
            p { a href="/" { "← Back to home" } }
        },
    )
}
