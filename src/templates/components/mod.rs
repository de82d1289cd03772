use maud::{html, Markup};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::listing::{check_name, Listing};
use crate::domain::validation::FieldError;

pub fn button(label: &str) -> Markup {
    html! {
        button type="submit" class="btn" { (label) }
    }
}

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Validation messages shown above a form.
pub fn form_errors(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="form-errors" {
                @for e in errors {
                    li { (e.message) }
                }
            }
        }
    }
}

/// Outcome line for a search or a write.
pub fn status_message(message: Option<&str>) -> Markup {
    html! {
        @if let Some(msg) = message {
            p class="status-message" { (msg) }
        }
    }
}

/// A labelled text input that keeps its submitted value.
pub fn text_field(name: &str, label: &str, value: Option<&str>, required: bool) -> Markup {
    html! {
        div class="field" {
            label for=(name) { (label) }
            input type="text" id=(name) name=(name) value=[value] required[required];
        }
    }
}

/// Bytes left as-is in a path segment. Matches `encodeURIComponent`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode an id for use as a single path segment.
/// `+` becomes `%2B` and a space becomes `%20`.
pub fn path_segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

/// One table row per listing. Blank names and prices show `N/A`.
pub fn listing_table(listings: &[Listing]) -> Markup {
    html! {
        table class="listings" {
            thead {
                tr {
                    th { "" }
                    th { "ID" }
                    th { "Name" }
                    th { "Neighbourhood" }
                    th { "Country" }
                    th { "Instant Bookable" }
                    th { "Property Type" }
                    th { "Price" }
                }
            }
            tbody id="listing-rows" {
                @for listing in listings {
                    (listing_row(listing))
                }
            }
        }
    }
}

pub fn listing_row(listing: &Listing) -> Markup {
    html! {
        tr {
            td {
                @if let Some(src) = &listing.thumbnail {
                    img class="thumb" src=(src) alt=(check_name(listing.name.as_deref())) loading="lazy";
                }
            }
            td { a href=(format!("/searchID/{}", path_segment(&listing.id))) { (listing.id) } }
            td { (listing.display_name()) }
            td { (listing.neighbourhood.as_deref().unwrap_or("")) }
            td { (listing.country.as_deref().unwrap_or("")) }
            td { (listing.instant_bookable.as_deref().unwrap_or("")) }
            td { (listing.property_type.as_deref().unwrap_or("")) }
            td { (listing.display_price()) }
        }
    }
}
