// templates/pages/listing_forms.rs
//
// Add, update and delete forms. Each re-renders with its submitted values,
// validation errors, or the outcome of the write.

use crate::domain::listing::ListingInput;
use crate::domain::validation::FieldError;
use crate::templates::components::{button, text_field};
use crate::templates::{desktop_layout, form_errors, status_message};
use maud::{html, Markup};

#[derive(Debug, Default)]
pub struct ListingFormVm {
    pub values: ListingInput,
    pub errors: Vec<FieldError>,
    pub message: Option<String>,
}

impl ListingFormVm {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

fn form_shell(title: &str, action: &str, submit: &str, vm: &ListingFormVm, fields: Markup) -> Markup {
    desktop_layout(
        title,
        html! {
            (form_errors(&vm.errors))
            (status_message(vm.message.as_deref()))

            form method="post" action=(action) class="listing-form" {
                (fields)
                (button(submit))
            }
        },
    )
}

pub fn add_listing_page(vm: &ListingFormVm) -> Markup {
    let v = &vm.values;
    form_shell(
        "Add New Airbnb Property",
        "/addAirbnb",
        "Add property",
        vm,
        html! {
            (text_field("id", "ID", v.id.as_deref(), true))
            (text_field("NAME", "Name", v.name.as_deref(), false))
            (text_field("host_identity_verified", "Host identity verified", v.host_identity_verified.as_deref(), false))
            (text_field("neighbourhood", "Neighbourhood", v.neighbourhood.as_deref(), false))
            (text_field("country", "Country", v.country.as_deref(), false))
            (text_field("instant_bookable", "Instant bookable", v.instant_bookable.as_deref(), false))
            (text_field("property_type", "Property type", v.property_type.as_deref(), false))
            (text_field("price", "Price", v.price.as_deref(), false))
            (text_field("thumbnail", "Thumbnail URL", v.thumbnail.as_deref(), false))
        },
    )
}

pub fn update_listing_page(vm: &ListingFormVm) -> Markup {
    let v = &vm.values;
    form_shell(
        "Update Airbnb Property",
        "/updateAirbnb",
        "Update property",
        vm,
        html! {
            (text_field("id", "ID", v.id.as_deref(), true))
            (text_field("NAME", "New name", v.name.as_deref(), false))
            (text_field("price", "New price", v.price.as_deref(), false))
        },
    )
}

pub fn delete_listing_page(vm: &ListingFormVm) -> Markup {
    form_shell(
        "Delete Airbnb Property",
        "/deleteAirbnb",
        "Delete property",
        vm,
        html! {
            (text_field("id", "ID", vm.values.id.as_deref(), true))
        },
    )
}
