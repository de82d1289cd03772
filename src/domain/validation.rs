// src/domain/validation.rs
//
// One set of rules for both the HTML forms and the JSON API. Each validator
// returns the typed value or every field error it found.

use serde::Serialize;

use crate::domain::listing::{Listing, ListingInput, ListingPatch};
use crate::domain::price::PriceRange;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type Validated<T> = Result<T, Vec<FieldError>>;

/// Which fields an update may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchScope {
    /// The update form: name and price only.
    NameAndPrice,
    /// The JSON API: every field, including a new id.
    AllFields,
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(field: &'static str, value: &Option<String>, message: &str) -> Validated<String> {
    clean(value).ok_or_else(|| vec![FieldError::new(field, message)])
}

pub fn validate_listing_id(raw: &Option<String>) -> Validated<String> {
    required("id", raw, "Property ID is required")
}

pub fn validate_name_query(raw: &Option<String>) -> Validated<String> {
    required("name", raw, "Property name is required")
}

/// A new listing needs an id; every other field is optional free text.
pub fn validate_new_listing(input: &ListingInput) -> Validated<Listing> {
    let id = validate_listing_id(&input.id)?;

    Ok(Listing {
        id,
        name: clean(&input.name),
        host_identity_verified: clean(&input.host_identity_verified),
        neighbourhood: clean(&input.neighbourhood),
        country: clean(&input.country),
        instant_bookable: clean(&input.instant_bookable),
        property_type: clean(&input.property_type),
        thumbnail: clean(&input.thumbnail),
        price: clean(&input.price),
        price_amount: None,
    }
    .with_derived_amount())
}

/// Validates an update against `target_id` and returns the change set.
/// Blank fields are treated as "leave unchanged".
pub fn validate_patch(
    target_id: &Option<String>,
    input: &ListingInput,
    scope: PatchScope,
) -> Validated<(String, ListingPatch)> {
    let mut errors = Vec::new();

    let target = match validate_listing_id(target_id) {
        Ok(id) => Some(id),
        Err(mut e) => {
            errors.append(&mut e);
            None
        }
    };

    let patch = match scope {
        PatchScope::NameAndPrice => ListingPatch {
            name: clean(&input.name),
            price: clean(&input.price),
            ..ListingPatch::default()
        },
        PatchScope::AllFields => ListingPatch {
            id: clean(&input.id),
            name: clean(&input.name),
            host_identity_verified: clean(&input.host_identity_verified),
            neighbourhood: clean(&input.neighbourhood),
            country: clean(&input.country),
            instant_bookable: clean(&input.instant_bookable),
            property_type: clean(&input.property_type),
            thumbnail: clean(&input.thumbnail),
            price: clean(&input.price),
        },
    };

    if patch.is_empty() {
        errors.push(FieldError::new("fields", "Nothing to update"));
    }

    match target {
        Some(id) if errors.is_empty() => Ok((id, patch)),
        _ => Err(errors),
    }
}

fn number(field: &'static str, label: &str, raw: &Option<String>) -> Validated<f64> {
    let value = required(field, raw, &format!("{label} price is required"))?;
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| vec![FieldError::new(field, format!("{label} price must be a number"))])
}

pub fn validate_price_range(min: &Option<String>, max: &Option<String>) -> Validated<PriceRange> {
    let min = number("minPrice", "Minimum", min);
    let max = number("maxPrice", "Maximum", max);

    match (min, max) {
        (Ok(min), Ok(max)) if max < min => Err(vec![FieldError::new(
            "maxPrice",
            "Maximum price must be >= minimum price",
        )]),
        (Ok(min), Ok(max)) => Ok(PriceRange { min, max }),
        (min, max) => Err(min
            .err()
            .into_iter()
            .chain(max.err())
            .flatten()
            .collect()),
    }
}
