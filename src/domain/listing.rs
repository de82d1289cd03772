use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::price::parse_price;

/// Placeholder shown for blank names and prices.
pub const MISSING_VALUE: &str = "N/A";

/// One property record. `id` is the external identifier and is always text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    pub id: String,
    #[serde(rename = "NAME", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_identity_verified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_bookable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Numeric value of `price`, derived whenever the price is written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_amount: Option<f64>,
}

impl Listing {
    /// Recompute `price_amount` from the price text.
    pub fn with_derived_amount(mut self) -> Self {
        self.price_amount = self.price.as_deref().and_then(parse_price);
        self
    }

    /// Name for display: blank names become `N/A`.
    pub fn display_name(&self) -> &str {
        check_name(self.name.as_deref())
    }

    /// Price for display: trimmed, or `N/A` when blank.
    pub fn display_price(&self) -> String {
        display_price(self.price.as_deref())
    }

    /// Drop the fields outside `projection`.
    pub fn project(mut self, projection: Projection) -> Self {
        if projection == Projection::Summary {
            self.host_identity_verified = None;
        }
        self
    }
}

/// Which fields a read returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Full,
    /// id, NAME, neighbourhood, country, instant_bookable, property_type, price, thumbnail
    Summary,
}

pub fn check_name(name: Option<&str>) -> &str {
    match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => MISSING_VALUE,
    }
}

pub fn display_price(price: Option<&str>) -> String {
    match price.map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => MISSING_VALUE.to_string(),
    }
}

/// Partial change set. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub host_identity_verified: Option<String>,
    pub neighbourhood: Option<String>,
    pub country: Option<String>,
    pub instant_bookable: Option<String>,
    pub property_type: Option<String>,
    pub thumbnail: Option<String>,
    pub price: Option<String>,
}

impl ListingPatch {
    pub fn is_empty(&self) -> bool {
        *self == ListingPatch::default()
    }

    pub fn apply(&self, listing: &mut Listing) {
        fn set(slot: &mut Option<String>, value: &Option<String>) {
            if let Some(v) = value {
                *slot = Some(v.clone());
            }
        }

        if let Some(id) = &self.id {
            listing.id = id.clone();
        }
        set(&mut listing.name, &self.name);
        set(&mut listing.host_identity_verified, &self.host_identity_verified);
        set(&mut listing.neighbourhood, &self.neighbourhood);
        set(&mut listing.country, &self.country);
        set(&mut listing.instant_bookable, &self.instant_bookable);
        set(&mut listing.property_type, &self.property_type);
        set(&mut listing.thumbnail, &self.thumbnail);
        if self.price.is_some() {
            set(&mut listing.price, &self.price);
            listing.price_amount = listing.price.as_deref().and_then(parse_price);
        }
    }
}

/// Raw, unvalidated listing fields as they arrive from a form, a JSON body or
/// a legacy export. Field names follow the stored document keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingInput {
    #[serde(deserialize_with = "text_or_number")]
    pub id: Option<String>,
    #[serde(rename = "NAME", alias = "name", deserialize_with = "text_or_number")]
    pub name: Option<String>,
    #[serde(alias = "hostIdentityVerified", deserialize_with = "text_or_number")]
    pub host_identity_verified: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub neighbourhood: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub country: Option<String>,
    #[serde(alias = "instantBookable", deserialize_with = "text_or_number")]
    pub instant_bookable: Option<String>,
    #[serde(alias = "propertyType", deserialize_with = "text_or_number")]
    pub property_type: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub price: Option<String>,
}

impl ListingInput {
    /// Build from decoded `application/x-www-form-urlencoded` pairs.
    pub fn from_form<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut input = ListingInput::default();
        for (key, value) in pairs {
            let slot = match key {
                "id" => &mut input.id,
                "NAME" | "name" => &mut input.name,
                "host_identity_verified" | "hostIdentityVerified" => {
                    &mut input.host_identity_verified
                }
                "neighbourhood" => &mut input.neighbourhood,
                "country" => &mut input.country,
                "instant_bookable" | "instantBookable" => &mut input.instant_bookable,
                "property_type" | "propertyType" => &mut input.property_type,
                "thumbnail" => &mut input.thumbnail,
                "price" => &mut input.price,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        input
    }
}

/// Accepts a JSON string, number or bool and keeps its text form.
/// Older documents stored ids and prices as numbers.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected text or number, found {other}"
            )))
        }
    })
}
