use crate::domain::listing::Listing;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn listing_detail_page(listing: &Listing) -> Markup {
    let field = |value: &Option<String>| value.as_deref().unwrap_or("").to_string();

    desktop_layout(
        "Property Details",
        html! {
            article class="card listing-detail" {
                @if let Some(src) = &listing.thumbnail {
                    img class="detail-thumb" src=(src) alt=(listing.display_name());
                }
                h2 { (listing.display_name()) }
                dl {
                    dt { "ID" }                     dd { (listing.id) }
                    dt { "Host identity verified" } dd { (field(&listing.host_identity_verified)) }
                    dt { "Neighbourhood" }          dd { (field(&listing.neighbourhood)) }
                    dt { "Country" }                dd { (field(&listing.country)) }
                    dt { "Instant bookable" }       dd { (field(&listing.instant_bookable)) }
                    dt { "Property type" }          dd { (field(&listing.property_type)) }
                    dt { "Price" }                  dd { (listing.display_price()) }
                }
            }
            p { a href="/searchID" { "← Search another ID" } }
        },
    )
}
