use crate::domain::listing::Listing;
use crate::templates::{desktop_layout, listing_table};
use maud::{html, Markup};

/// First window of listings; the script pulls the rest from `/viewData/more`.
pub fn view_data_page(listings: &[Listing], total_count: usize) -> Markup {
    desktop_layout(
        "All Airbnb Properties",
        html! {
            p { "Showing " span id="shown-count" { (listings.len()) } " of " strong { (total_count) } " properties." }

            (listing_table(listings))

            @if listings.len() < total_count {
                button
                    type="button"
                    id="load-more"
                    class="btn"
                    data-start=(listings.len())
                    data-total=(total_count)
                { "Load more" }
            }

            script src="/js/view_data.js" defer {}
        },
    )
}
