use crate::domain::listing::{Listing, ListingPatch, Projection};
use crate::domain::price::PriceRange;
use crate::errors::ServerError;

/// Window size used by the incremental listing view.
pub const PAGE_SIZE: usize = 10;

/// Storage-agnostic access to the listing collection.
///
/// Every read returns listings in a stable store order. Update and delete act
/// on the first listing carrying the id and return `None` when nothing
/// matched.
pub trait ListingRepository: Send + Sync {
    fn list_all(&self, projection: Projection) -> Result<Vec<Listing>, ServerError>;

    /// At most `limit` summary listings starting at `start`. Past the end is empty.
    fn list_page(&self, start: usize, limit: usize) -> Result<Vec<Listing>, ServerError>;

    fn count(&self) -> Result<usize, ServerError>;

    fn find_by_id(&self, id: &str, projection: Projection)
        -> Result<Option<Listing>, ServerError>;

    /// Case-insensitive substring match on the name.
    fn search_by_name(&self, fragment: &str) -> Result<Vec<Listing>, ServerError>;

    /// Summary listings whose parsed price lies in `range`. Listings without
    /// a parseable price never match.
    fn find_by_price_range(&self, range: PriceRange) -> Result<Vec<Listing>, ServerError>;

    fn insert(&self, listing: &Listing) -> Result<Listing, ServerError>;

    fn update(&self, id: &str, patch: &ListingPatch) -> Result<Option<Listing>, ServerError>;

    fn delete(&self, id: &str) -> Result<Option<Listing>, ServerError>;
}
