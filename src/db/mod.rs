pub mod connection;
pub mod import;
pub mod listings;

pub use listings::backfill_price_amounts;
