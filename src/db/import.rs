// src/db/import.rs
use std::io::Read;

use crate::db::connection::Database;
use crate::db::listings::backfill_price_amounts;
use crate::domain::listing::ListingInput;
use crate::domain::repository::ListingRepository;
use crate::domain::validation::validate_new_listing;
use crate::errors::ServerError;

#[derive(Debug, Default, PartialEq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
    pub priced: usize,
}

/// Load a JSON array of legacy listing documents (a collection export).
///
/// Documents without an id are skipped. Legacy price strings are parsed into
/// amounts on the way in; rows already in the store get backfilled too.
pub fn import_legacy_json<R: Read>(db: &Database, reader: R) -> Result<ImportSummary, ServerError> {
    let docs: Vec<ListingInput> = serde_json::from_reader(reader)
        .map_err(|e| ServerError::BadRequest(format!("Invalid listing export: {e}")))?;

    let mut summary = ImportSummary::default();

    for (index, doc) in docs.iter().enumerate() {
        match validate_new_listing(doc) {
            Ok(listing) => {
                db.insert(&listing)?;
                summary.inserted += 1;
            }
            Err(errors) => {
                tracing::warn!(index, ?errors, "skipping legacy document");
                summary.skipped += 1;
            }
        }
    }

    summary.priced = backfill_price_amounts(db)?;

    tracing::info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        backfilled = summary.priced,
        "legacy import finished"
    );
    Ok(summary)
}
