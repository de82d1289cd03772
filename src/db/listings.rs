use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::connection::Database;
use crate::domain::listing::{Listing, ListingPatch, Projection};
use crate::domain::price::{parse_price, PriceRange};
use crate::domain::repository::ListingRepository;
use crate::errors::ServerError;

const COLUMNS: &str = "id, name, host_identity_verified, neighbourhood, country, \
                       instant_bookable, property_type, thumbnail, price, price_amount";

/// Map a row whose listing columns start at `base`.
fn listing_at(row: &Row<'_>, base: usize) -> rusqlite::Result<Listing> {
    Ok(Listing {
        id: row.get(base)?,
        name: row.get(base + 1)?,
        host_identity_verified: row.get(base + 2)?,
        neighbourhood: row.get(base + 3)?,
        country: row.get(base + 4)?,
        instant_bookable: row.get(base + 5)?,
        property_type: row.get(base + 6)?,
        thumbnail: row.get(base + 7)?,
        price: row.get(base + 8)?,
        price_amount: row.get(base + 9)?,
    })
}

fn query_listings<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    projection: Projection,
) -> Result<Vec<Listing>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(format!("Prepare failed: {e}")))?;

    let rows = stmt
        .query_map(params, |row| listing_at(row, 0))
        .map_err(|e| ServerError::DbError(format!("Query failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?.project(projection));
    }
    Ok(out)
}

/// First listing with `id`, along with its internal key.
fn first_match(conn: &Connection, id: &str) -> Result<Option<(i64, Listing)>, ServerError> {
    let sql = format!("SELECT key, {COLUMNS} FROM airbnb_list WHERE id = ?1 ORDER BY key LIMIT 1");
    conn.query_row(&sql, params![id], |row| {
        Ok((row.get(0)?, listing_at(row, 1)?))
    })
    .optional()
    .map_err(|e| ServerError::DbError(format!("Lookup of id {id:?} failed: {e}")))
}

fn to_sql_count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl ListingRepository for Database {
    fn list_all(&self, projection: Projection) -> Result<Vec<Listing>, ServerError> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {COLUMNS} FROM airbnb_list ORDER BY key");
            query_listings(conn, &sql, [], projection)
        })
    }

    fn list_page(&self, start: usize, limit: usize) -> Result<Vec<Listing>, ServerError> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {COLUMNS} FROM airbnb_list ORDER BY key LIMIT ?1 OFFSET ?2");
            query_listings(
                conn,
                &sql,
                params![to_sql_count(limit), to_sql_count(start)],
                Projection::Summary,
            )
        })
    }

    fn count(&self) -> Result<usize, ServerError> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM airbnb_list", [], |r| r.get(0))?;
            Ok(usize::try_from(n).unwrap_or(0))
        })
    }

    fn find_by_id(
        &self,
        id: &str,
        projection: Projection,
    ) -> Result<Option<Listing>, ServerError> {
        self.with_conn(|conn| {
            Ok(first_match(conn, id.trim())?.map(|(_, listing)| listing.project(projection)))
        })
    }

    fn search_by_name(&self, fragment: &str) -> Result<Vec<Listing>, ServerError> {
        // SQLite's lower() only folds ASCII, so matching happens here.
        let needle = fragment.to_lowercase();
        let named = self.with_conn(|conn| {
            let sql = format!(
                "SELECT {COLUMNS} FROM airbnb_list WHERE name IS NOT NULL ORDER BY key"
            );
            query_listings(conn, &sql, [], Projection::Summary)
        })?;

        Ok(named
            .into_iter()
            .filter(|l| {
                l.name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .collect())
    }

    fn find_by_price_range(&self, range: PriceRange) -> Result<Vec<Listing>, ServerError> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {COLUMNS} FROM airbnb_list \
                 WHERE price_amount IS NOT NULL AND price_amount BETWEEN ?1 AND ?2 \
                 ORDER BY key"
            );
            query_listings(conn, &sql, params![range.min, range.max], Projection::Summary)
        })
    }

    fn insert(&self, listing: &Listing) -> Result<Listing, ServerError> {
        let listing = listing.clone().with_derived_amount();

        self.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO airbnb_list ({COLUMNS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                ),
                params![
                    listing.id,
                    listing.name,
                    listing.host_identity_verified,
                    listing.neighbourhood,
                    listing.country,
                    listing.instant_bookable,
                    listing.property_type,
                    listing.thumbnail,
                    listing.price,
                    listing.price_amount,
                ],
            )
            .map_err(|e| ServerError::DbError(format!("Insert failed: {e}")))?;
            Ok(())
        })?;

        tracing::debug!(id = %listing.id, "listing inserted");
        Ok(listing)
    }

    fn update(&self, id: &str, patch: &ListingPatch) -> Result<Option<Listing>, ServerError> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;

            let Some((key, mut listing)) = first_match(&tx, id.trim())? else {
                return Ok(None);
            };
            patch.apply(&mut listing);

            tx.execute(
                "UPDATE airbnb_list SET id = ?1, name = ?2, host_identity_verified = ?3, \
                 neighbourhood = ?4, country = ?5, instant_bookable = ?6, property_type = ?7, \
                 thumbnail = ?8, price = ?9, price_amount = ?10 WHERE key = ?11",
                params![
                    listing.id,
                    listing.name,
                    listing.host_identity_verified,
                    listing.neighbourhood,
                    listing.country,
                    listing.instant_bookable,
                    listing.property_type,
                    listing.thumbnail,
                    listing.price,
                    listing.price_amount,
                    key,
                ],
            )
            .map_err(|e| ServerError::DbError(format!("Update failed: {e}")))?;

            tx.commit()?;
            Ok(Some(listing))
        })
    }

    fn delete(&self, id: &str) -> Result<Option<Listing>, ServerError> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;

            let Some((key, listing)) = first_match(&tx, id.trim())? else {
                return Ok(None);
            };

            tx.execute("DELETE FROM airbnb_list WHERE key = ?1", params![key])
                .map_err(|e| ServerError::DbError(format!("Delete failed: {e}")))?;

            tx.commit()?;
            Ok(Some(listing))
        })
    }
}

/// Fill in `price_amount` for rows written before prices were parsed on write.
/// Returns how many rows received an amount.
pub fn backfill_price_amounts(db: &Database) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;

        let pending: Vec<(i64, String)> = {
            let mut stmt = tx.prepare(
                "SELECT key, price FROM airbnb_list \
                 WHERE price IS NOT NULL AND price_amount IS NULL",
            )?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            rows.collect::<Result<_, _>>()?
        };

        let mut updated = 0;
        for (key, price) in pending {
            if let Some(amount) = parse_price(&price) {
                tx.execute(
                    "UPDATE airbnb_list SET price_amount = ?1 WHERE key = ?2",
                    params![amount, key],
                )?;
                updated += 1;
            }
        }

        tx.commit()?;
        Ok(updated)
    })
}
