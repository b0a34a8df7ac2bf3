//! Database operations for the `Prices` catalog table.

use pricelist_core::PriceRecord;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::DbError;

/// Maximum rows returned by [`list_prices`].
pub const LIST_LIMIT: i64 = 100;

const PROGRESS_EVERY: usize = 1000;

const SELECT_COLUMNS: &str = "SELECT Id AS id, Identifier AS identifier, \
            ProductFamilyGroup AS product_family_group, Product AS product, \
            Item AS item, SKU AS sku, Description1 AS description_1, \
            Description2 AS description_2, Price AS price, Category AS category \
     FROM Prices";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `Prices` table.
///
/// Text columns are nullable in the schema; rows written by
/// [`replace_all_prices`] always carry strings, possibly empty.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PriceRow {
    pub id: i64,
    pub identifier: Option<String>,
    pub product_family_group: Option<String>,
    pub product: Option<String>,
    pub item: Option<String>,
    pub sku: Option<String>,
    pub description_1: Option<String>,
    pub description_2: Option<String>,
    /// Stored as `REAL`; see [`PriceRow::price_decimal`].
    pub price: Option<f64>,
    pub category: Option<String>,
}

impl PriceRow {
    /// The stored price as a decimal; `NULL` reads as zero.
    #[must_use]
    pub fn price_decimal(&self) -> Decimal {
        self.price
            .and_then(Decimal::from_f64)
            .unwrap_or(Decimal::ZERO)
    }

    #[must_use]
    pub fn into_record(self) -> PriceRecord {
        let price = self.price_decimal();
        PriceRecord {
            identifier: self.identifier.unwrap_or_default(),
            product_family_group: self.product_family_group.unwrap_or_default(),
            product: self.product.unwrap_or_default(),
            item: self.item.unwrap_or_default(),
            sku: self.sku.unwrap_or_default(),
            description_1: self.description_1.unwrap_or_default(),
            description_2: self.description_2.unwrap_or_default(),
            price,
            category: self.category.unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Replace the whole catalog with `records`.
///
/// The delete and every insert run inside one transaction: if any statement
/// fails the transaction is dropped without commit and the previous catalog
/// stays intact. Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement or the commit fails. A negative
/// price violates the table's `CHECK` constraint and aborts the whole load.
pub async fn replace_all_prices(
    pool: &SqlitePool,
    records: &[PriceRecord],
) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;

    let cleared = sqlx::query("DELETE FROM Prices")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tracing::debug!(cleared, "cleared existing catalog rows");

    let mut inserted = 0u64;
    for (idx, record) in records.iter().enumerate() {
        sqlx::query(
            "INSERT INTO Prices \
                 (Identifier, ProductFamilyGroup, Product, Item, SKU, \
                  Description1, Description2, Price, Category) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&record.identifier)
        .bind(&record.product_family_group)
        .bind(&record.product)
        .bind(&record.item)
        .bind(&record.sku)
        .bind(&record.description_1)
        .bind(&record.description_2)
        .bind(record.price.to_f64())
        .bind(&record.category)
        .execute(&mut *tx)
        .await?;

        inserted += 1;
        if (idx + 1) % PROGRESS_EVERY == 0 {
            tracing::info!(inserted, total = records.len(), "catalog insert progress");
        }
    }

    tx.commit().await?;
    Ok(inserted)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Return up to [`LIST_LIMIT`] rows in storage order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_prices(pool: &SqlitePool) -> Result<Vec<PriceRow>, DbError> {
    let sql = format!("{SELECT_COLUMNS} ORDER BY Id LIMIT ?1");
    let rows = sqlx::query_as::<_, PriceRow>(&sql)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Rows whose SKU, Product, Description1 or Description2 contains `query`.
///
/// Matching uses SQLite `LIKE`, which is case-insensitive for ASCII. `%`, `_`
/// and `\` in `query` match literally. The caller rejects blank queries.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_prices(pool: &SqlitePool, query: &str) -> Result<Vec<PriceRow>, DbError> {
    let pattern = format!("%{}%", escape_like(query));

    let sql = format!(
        "{SELECT_COLUMNS} \
         WHERE SKU LIKE ?1 ESCAPE '\\' \
            OR Product LIKE ?1 ESCAPE '\\' \
            OR Description1 LIKE ?1 ESCAPE '\\' \
            OR Description2 LIKE ?1 ESCAPE '\\' \
         ORDER BY Id"
    );
    let rows = sqlx::query_as::<_, PriceRow>(&sql)
        .bind(pattern)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Total number of catalog rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_prices(pool: &SqlitePool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Prices")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
