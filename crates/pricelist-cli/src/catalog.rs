//! Catalog command handlers for the CLI.

use std::path::Path;

use anyhow::Context;
use pricelist_core::{quote, DiscountTable, PriceFormat, PriceRecord};

/// Read and map a spreadsheet from disk.
fn read_file(path: &Path) -> anyhow::Result<Vec<PriceRecord>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let records = pricelist_sheet::read_price_list(bytes)?;
    Ok(records)
}

/// Validate a price list without touching the database.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails header validation.
pub(crate) fn run_import_dry_run(path: &Path) -> anyhow::Result<()> {
    let records = read_file(path)?;
    let zero_priced = records.iter().filter(|r| r.price.is_zero()).count();
    println!(
        "[dry-run] {} rows would be imported ({zero_priced} with zero price)",
        records.len()
    );
    Ok(())
}

/// Replace the catalog with the rows of the spreadsheet at `path`.
///
/// # Errors
///
/// Returns an error if the file is unreadable, a header is missing, or the
/// replace transaction fails. The previous catalog is kept in every case.
pub(crate) async fn run_import(pool: &sqlx::SqlitePool, path: &Path) -> anyhow::Result<()> {
    let records = read_file(path)?;
    tracing::info!(path = %path.display(), rows = records.len(), "price list validated");

    let inserted = pricelist_db::replace_all_prices(pool, &records)
        .await
        .context("catalog replace failed; previous catalog kept")?;
    println!("File uploaded and processed successfully. {inserted} rows inserted.");
    Ok(())
}

/// Print the first catalog rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_list(pool: &sqlx::SqlitePool, json: bool) -> anyhow::Result<()> {
    let records: Vec<PriceRecord> = pricelist_db::list_prices(pool)
        .await?
        .into_iter()
        .map(pricelist_db::PriceRow::into_record)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("catalog is empty; run `import <file>` first");
        return Ok(());
    }

    println!("{:<22}{:<40}{:>14}  CAT", "SKU", "PRODUCT", "PRICE");
    for r in &records {
        println!(
            "{:<22}{:<40}{:>14}  {}",
            r.sku,
            truncate(&r.product, 38),
            r.price,
            r.category
        );
    }
    Ok(())
}

/// Search the catalog and print standard and discounted prices.
///
/// # Errors
///
/// Returns an error if the query is blank or the database query fails.
pub(crate) async fn run_search(
    pool: &sqlx::SqlitePool,
    query: &str,
    discounts: &DiscountTable,
    format: PriceFormat,
    json: bool,
) -> anyhow::Result<()> {
    if query.trim().is_empty() {
        anyhow::bail!("The query parameter is required.");
    }

    let rows = pricelist_db::search_prices(pool, query).await?;
    let lines: Vec<SearchLine> = rows
        .into_iter()
        .map(|row| {
            let quoted = quote(row.price_decimal(), row.category.as_deref(), discounts);
            SearchLine {
                sku: row.sku.unwrap_or_default(),
                product: row.product.unwrap_or_default(),
                category: quoted.category,
                standard_price: format.format(quoted.standard_price),
                discounted_price: format.format(quoted.discounted_price),
            }
        })
        .collect();

    if json {
        let value: Vec<serde_json::Value> = lines
            .iter()
            .map(|l| {
                serde_json::json!({
                    "sku": l.sku,
                    "product": l.product,
                    "category": l.category,
                    "standardPrice": l.standard_price,
                    "discountedPrice": l.discounted_price,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    if lines.is_empty() {
        println!("no catalog rows match '{query}'");
        return Ok(());
    }

    println!(
        "{:<22}{:<40}{:<5}{:>14}{:>14}",
        "SKU", "PRODUCT", "CAT", "STANDARD", "DISCOUNTED"
    );
    for l in &lines {
        println!(
            "{:<22}{:<40}{:<5}{:>14}{:>14}",
            l.sku,
            truncate(&l.product, 38),
            l.category,
            l.standard_price,
            l.discounted_price
        );
    }
    Ok(())
}

struct SearchLine {
    sku: String,
    product: String,
    category: String,
    standard_price: String,
    discounted_price: String,
}

/// Cut `s` to at most `max` characters, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}
