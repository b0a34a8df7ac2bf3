use axum::{
    extract::{Query, State},
    Extension, Json,
};
use pricelist_core::quote;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, AppState};

pub(super) const MISSING_QUERY: &str = "The query parameter is required.";

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchItem {
    identifier: String,
    product_family_group: String,
    product: String,
    item: String,
    sku: String,
    #[serde(rename = "description1")]
    description_1: String,
    #[serde(rename = "description2")]
    description_2: String,
    category: String,
    standard_price: String,
    discounted_price: String,
}

pub(super) async fn search_prices(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchItem>>, ApiError> {
    let Some(query) = params.query.filter(|q| !q.trim().is_empty()) else {
        return Err(ApiError::bad_request(req_id.0, MISSING_QUERY));
    };

    let rows = pricelist_db::search_prices(&state.pool, &query)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    tracing::debug!(query = %query, matches = rows.len(), "catalog search");

    let data = rows
        .into_iter()
        .map(|row| {
            let price = row.price_decimal();
            let quoted = quote(price, row.category.as_deref(), &state.discounts);
            SearchItem {
                identifier: row.identifier.unwrap_or_default(),
                product_family_group: row.product_family_group.unwrap_or_default(),
                product: row.product.unwrap_or_default(),
                item: row.item.unwrap_or_default(),
                sku: row.sku.unwrap_or_default(),
                description_1: row.description_1.unwrap_or_default(),
                description_2: row.description_2.unwrap_or_default(),
                standard_price: state.format.format(quoted.standard_price),
                discounted_price: state.format.format(quoted.discounted_price),
                category: quoted.category,
            }
        })
        .collect();

    Ok(Json(data))
}
