use axum::{extract::State, Extension, Json};
use pricelist_core::PriceRecord;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, AppState};

pub(super) const INIT_MESSAGE: &str = "Database initialized.";

pub(super) async fn init_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<&'static str>, ApiError> {
    pricelist_db::ensure_schema(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!("catalog schema ensured");
    Ok(Json(INIT_MESSAGE))
}

/// First rows of the catalog in storage order, prices undiscounted.
pub(super) async fn list_prices(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<PriceRecord>>, ApiError> {
    let rows = pricelist_db::list_prices(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(
        rows.into_iter()
            .map(pricelist_db::PriceRow::into_record)
            .collect(),
    ))
}
