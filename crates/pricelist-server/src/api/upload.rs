use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Extension, Json,
};
use pricelist_sheet::SheetError;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

pub(super) const UPLOAD_SUCCESS: &str = "File uploaded and processed successfully.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UploadResult {
    message: &'static str,
    rows_inserted: u64,
}

/// Replace the catalog with the first file field of a multipart upload.
///
/// Headers are validated before the store is touched; the replace itself is
/// one transaction, so any failure leaves the previous catalog in place.
pub(super) async fn upload_prices(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResult>, ApiError> {
    let Ok(multipart) = multipart else {
        return Err(ApiError::bad_request(
            req_id.0,
            SheetError::EmptyUpload.to_string(),
        ));
    };

    let bytes = match first_file(multipart).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            return Err(ApiError::bad_request(
                req_id.0,
                SheetError::EmptyUpload.to_string(),
            ))
        }
        Err(e) => return Err(multipart_error(req_id.0, &e)),
    };
    tracing::info!(bytes = bytes.len(), "price list upload received");

    let records = tokio::task::spawn_blocking(move || pricelist_sheet::read_price_list(bytes))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "price list parser task failed");
            processing_error(req_id.0.clone(), &e)
        })?
        .map_err(|e| sheet_error(req_id.0.clone(), &e))?;

    let inserted = pricelist_db::replace_all_prices(&state.pool, &records)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, rows = records.len(), "catalog replace rolled back");
            processing_error(req_id.0.clone(), &e)
        })?;

    tracing::info!(rows_inserted = inserted, "catalog replaced");
    Ok(Json(UploadResult {
        message: UPLOAD_SUCCESS,
        rows_inserted: inserted,
    }))
}

/// Bytes of the first field that carries a file name. `None` when no such
/// field exists or its payload is empty.
async fn first_file(mut multipart: Multipart) -> Result<Option<Vec<u8>>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_none() {
            continue;
        }
        let bytes = field.bytes().await?;
        return Ok((!bytes.is_empty()).then(|| bytes.to_vec()));
    }
    Ok(None)
}

fn sheet_error(request_id: String, error: &SheetError) -> ApiError {
    if error.is_validation() {
        tracing::info!(error = %error, "price list rejected");
        ApiError::bad_request(request_id, error.to_string())
    } else {
        tracing::warn!(error = %error, "price list could not be read");
        processing_error(request_id, error)
    }
}

fn multipart_error(request_id: String, error: &MultipartError) -> ApiError {
    tracing::warn!(error = %error, "malformed multipart upload");
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(request_id, "payload_too_large", error.body_text())
    } else {
        processing_error(request_id, error)
    }
}

fn processing_error(request_id: String, error: &dyn std::fmt::Display) -> ApiError {
    ApiError::bad_request(request_id, format!("An error occurred: {error}"))
}
