//! Mapping from `AssetError` to HTTP responses

use asset_viz_common::AssetError;
use axum::http::StatusCode;
use tracing::{error, warn};

/// Handler error: status plus plain-text body
pub type ApiError = (StatusCode, String);

/// HTTP status for an asset error
#[must_use]
pub fn status_for(err: &AssetError) -> StatusCode {
    match err {
        AssetError::UnsupportedFormat(_)
        | AssetError::InvalidName(_)
        | AssetError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        AssetError::NotFound(_) => StatusCode::NOT_FOUND,
        AssetError::ConverterDisabled => StatusCode::SERVICE_UNAVAILABLE,
        AssetError::ToolFailed(_) | AssetError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn api_error(err: AssetError) -> ApiError {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }
    (status, err.to_string())
}
