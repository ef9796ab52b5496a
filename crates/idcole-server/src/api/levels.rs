use axum::{
    body::Bytes,
    extract::{Query, State},
    response::Response,
    Extension,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{passthrough, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct LevelParams {
    modalidad: Option<String>,
}

/// `POST /BuscaNivel?modalidad=<value>` — forwards the level lookup to the
/// portal, status and body unchanged. The parameter is required.
pub(super) async fn find_levels(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<LevelParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let Some(modalidad) = params.modalidad.filter(|m| !m.is_empty()) else {
        return Err(ApiError::bad_request("missing query parameter: modalidad"));
    };

    let body = if body.is_empty() {
        b"{}".to_vec()
    } else {
        body.to_vec()
    };

    tracing::info!(request_id = %req_id.0, modalidad = %modalidad, "relaying level lookup");

    let upstream = state
        .upstream
        .find_levels(&modalidad, body)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "level lookup relay failed");
            ApiError::relay_failure("level lookup relay failed", e.to_string())
        })?;

    Ok(passthrough(upstream))
}
