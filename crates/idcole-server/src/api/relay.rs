use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    response::Response,
    Extension,
};

use crate::middleware::RequestId;

use super::{passthrough, ApiError, AppState};

/// `ANY /api/*` — transparent relay to the same-shaped upstream path.
/// Bodies are forwarded for every method except GET and HEAD; an absent
/// body on a body-bearing method forwards as an empty JSON object.
pub(super) async fn relay_api(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_owned(), |pq| pq.as_str().to_owned());

    let forward_body = (method != Method::GET && method != Method::HEAD).then(|| {
        if body.is_empty() {
            b"{}".to_vec()
        } else {
            body.to_vec()
        }
    });

    tracing::info!(
        request_id = %req_id.0,
        method = %method,
        path = %path_and_query,
        "relaying to upstream"
    );

    let upstream = state
        .upstream
        .relay_json(method, &path_and_query, forward_body)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "upstream relay failed");
            ApiError::relay_failure("upstream relay failed", e.to_string())
        })?;

    Ok(passthrough(upstream))
}
