mod levels;
mod relay;
mod schools;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use idcole_geocode::GeocodeClient;
use idcole_upstream::{IdenticoleClient, RelayedResponse};

use crate::middleware::request_id;

/// Shared handler state: the outbound collaborators, built once at startup
/// and never mutated. `geocoder` is `None` when no credential is
/// configured.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<IdenticoleClient>,
    pub geocoder: Option<Arc<GeocodeClient>>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: "bad_request".into(),
                message: message.into(),
                detail: None,
            },
        }
    }

    /// A collaborator call failed in transit. The caller gets a generic
    /// message plus the underlying error's description.
    pub fn relay_failure(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: "relay_failure".into(),
                message: message.into(),
                detail: Some(detail.into()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Rebuilds an axum response from a relayed upstream response, passing
/// status and body through unchanged and carrying the upstream content
/// type when it had one.
fn passthrough(upstream: RelayedResponse) -> Response {
    let mut response = (upstream.status, upstream.body).into_response();
    if let Some(content_type) = upstream
        .content_type
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok())
    {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/BuscaNivel", post(levels::find_levels))
        .route("/colegios", post(schools::search_schools))
        .route("/api", any(relay::relay_api))
        .route("/api/{*path}", any(relay::relay_api))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}
