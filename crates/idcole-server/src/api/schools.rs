use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use idcole_geocode::resolve_point;
use idcole_upstream::{extract_schools, pagination::search_offset, School, SchoolSearchForm};

use crate::middleware::RequestId;

use super::{passthrough, ApiError, AppState};

/// Search criteria accepted on `POST /colegios`. Everything is optional;
/// pagination defaults to the portal's 12-records-per-page first page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchCriteria {
    #[serde(default)]
    coddpto: Option<String>,
    #[serde(default)]
    codprov: Option<String>,
    #[serde(default)]
    coddist: Option<String>,
    #[serde(default)]
    modalidad: Option<String>,
    #[serde(default)]
    nivel: Option<String>,
    #[serde(default)]
    page: u64,
    #[serde(default = "default_page_size")]
    page_size: u64,
    #[serde(default)]
    texto: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default)]
    ubicacion_texto: Option<String>,
}

fn default_page_size() -> u64 {
    12
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchResponse {
    total: u64,
    page: u64,
    /// Count of records actually returned; the last page may carry fewer
    /// than requested.
    page_size: usize,
    resultados: Vec<School>,
}

/// `POST /colegios` — resolves coordinates, forwards the search to the
/// portal, and reshapes its `||`-delimited response into JSON. Upstream
/// failures pass through unchanged; a garbled body degrades to an empty
/// result rather than an error.
pub(super) async fn search_schools(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(criteria): Json<SearchCriteria>,
) -> Result<Response, ApiError> {
    let point = resolve_point(
        criteria.lat,
        criteria.lng,
        criteria.ubicacion_texto.as_deref(),
        state.geocoder.as_deref(),
    )
    .await;

    let form = SchoolSearchForm::new(
        point.lat,
        point.lng,
        criteria.coddpto.unwrap_or_default(),
        criteria.codprov.unwrap_or_default(),
        criteria.coddist.unwrap_or_default(),
        criteria.texto.unwrap_or_default(),
        criteria.modalidad.unwrap_or_default(),
        criteria.nivel.unwrap_or_default(),
    );

    let offset = search_offset(criteria.page, criteria.page_size);
    tracing::info!(request_id = %req_id.0, offset, "relaying school search");

    let upstream = state
        .upstream
        .search_schools(&form, offset)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "school search relay failed");
            ApiError::relay_failure("school search relay failed", e.to_string())
        })?;

    if !upstream.status.is_success() {
        tracing::error!(
            request_id = %req_id.0,
            status = upstream.status.as_u16(),
            body = %upstream.body.chars().take(300).collect::<String>(),
            "upstream school search failed"
        );
        return Ok(passthrough(upstream));
    }

    let results = extract_schools(&upstream.body);
    let response = SearchResponse {
        total: results.total,
        page: criteria.page,
        page_size: results.schools.len(),
        resultados: results.schools,
    };
    Ok(Json(response).into_response())
}
