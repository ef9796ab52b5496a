//! HTTP client for the Identicole school-registry portal.
//!
//! The portal serves a browser-facing site, not an API: it filters on
//! browser-looking headers, answers the detail search as `||`-delimited
//! text, and expects form-encoded search submissions. This client wraps
//! `reqwest` with that header set and exposes the upstream operations the
//! relay needs. Responses are returned raw (status, content type, body
//! text) so callers can pass them through unreinterpreted.

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;

use crate::error::UpstreamError;
use crate::pagination::detail_path;

pub const DEFAULT_BASE_URL: &str = "https://identicole.minedu.gob.pe";

/// User agent the portal accepts; non-browser agents get blocked.
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36";

const RELAY_ACCEPT: &str = "application/json, text/plain, */*";
const SEARCH_ACCEPT: &str = "text/html,application/json, text/plain, */*";

/// Client for the Identicole portal.
///
/// Manages the HTTP client and base origin. Use [`IdenticoleClient::new`]
/// for production or [`IdenticoleClient::with_base_url`] to point at a
/// mock server in tests.
pub struct IdenticoleClient {
    client: Client,
    base_url: String,
}

/// Status, content type, and raw body of a relayed upstream response.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

/// Form body for the detail-search endpoint, field-for-field what the
/// portal's own frontend submits.
#[derive(Debug, Clone, Serialize)]
pub struct SchoolSearchForm {
    pub lat: String,
    pub lng: String,
    pub accion: &'static str,
    pub s_departament_geo: String,
    pub s_province_geo: String,
    pub s_district_geo: String,
    pub txt_cen_edu: String,
    pub modalidad: String,
    pub s_nivel: String,
    pub vacante: &'static str,
    pub participa: &'static str,
    #[serde(rename = "dot-amount")]
    pub dot_amount: &'static str,
    pub genero: &'static str,
}

impl SchoolSearchForm {
    /// Builds a search form around resolved coordinates and the caller's
    /// criteria. The fixed filter values match the portal frontend: every
    /// vacancy and participation status (`3`), ~2km radius (`dot-amount`),
    /// no gender filter.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lat: f64,
        lng: f64,
        department: String,
        province: String,
        district: String,
        name: String,
        modality: String,
        level: String,
    ) -> Self {
        Self {
            lat: lat.to_string(),
            lng: lng.to_string(),
            accion: "ubicacion",
            s_departament_geo: department,
            s_province_geo: province,
            s_district_geo: district,
            txt_cen_edu: name,
            modalidad: modality,
            s_nivel: level,
            vacante: "3",
            participa: "3",
            dot_amount: "2",
            genero: "",
        }
    }
}

impl IdenticoleClient {
    /// Creates a client pointed at the production portal.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, UpstreamError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base origin (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`UpstreamError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(BROWSER_UA)
            .build()?;

        let trimmed = base_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| UpstreamError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: trimmed.to_owned(),
        })
    }

    /// Forwards a level lookup: `POST /BuscaNivel?modalidad=<value>` with
    /// the caller's JSON body, status and body returned unreinterpreted.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] on network failure. Non-2xx statuses
    /// are not errors; they ride back in the [`RelayedResponse`].
    pub async fn find_levels(
        &self,
        modalidad: &str,
        body: Vec<u8>,
    ) -> Result<RelayedResponse, UpstreamError> {
        let request = self
            .client
            .post(self.endpoint("/BuscaNivel"))
            .query(&[("modalidad", modalidad)])
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, RELAY_ACCEPT)
            .body(body);

        Self::relayed(self.with_origin_headers(request).send().await?).await
    }

    /// Forwards an arbitrary request to the portal unchanged: same method,
    /// same path and query, JSON body when the caller supplies one.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] on network failure. Non-2xx statuses
    /// are not errors; they ride back in the [`RelayedResponse`].
    pub async fn relay_json(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RelayedResponse, UpstreamError> {
        let mut request = self
            .client
            .request(method, self.endpoint(path_and_query))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, RELAY_ACCEPT);

        if let Some(body) = body {
            request = request.body(body);
        }

        Self::relayed(self.with_origin_headers(request).send().await?).await
    }

    /// Submits the detail-search form. Offset 0 posts to the bare detail
    /// path; positive offsets append a path segment.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] on network failure. Non-2xx statuses
    /// are not errors; they ride back in the [`RelayedResponse`].
    pub async fn search_schools(
        &self,
        form: &SchoolSearchForm,
        offset: u64,
    ) -> Result<RelayedResponse, UpstreamError> {
        let request = self
            .client
            .post(self.endpoint(&detail_path(offset)))
            .header(header::ACCEPT, SEARCH_ACCEPT)
            .form(form);

        Self::relayed(self.with_origin_headers(request).send().await?).await
    }

    fn endpoint(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// The portal checks `Referer`/`Origin` against its own origin.
    fn with_origin_headers(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(header::REFERER, format!("{}/", self.base_url))
            .header(header::ORIGIN, self.base_url.clone())
    }

    async fn relayed(response: reqwest::Response) -> Result<RelayedResponse, UpstreamError> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let body = response.text().await?;

        Ok(RelayedResponse {
            status,
            content_type,
            body,
        })
    }
}
