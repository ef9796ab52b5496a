//! Coordinate resolution for search requests.
//!
//! Precedence: explicit coordinates from the caller, then a geocoded
//! free-text location, then the fixed Lima fallback. Geocoding failures of
//! any kind fall through to the fallback; nothing escalates to the caller.

use std::future::Future;

use crate::client::GeocodeClient;
use crate::error::GeocodeError;
use crate::types::{GeoPoint, LIMA_CENTER};

/// Forward-geocoding seam. [`GeocodeClient`] is the production
/// implementation; tests substitute canned ones.
pub trait Geocoder {
    /// Returns the first match for a free-text location, `None` when the
    /// service has no match.
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<GeoPoint>, GeocodeError>> + Send;
}

impl Geocoder for GeocodeClient {
    async fn lookup(&self, query: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        self.search_first(query).await
    }
}

/// Resolves the final search coordinates.
///
/// Explicit coordinates win and skip the geocoder entirely. A partial pair
/// does not short-circuit: a geocode hit (or the fallback) replaces both
/// halves. Passing `None` for `geocoder` (no credential configured)
/// behaves like a lookup miss.
pub async fn resolve_point<G: Geocoder>(
    lat: Option<f64>,
    lng: Option<f64>,
    location_text: Option<&str>,
    geocoder: Option<&G>,
) -> GeoPoint {
    if let (Some(lat), Some(lng)) = (lat, lng) {
        return GeoPoint { lat, lng };
    }

    if let Some(text) = location_text.filter(|t| !t.trim().is_empty()) {
        match geocoder {
            Some(geocoder) => match geocoder.lookup(text).await {
                Ok(Some(point)) => return point,
                Ok(None) => {
                    tracing::warn!(query = text, "geocoder returned no match, using fallback");
                }
                Err(e) => {
                    tracing::warn!(query = text, error = %e, "geocoding failed, using fallback");
                }
            },
            None => {
                tracing::warn!("no geocoding credential configured, using fallback");
            }
        }
    }

    LIMA_CENTER
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CannedGeocoder {
        point: Option<GeoPoint>,
        calls: AtomicUsize,
    }

    impl CannedGeocoder {
        fn returning(point: Option<GeoPoint>) -> Self {
            Self {
                point,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Geocoder for CannedGeocoder {
        async fn lookup(&self, _query: &str) -> Result<Option<GeoPoint>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.point)
        }
    }

    struct FailingGeocoder;

    impl Geocoder for FailingGeocoder {
        async fn lookup(&self, _query: &str) -> Result<Option<GeoPoint>, GeocodeError> {
            Err(GeocodeError::UnexpectedStatus { status: 500 })
        }
    }

    const TRUJILLO: GeoPoint = GeoPoint {
        lat: -8.1091,
        lng: -79.0215,
    };

    #[tokio::test]
    async fn explicit_coordinates_skip_the_geocoder() {
        let geocoder = CannedGeocoder::returning(Some(TRUJILLO));
        let point = resolve_point(
            Some(-6.77),
            Some(-79.84),
            Some("CHICLAYO, Perú"),
            Some(&geocoder),
        )
        .await;

        assert_eq!(point, GeoPoint { lat: -6.77, lng: -79.84 });
        assert_eq!(geocoder.call_count(), 0, "geocoder must not be invoked");
    }

    #[tokio::test]
    async fn free_text_hit_wins_when_coordinates_are_missing() {
        let geocoder = CannedGeocoder::returning(Some(TRUJILLO));
        let point = resolve_point(None, None, Some("TRUJILLO, Perú"), Some(&geocoder)).await;

        assert_eq!(point, TRUJILLO);
        assert_eq!(geocoder.call_count(), 1);
    }

    #[tokio::test]
    async fn partial_coordinates_do_not_short_circuit() {
        // One explicit half plus a geocode hit: the hit replaces both.
        let geocoder = CannedGeocoder::returning(Some(TRUJILLO));
        let point = resolve_point(Some(-6.77), None, Some("TRUJILLO"), Some(&geocoder)).await;

        assert_eq!(point, TRUJILLO);
        assert_eq!(geocoder.call_count(), 1);
    }

    #[tokio::test]
    async fn partial_coordinates_without_text_fall_back_entirely() {
        let point = resolve_point::<CannedGeocoder>(Some(-6.77), None, None, None).await;
        assert_eq!(point, LIMA_CENTER);
    }

    #[tokio::test]
    async fn no_sources_yield_the_exact_fallback() {
        let point = resolve_point::<CannedGeocoder>(None, None, None, None).await;
        assert_eq!(point, LIMA_CENTER);
        assert_eq!(point.lat, -12.0464);
        assert_eq!(point.lng, -77.0428);
    }

    #[tokio::test]
    async fn geocoder_miss_falls_back() {
        let geocoder = CannedGeocoder::returning(None);
        let point = resolve_point(None, None, Some("NINGUNA PARTE"), Some(&geocoder)).await;

        assert_eq!(point, LIMA_CENTER);
        assert_eq!(geocoder.call_count(), 1);
    }

    #[tokio::test]
    async fn geocoder_error_falls_back() {
        let point = resolve_point(None, None, Some("TRUJILLO"), Some(&FailingGeocoder)).await;
        assert_eq!(point, LIMA_CENTER);
    }

    #[tokio::test]
    async fn blank_text_is_ignored() {
        let geocoder = CannedGeocoder::returning(Some(TRUJILLO));
        let point = resolve_point(None, None, Some("   "), Some(&geocoder)).await;

        assert_eq!(point, LIMA_CENTER);
        assert_eq!(geocoder.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_credential_behaves_like_a_miss() {
        let point = resolve_point::<CannedGeocoder>(None, None, Some("TRUJILLO"), None).await;
        assert_eq!(point, LIMA_CENTER);
    }
}
