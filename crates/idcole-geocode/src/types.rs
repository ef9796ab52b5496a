/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Fallback point used when no coordinate source yields a value: central
/// Lima.
pub const LIMA_CENTER: GeoPoint = GeoPoint {
    lat: -12.0464,
    lng: -77.0428,
};
