pub mod client;
pub mod error;
pub mod resolve;
pub mod types;

pub use client::GeocodeClient;
pub use error::GeocodeError;
pub use resolve::{resolve_point, Geocoder};
pub use types::{GeoPoint, LIMA_CENTER};
