pub mod client;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod types;

pub use client::{IdenticoleClient, RelayedResponse, SchoolSearchForm};
pub use error::UpstreamError;
pub use extract::extract_schools;
pub use types::{RawSchool, School, SearchResults};
