//! Offset pagination for the detail-search endpoint.
//!
//! The portal pages by zero-based record offset appended as a path
//! segment: the first page is the bare path, later pages are `/12`, `/24`
//! and so on.

/// Path of the detail-search endpoint, first page.
pub const SEARCH_DETAIL_PATH: &str = "/colegio/busqueda_colegios_detalle";

/// Maps a zero-indexed page and page size to the upstream record offset.
#[must_use]
pub fn search_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_mul(page_size)
}

/// Builds the request path for an offset: bare for offset 0, suffixed as a
/// path segment otherwise.
#[must_use]
pub fn detail_path(offset: u64) -> String {
    if offset == 0 {
        SEARCH_DETAIL_PATH.to_owned()
    } else {
        format!("{SEARCH_DETAIL_PATH}/{offset}")
    }
}
