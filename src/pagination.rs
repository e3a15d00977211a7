//! Pagination parameter extraction.
//!
//! The proxy front end needs the requested page size to decide its fetch
//! strategy (single request vs. walking the pagination links). The helper is
//! total: absent parameters, a missing `per_page` entry and an unparseable
//! value all map to `None`.

use std::collections::HashMap;

/// Returns the requested `per_page` value from the query parameters, if any.
pub fn elements_per_page(params: Option<&HashMap<String, String>>) -> Option<u32> {
    params?.get("per_page")?.parse().ok()
}
