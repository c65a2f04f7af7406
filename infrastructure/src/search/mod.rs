//! Search source adapters.

mod google_cse;

pub use google_cse::{
    DEFAULT_CSE_URL, DEFAULT_EXCLUDED_SITES, DEFAULT_TIMEOUT_SECS, GoogleCseClient,
    classify_status, decorate_query, normalize_items,
};
