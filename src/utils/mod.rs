pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{extract_urls_from_text, host_matches_any, is_valid_url, resolve_link};
