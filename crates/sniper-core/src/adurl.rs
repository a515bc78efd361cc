//! Validity check for source-site ad URLs.
//!
//! The analysis service grounds its answers in web search results and will
//! occasionally invent listings or attach URLs that do not resolve to a real
//! ad. A listing without a canonical ad URL is useless to the user, so this
//! is the one integrity gate untrusted model output must pass before it
//! reaches local storage.

use std::sync::OnceLock;

use regex::Regex;

/// Path segment every canonical kleinanzeigen ad URL contains.
const AD_PATH_MARKER: &str = "/s-anzeige/";

fn ad_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Numeric ad id of the form <digits>-<digits> as its own path component.
    PATTERN.get_or_init(|| Regex::new(r"/\d+-\d+").expect("static pattern is valid"))
}

/// Returns `true` iff `url` looks like a canonical ad URL: it contains the
/// `/s-anzeige/` marker (case-insensitive) and a `/<digits>-<digits>` ad id.
#[must_use]
pub fn is_valid_ad_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    url.to_lowercase().contains(AD_PATH_MARKER) && ad_id_pattern().is_match(url)
}
