//! "Open in" deep links.
//!
//! External tools import a registry item from the URL of its published
//! descriptor. Given an item name, [`open_in_url`] builds that URL and passes
//! it as the `url` query parameter of the configured endpoint. The name is not
//! checked against any manifest.

use crate::publish::DESCRIPTOR_FILENAME;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

/// Public URL of an item's `registry-item.json`.
pub fn descriptor_url(registry_url: &str, name: &str) -> String {
    format!(
        "{}/{}/{}",
        registry_url.trim_end_matches('/'),
        name,
        DESCRIPTOR_FILENAME
    )
}

/// Deep link that opens `name` in the tool behind `endpoint`.
pub fn open_in_url(endpoint: &str, registry_url: &str, name: &str) -> String {
    let target = descriptor_url(registry_url, name);
    format!(
        "{}?url={}",
        endpoint,
        utf8_percent_encode(&target, NON_ALPHANUMERIC)
    )
}
