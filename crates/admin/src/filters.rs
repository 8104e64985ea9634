//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// WhatsApp share endpoint; the message goes in the `text` parameter.
const WHATSAPP_SHARE_URL: &str = "https://wa.me/?text=";

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Turns a message into a WhatsApp share link.
///
/// Usage in templates: `{{ share_text|whatsapp_link }}`
#[askama::filter_fn]
pub fn whatsapp_link(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(whatsapp_url(&value.to_string()))
}

/// Build a `wa.me` link that opens a chat prefilled with `message`.
#[must_use]
pub fn whatsapp_url(message: &str) -> String {
    format!("{WHATSAPP_SHARE_URL}{}", urlencoding::encode(message))
}
