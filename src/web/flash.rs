//! One-shot user messages carried across a redirect in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the cookie holding pending messages.
pub const FLASH_COOKIE: &str = "flash";

/// Severity of a flash message (doubles as the CSS class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// Something failed.
    Danger,
    /// Partial success or missing input.
    Warning,
    /// Informational.
    Info,
}

impl FlashLevel {
    /// CSS class for the message box.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Danger => "flash danger",
            Self::Warning => "flash warning",
            Self::Info => "flash info",
        }
    }
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Severity.
    pub level: FlashLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Flash {
    /// Creates an error message.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }

    /// Creates a warning message.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Warning,
            message: message.into(),
        }
    }

    /// Creates an informational message.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }
}

/// Largest encoded cookie value `push` will set. Browsers drop cookies
/// past roughly 4 KiB including name and attributes.
pub const MAX_COOKIE_VALUE_BYTES: usize = 3800;

/// Appends `flashes` to whatever is already pending in `jar`.
///
/// When the encoded messages outgrow [`MAX_COOKIE_VALUE_BYTES`], messages
/// before the last one are dropped newest-first; the last message is kept
/// (shortened if it alone is too long).
#[must_use]
pub fn push(jar: CookieJar, flashes: impl IntoIterator<Item = Flash>) -> CookieJar {
    let mut pending = read(&jar);
    pending.extend(flashes);
    if pending.is_empty() {
        return jar;
    }
    match encode_within_budget(pending) {
        Some(value) => jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        None => jar,
    }
}

fn encode(pending: &[Flash]) -> Option<String> {
    match serde_json::to_string(pending) {
        Ok(json) => Some(urlencoding::encode(&json).into_owned()),
        Err(error) => {
            debug!(error = %error, "failed to encode flash messages");
            None
        }
    }
}

fn encode_within_budget(mut pending: Vec<Flash>) -> Option<String> {
    let mut dropped = 0usize;
    loop {
        let value = encode(&pending)?;
        if value.len() <= MAX_COOKIE_VALUE_BYTES {
            if dropped > 0 {
                debug!(dropped, kept = pending.len(), "flash messages trimmed to fit cookie");
            }
            return Some(value);
        }
        if pending.len() > 1 {
            pending.remove(pending.len() - 2);
            dropped += 1;
            continue;
        }
        let message = &mut pending[0].message;
        let chars = message.chars().count();
        if chars < 2 {
            return None;
        }
        let mut shortened: String = message.chars().take(chars / 2).collect();
        shortened.push('…');
        *message = shortened;
    }
}

/// Removes and returns pending messages.
#[must_use]
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Flash>) {
    let pending = read(&jar);
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, pending);
    }
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, pending)
}

fn read(jar: &CookieJar) -> Vec<Flash> {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return Vec::new();
    };
    urlencoding::decode(cookie.value())
        .ok()
        .and_then(|json| serde_json::from_str::<Vec<Flash>>(&json).ok())
        .unwrap_or_else(|| {
            debug!("discarding unreadable flash cookie");
            Vec::new()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_push_then_take() {
        let jar = push(CookieJar::new(), [Flash::danger("Ошибка: bad link")]);
        let jar = push(jar, [Flash::warning("second; with=chars")]);

        let (jar, flashes) = take(jar);
        assert_eq!(
            flashes,
            vec![
                Flash::danger("Ошибка: bad link"),
                Flash::warning("second; with=chars")
            ]
        );
        let (_, again) = take(jar);
        assert!(again.is_empty(), "flashes are shown once");
    }

    #[test]
    fn test_flash_cookie_value_is_cookie_safe() {
        let jar = push(CookieJar::new(), [Flash::info("a \"quoted\"; value, with spaces")]);
        let value = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()).unwrap_or_default();
        assert!(!value.is_empty());
        assert!(
            value.chars().all(|c| c.is_ascii_alphanumeric() || "%-_.~".contains(c)),
            "cookie value must be percent-encoded: {value}"
        );
    }

    #[test]
    fn test_flash_take_ignores_garbage_cookie() {
        let jar = CookieJar::new().add(Cookie::new(FLASH_COOKIE, "not-json"));
        let (_, flashes) = take(jar);
        assert!(flashes.is_empty());
    }

    #[test]
    fn test_flash_push_nothing_leaves_jar_untouched() {
        let jar = push(CookieJar::new(), Vec::new());
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_flash_push_keeps_cookie_under_budget_and_summary_last() {
        let long_path = format!("/{}", "Документы/".repeat(20));
        let mut flashes: Vec<Flash> = (0..12)
            .map(|i| Flash::warning(format!("Could not add {long_path}файл{i}.pdf (HTTP 404)")))
            .collect();
        flashes.push(Flash::danger("12 of 12 selected files could not be downloaded."));

        let jar = push(CookieJar::new(), flashes);
        let value = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()).unwrap_or_default();
        assert!(!value.is_empty());
        assert!(value.len() <= MAX_COOKIE_VALUE_BYTES, "cookie is {} bytes", value.len());

        let (_, kept) = take(jar);
        assert!(kept.len() < 13);
        assert_eq!(
            kept.last(),
            Some(&Flash::danger("12 of 12 selected files could not be downloaded."))
        );
        assert!(kept[0].message.contains("файл0.pdf"), "oldest messages survive");
    }

    #[test]
    fn test_flash_push_shortens_single_oversized_message() {
        let jar = push(CookieJar::new(), [Flash::danger("ж".repeat(5000))]);
        let value = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()).unwrap_or_default();
        assert!(!value.is_empty());
        assert!(value.len() <= MAX_COOKIE_VALUE_BYTES);

        let (_, kept) = take(jar);
        assert_eq!(kept.len(), 1);
        assert!(kept[0].message.starts_with('ж'));
        assert!(kept[0].message.ends_with('…'));
    }

    #[test]
    fn test_flash_level_css_class() {
        assert_eq!(FlashLevel::Danger.css_class(), "flash danger");
        assert_eq!(FlashLevel::Warning.css_class(), "flash warning");
    }
}
