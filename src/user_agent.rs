//! Shared User-Agent string for upstream API and file-content requests.

/// Project URL carried in the User-Agent.
const PROJECT_UA_URL: &str = "https://github.com/fierce/sharelink";

/// Default User-Agent for all upstream requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("sharelink/{version} (+{PROJECT_UA_URL})")
}
