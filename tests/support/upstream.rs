//! Mock upstream shared by the integration test binaries.
//!
//! Tests that need loopback sockets start their upstream through
//! [`mock_upstream`] and return early on `None`. Sandboxes without loopback
//! networking skip those tests; setting `SHARELINK_REQUIRE_SOCKET_TESTS=1`
//! turns the skip into a failure.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Environment switch that makes missing loopback sockets a test failure.
pub const REQUIRE_SOCKETS_ENV: &str = "SHARELINK_REQUIRE_SOCKET_TESTS";

fn loopback_available() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn sockets_required() -> bool {
    std::env::var(REQUIRE_SOCKETS_ENV)
        .is_ok_and(|value| value == "1" || value.eq_ignore_ascii_case("true"))
}

/// Starts a mock upstream, or returns `None` when loopback sockets are
/// unavailable.
///
/// # Panics
///
/// When sockets are unavailable and [`REQUIRE_SOCKETS_ENV`] is set.
pub async fn mock_upstream() -> Option<MockServer> {
    if loopback_available() {
        return Some(MockServer::start().await);
    }
    assert!(
        !sockets_required(),
        "loopback sockets are unavailable but {REQUIRE_SOCKETS_ENV} is set"
    );
    eprintln!("skipping: loopback sockets unavailable (set {REQUIRE_SOCKETS_ENV}=1 to fail instead)");
    None
}

/// Mounts a resolvable file: a download link for `resource_path` that points
/// at `/content{resource_path}`, served as `content_type`.
pub async fn mount_file(upstream: &MockServer, resource_path: &str, content_type: &str, body: &[u8]) {
    let href = format!("{}/content{resource_path}", upstream.uri());
    Mock::given(method("GET"))
        .and(path("/resources/download"))
        .and(query_param("path", resource_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "href": href })))
        .mount(upstream)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/content{resource_path}")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", content_type)
                .set_body_bytes(body.to_vec()),
        )
        .mount(upstream)
        .await;
}
