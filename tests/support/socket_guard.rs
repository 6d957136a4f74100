//! Skips wiremock-backed tests where localhost sockets cannot be bound.
//!
//! Set `OPENALEX_TOOLS_REQUIRE_SOCKET_TESTS=1` to turn a skip into a failure.

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

/// True when the environment demands socket-bound tests actually run.
#[must_use]
pub fn socket_tests_required() -> bool {
    std::env::var("OPENALEX_TOOLS_REQUIRE_SOCKET_TESTS")
        .ok()
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

#[track_caller]
#[must_use]
pub fn should_skip_socket_bound_test() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return false;
    }

    let location = Location::caller();
    let message = format!(
        "[socket-bound-test] cannot bind localhost socket at {}:{}; wiremock-based test cannot run here",
        location.file(),
        location.line()
    );
    assert!(
        !socket_tests_required(),
        "{message}. Unset OPENALEX_TOOLS_REQUIRE_SOCKET_TESTS to allow skipping."
    );

    eprintln!("{message}. Skipping test.");
    true
}

/// Starts a mock server, or returns `None` when sockets are unavailable.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        None
    } else {
        Some(MockServer::start().await)
    }
}
