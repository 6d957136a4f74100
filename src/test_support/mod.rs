//! Shared helpers for unit tests that need a local mock HTTP server.

pub mod socket_guard;
