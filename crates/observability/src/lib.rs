//! Tracing/logging setup shared by the inventory client and its tests.

/// Initialize process-wide observability (tracing/logging).
///
/// Entry point for native hosts embedding `dealership-client`: call once at
/// startup to get JSON logs filtered by `RUST_LOG` (default `info`). The
/// browser build does not use it.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Install a subscriber that writes through the test harness's capture.
pub fn init_for_tests() {
    tracing::init_for_tests();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
