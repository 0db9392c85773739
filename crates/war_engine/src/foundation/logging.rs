//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Verbosity is controlled through `RUST_LOG`, e.g. `RUST_LOG=war_engine=debug`.
pub fn init() {
    env_logger::init();
}

/// Initialize logging for tests; safe to call more than once
pub fn try_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}
