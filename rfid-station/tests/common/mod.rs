// Shared helpers for the integration tests.
#![allow(dead_code)]

pub mod fixtures;

/// Route `log` output through the test harness; `RUST_LOG=debug` shows driver traffic.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
