// Aggregator for station integration tests in `tests/station/`.

#[path = "common/mod.rs"]
mod common;

#[path = "station/scan_test.rs"]
mod scan_test;

#[path = "station/write_test.rs"]
mod write_test;

#[path = "station/mode_switch_test.rs"]
mod mode_switch_test;
