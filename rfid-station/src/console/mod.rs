// rfid-station/src/console/mod.rs

/// Recording console for tests
pub mod mock;
/// The console trait
pub mod traits;

pub use mock::MockConsole;
pub use traits::Console;
