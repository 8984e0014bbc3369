// rfid-station/src/transport/mod.rs

/// In-memory card field for tests
pub mod mock;
/// The card transport trait
pub mod traits;

pub use mock::{MockCard, MockCardTransport, TransportCall};
pub use traits::CardTransport;
