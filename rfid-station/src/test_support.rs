//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the mock station setup so tests across the
//! crate and the tests/ directory build stations the same way.
#![allow(dead_code)]

use crate::config::StationConfig;
use crate::console::MockConsole;
use crate::flag::ModeFlag;
use crate::station::Station;
use crate::transport::{MockCard, MockCardTransport};
use crate::utils::WaitBound;

/// Poll limit used by [`bounded_config`].
#[doc(hidden)]
pub const TEST_WAIT_POLLS: u64 = 64;

/// Firmware defaults, but with both blocking waits limited so a test that
/// never supplies input or a card fails instead of hanging.
#[doc(hidden)]
pub fn bounded_config() -> StationConfig {
    StationConfig::new().wait_bound(WaitBound::polls(TEST_WAIT_POLLS))
}

/// A station over an empty mock field and a console preloaded with `input`.
#[doc(hidden)]
pub fn mock_station<'f>(
    flag: &'f ModeFlag,
    input: &str,
) -> Station<'f, MockCardTransport, MockConsole> {
    Station::with_config(
        MockCardTransport::empty(),
        MockConsole::with_input(input),
        flag,
        bounded_config(),
    )
}

/// A station with `card` already in the field.
#[doc(hidden)]
pub fn mock_station_with_card<'f>(
    flag: &'f ModeFlag,
    card: MockCard,
    input: &str,
) -> Station<'f, MockCardTransport, MockConsole> {
    let mut station = mock_station(flag, input);
    station.transport_mut().present_card(card);
    station
}

/// A blank card carrying `text` in the application block.
#[doc(hidden)]
pub fn card_with_text(uid: &[u8], text: &str) -> MockCard {
    let block = crate::BlockAddress::default().absolute();
    MockCard::new(uid).with_block(block, crate::BlockData::from_line(text.as_bytes()))
}
