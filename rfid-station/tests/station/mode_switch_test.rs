use std::thread;
use std::time::Duration;

use serial_test::serial;

use rfid_station::Error;
use rfid_station::console::MockConsole;
use rfid_station::flag::{CancelToken, ModeFlag};
use rfid_station::station::{Station, StepOutcome};
use rfid_station::transport::MockCardTransport;
use rfid_station::test_support::{mock_station, mock_station_with_card};

use crate::common::fixtures;

/// Shared like the firmware's flag: raised from another thread.
static WRITE_REQUEST: ModeFlag = ModeFlag::new();

fn raise_from_trigger_thread() {
    thread::spawn(|| WRITE_REQUEST.raise())
        .join()
        .expect("trigger thread");
}

#[test]
#[serial]
fn trigger_while_idle_blocks_until_line_and_card() {
    crate::common::init_logging();
    WRITE_REQUEST.clear();
    let mut st = mock_station(&WRITE_REQUEST, "");
    assert_eq!(st.step().unwrap(), StepOutcome::NoCard);

    raise_from_trigger_thread();

    // no operator input yet
    assert!(matches!(st.step(), Err(Error::WaitExhausted(_))));
    assert!(st.console().output_text().contains("Please enter the data"));
    assert!(WRITE_REQUEST.is_raised());

    // a line, but no card
    st.console_mut().push_input("stored\n");
    assert!(matches!(st.step(), Err(Error::WaitExhausted(_))));
    assert!(st.console().output_text().contains("Place the card"));
    assert!(WRITE_REQUEST.is_raised());

    // both
    st.console_mut().push_input("stored\n");
    st.transport_mut().present_card(fixtures::blank_card());
    assert!(matches!(st.step().unwrap(), StepOutcome::Written { result: Ok(()), .. }));
    assert!(!WRITE_REQUEST.is_raised());
}

#[test]
#[serial]
fn repeated_triggers_are_coalesced() {
    crate::common::init_logging();
    WRITE_REQUEST.clear();
    let mut st = mock_station_with_card(&WRITE_REQUEST, fixtures::blank_card(), "one\ntwo\n");

    raise_from_trigger_thread();
    raise_from_trigger_thread();

    assert!(matches!(st.step().unwrap(), StepOutcome::Written { .. }));
    // one write cycle, then back to scanning (the halted card is silent)
    assert_eq!(st.step().unwrap(), StepOutcome::NoCard);
    assert!(!WRITE_REQUEST.is_raised());
}

#[test]
#[serial]
fn trigger_during_scan_is_honoured_on_next_step() {
    crate::common::init_logging();
    WRITE_REQUEST.clear();
    let mut st = mock_station_with_card(&WRITE_REQUEST, fixtures::blank_card(), "late\n");

    assert!(matches!(st.step().unwrap(), StepOutcome::Scanned { .. }));
    raise_from_trigger_thread();

    let card = st.transport_mut().remove_card().expect("card in field");
    st.transport_mut().present_card(card);
    assert!(matches!(st.step().unwrap(), StepOutcome::Written { .. }));
    assert!(!WRITE_REQUEST.is_raised());
}

#[test]
#[serial]
fn cancel_token_ends_a_blocked_write_mode() {
    crate::common::init_logging();
    WRITE_REQUEST.clear();
    // default config: unbounded waits, only the token can end them
    let mut st = Station::new(MockCardTransport::empty(), MockConsole::new(), &WRITE_REQUEST);
    WRITE_REQUEST.raise();

    let token = CancelToken::new();
    let canceller = {
        let token = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            token.cancel();
        })
    };

    st.run_until(&token).unwrap();
    canceller.join().expect("canceller thread");

    assert!(st.console().output_text().contains("Please enter the data"));
    // the request survives the shutdown
    assert!(WRITE_REQUEST.is_raised());
    WRITE_REQUEST.clear();
}
