use rfid_station::console::MockConsole;
use rfid_station::flag::ModeFlag;
use rfid_station::station::{Stage, Station, StepOutcome};
use rfid_station::test_support::{card_with_text, mock_station_with_card};
use rfid_station::transport::{MockCard, MockCardTransport, TransportCall};
use rfid_station::types::StatusCode;

use crate::common::fixtures;

#[test]
fn scanned_card_reports_uid_and_block() {
    crate::common::init_logging();
    let flag = ModeFlag::new();
    let card = fixtures::card_with_block("68656c6c6f2c20776f726c6421000000");
    let mut st = mock_station_with_card(&flag, card, "");

    assert!(matches!(st.step().unwrap(), StepOutcome::Scanned { block: Ok(_), .. }));
    let lines = st.console().lines();
    assert_eq!(lines[0], "UID tag: 12 34 56 78");
    assert_eq!(lines[1], "Card detected. Reading data...");
    assert!(lines[2].starts_with("Data from card : hello, world!"));
}

#[test]
fn authentication_failure_reports_uid_then_status() {
    crate::common::init_logging();
    let flag = ModeFlag::new();
    let mut st = mock_station_with_card(&flag, fixtures::blank_card(), "");
    st.transport_mut().fail_auth = Some(StatusCode::Timeout);

    match st.step().unwrap() {
        StepOutcome::Scanned { uid, block: Err(f) } => {
            assert_eq!(uid.as_bytes(), fixtures::sample_uid_bytes().as_slice());
            assert_eq!(f.stage, Stage::Authenticate);
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let lines = st.console().lines();
    let uid_at = lines.iter().position(|l| l == "UID tag: 12 34 56 78").unwrap();
    let auth_at = lines
        .iter()
        .position(|l| l == "Authentication failed: Timeout in communication.")
        .unwrap();
    assert!(uid_at < auth_at);
    assert!(!st.console().output_text().contains("Data from card :"));

    // nothing read, but the card was still released
    let t = st.transport();
    assert_eq!(t.count(&TransportCall::Read(8)), 0);
    assert_eq!(t.count(&TransportCall::HaltA), 1);
    assert_eq!(t.count(&TransportCall::StopCrypto1), 1);
}

#[test]
fn double_size_uid_is_reported_in_full() {
    crate::common::init_logging();
    let flag = ModeFlag::new();
    let card = MockCard::new(&fixtures::double_uid_bytes());
    let mut st = mock_station_with_card(&flag, card, "");
    st.step().unwrap();
    assert_eq!(st.console().lines()[0], "UID tag: 04 A1 B2 C3 D4 E5 F6");
}

#[test]
fn leading_nul_means_no_data() {
    crate::common::init_logging();
    let flag = ModeFlag::new();
    let card = fixtures::card_with_block("00414243444546474849505152535455");
    let mut st = mock_station_with_card(&flag, card, "");
    st.step().unwrap();
    assert_eq!(st.console().lines().last().unwrap(), "No data from card!");
}

#[test]
fn halted_card_is_reported_once_per_presentation() {
    crate::common::init_logging();
    let flag = ModeFlag::new();
    let card = card_with_text(&fixtures::sample_uid_bytes(), "once");
    let mut st = mock_station_with_card(&flag, card.clone(), "");

    assert!(matches!(st.step().unwrap(), StepOutcome::Scanned { .. }));
    assert_eq!(st.step().unwrap(), StepOutcome::NoCard);
    assert_eq!(st.step().unwrap(), StepOutcome::NoCard);

    // taken away and presented again
    st.transport_mut().remove_card();
    st.transport_mut().present_card(card);
    assert!(matches!(st.step().unwrap(), StepOutcome::Scanned { .. }));

    let reports = st
        .console()
        .lines()
        .iter()
        .filter(|l| l.starts_with("UID tag:"))
        .count();
    assert_eq!(reports, 2);
}

#[test]
fn empty_field_never_touches_console() {
    crate::common::init_logging();
    let flag = ModeFlag::new();
    let mut st = Station::new(MockCardTransport::empty(), MockConsole::new(), &flag);
    for _ in 0..10 {
        assert_eq!(st.step().unwrap(), StepOutcome::NoCard);
    }
    assert!(st.console().output.is_empty());
    assert_eq!(st.transport().count(&TransportCall::IsNewCardPresent), 10);
}
