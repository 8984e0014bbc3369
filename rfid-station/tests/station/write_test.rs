use anyhow::Result;

use rfid_station::console::{Console, MockConsole};
use rfid_station::flag::ModeFlag;
use rfid_station::station::{Station, StepOutcome};
use rfid_station::test_support::{bounded_config, mock_station_with_card};
use rfid_station::transport::{CardTransport, MockCardTransport};
use rfid_station::types::BlockData;

use crate::common::fixtures;

#[test]
fn written_text_is_read_back_in_scan_mode() -> Result<()> {
    crate::common::init_logging();
    let flag = ModeFlag::new();
    flag.raise();
    let mut st = mock_station_with_card(&flag, fixtures::blank_card(), "hello\n");

    assert!(matches!(st.step()?, StepOutcome::Written { result: Ok(()), .. }));
    assert!(!flag.is_raised());

    // present the (halted) card again
    let card = st.transport_mut().remove_card().expect("card in field");
    st.transport_mut().present_card(card);
    st.console_mut().clear_output();

    st.step()?;
    let lines = st.console().lines();
    assert!(lines[2].starts_with("Data from card : hello"));
    Ok(())
}

#[test]
fn blank_lines_do_not_end_input() -> Result<()> {
    crate::common::init_logging();
    let flag = ModeFlag::new();
    flag.raise();
    let mut st = mock_station_with_card(&flag, fixtures::blank_card(), "\n\r\n\rabc\r\n");

    match st.step()? {
        StepOutcome::Written { block, .. } => assert_eq!(block, BlockData::from_line(b"abc")),
        other => panic!("unexpected outcome {:?}", other),
    }
    Ok(())
}

#[test]
fn sixteen_byte_line_fills_block_exactly() -> Result<()> {
    crate::common::init_logging();
    let flag = ModeFlag::new();
    flag.raise();
    let mut st = mock_station_with_card(&flag, fixtures::blank_card(), "0123456789ABCDEF\n");
    st.step()?;
    let card = st.transport().card.as_ref().expect("card in field");
    assert_eq!(
        card.block(8),
        fixtures::block_from_hex("30313233343536373839414243444546")
    );
    Ok(())
}

#[test]
fn boxed_collaborators_drive_the_station() -> Result<()> {
    crate::common::init_logging();
    let flag = ModeFlag::new();
    flag.raise();
    let mut transport = MockCardTransport::empty();
    transport.present_card(fixtures::blank_card());
    let transport: Box<dyn CardTransport> = Box::new(transport);
    let console: Box<dyn Console> = Box::new(MockConsole::with_input("boxed\n"));

    let mut st = Station::with_config(transport, console, &flag, bounded_config());
    assert!(matches!(st.step()?, StepOutcome::Written { result: Ok(()), .. }));
    assert!(!flag.is_raised());
    Ok(())
}
