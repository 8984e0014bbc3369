// fixtures.rs: commonly used card UIDs and block contents

use rfid_station::transport::MockCard;
use rfid_station::types::BlockData;

/// UID of the card used in most scenarios: 12 34 56 78.
pub fn sample_uid_bytes() -> Vec<u8> {
    hex::decode("12345678").expect("fixture hex")
}

/// Double-size (7 byte) UID.
pub fn double_uid_bytes() -> Vec<u8> {
    hex::decode("04a1b2c3d4e5f6").expect("fixture hex")
}

pub fn blank_card() -> MockCard {
    MockCard::new(&sample_uid_bytes())
}

pub fn card_with_block(hex_block: &str) -> MockCard {
    blank_card().with_block(8, block_from_hex(hex_block))
}

/// 16-byte block from a 32-digit hex string.
pub fn block_from_hex(s: &str) -> BlockData {
    let bytes = hex::decode(s).expect("fixture hex");
    BlockData::try_from(&bytes[..]).expect("fixture block length")
}
