// rfid-station/src/transport/mock.rs

use std::collections::HashMap;

use crate::transport::traits::CardTransport;
use crate::types::{BlockData, MifareKey, StatusCode, Uid};
use crate::{Error, Result};

/// A MIFARE Classic card sitting in the mock field.
#[derive(Debug, Clone)]
pub struct MockCard {
    /// UID reported by anticollision
    pub uid: Vec<u8>,
    /// Key A the card accepts
    pub key: MifareKey,
    /// Written blocks; missing blocks read as empty
    pub blocks: HashMap<u8, BlockData>,
}

impl MockCard {
    /// A blank card with the factory key.
    pub fn new(uid: &[u8]) -> Self {
        Self {
            uid: uid.to_vec(),
            key: MifareKey::FACTORY_DEFAULT,
            blocks: HashMap::new(),
        }
    }

    /// Preload `block` with `data`.
    pub fn with_block(mut self, block: u8, data: BlockData) -> Self {
        self.blocks.insert(block, data);
        self
    }

    /// Protect the card with another key.
    pub fn with_key(mut self, key: MifareKey) -> Self {
        self.key = key;
        self
    }

    /// Current content of `block`.
    pub fn block(&self, block: u8) -> BlockData {
        self.blocks.get(&block).copied().unwrap_or(BlockData::EMPTY)
    }
}

/// Recorded transport call, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    /// `is_new_card_present`
    IsNewCardPresent,
    /// `read_card_serial`
    ReadCardSerial,
    /// `authenticate`, with the block and key used
    Authenticate {
        /// Absolute block
        block: u8,
        /// Key presented
        key: MifareKey,
    },
    /// `mifare_read` of a block
    Read(u8),
    /// `mifare_write` of a block
    Write(u8, BlockData),
    /// `halt_a`
    HaltA,
    /// `stop_crypto1`
    StopCrypto1,
}

/// Mock transport for unit tests. It simulates one card in the field,
/// records every call and lets tests inject failures.
///
/// Like a real card, a halted card stops answering presence polls until it
/// is presented again, and reads/writes need a prior authentication.
#[derive(Debug, Default)]
pub struct MockCardTransport {
    /// Card in the field, if any
    pub card: Option<MockCard>,
    /// Every call made, in order
    pub calls: Vec<TransportCall>,
    /// Testing hook: number of presence polls that report no card even
    /// though one is in the field
    pub absent_polls: usize,
    /// Testing hook: number of UID reads that should fail
    pub serial_failures: usize,
    /// Testing hook: fail authentication with this status
    pub fail_auth: Option<StatusCode>,
    /// Testing hook: fail reads with this status
    pub fail_read: Option<StatusCode>,
    /// Testing hook: fail writes with this status
    pub fail_write: Option<StatusCode>,
    /// Testing hook: fail HLTA with this status
    pub fail_halt: Option<StatusCode>,
    halted: bool,
    authenticated: Option<u8>,
}

impl MockCardTransport {
    /// Empty field.
    pub fn empty() -> Self {
        Self::default()
    }

    /// One card in the field.
    pub fn with_card(card: MockCard) -> Self {
        Self {
            card: Some(card),
            ..Self::default()
        }
    }

    /// Put a (new) card in the field. A halted card wakes up again.
    pub fn present_card(&mut self, card: MockCard) {
        self.card = Some(card);
        self.halted = false;
        self.authenticated = None;
    }

    /// Take the card out of the field.
    pub fn remove_card(&mut self) -> Option<MockCard> {
        self.authenticated = None;
        self.card.take()
    }

    /// Is a Crypto1 session open?
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.is_some()
    }

    /// Was the card halted since it was presented?
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// How often `call` was made.
    pub fn count(&self, call: &TransportCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    fn awake_card(&mut self) -> Result<&mut MockCard> {
        if self.halted {
            return Err(Error::Status(StatusCode::Timeout));
        }
        self.card.as_mut().ok_or(Error::Status(StatusCode::Timeout))
    }

    fn check_session(&self, block: u8) -> Result<()> {
        // MIFARE Classic: authentication covers the whole sector
        match self.authenticated {
            Some(auth) if auth / 4 == block / 4 => Ok(()),
            _ => Err(Error::Status(StatusCode::MifareNack)),
        }
    }
}

impl CardTransport for MockCardTransport {
    fn is_new_card_present(&mut self) -> bool {
        self.calls.push(TransportCall::IsNewCardPresent);
        if self.card.is_none() || self.halted {
            return false;
        }
        if self.absent_polls > 0 {
            self.absent_polls -= 1;
            return false;
        }
        true
    }

    fn read_card_serial(&mut self) -> Result<Uid> {
        self.calls.push(TransportCall::ReadCardSerial);
        if self.serial_failures > 0 {
            self.serial_failures -= 1;
            return Err(Error::Status(StatusCode::Collision));
        }
        let card = self.awake_card()?;
        Uid::try_from(&card.uid[..])
    }

    fn authenticate(&mut self, block: u8, key: &MifareKey, uid: &Uid) -> Result<()> {
        self.calls.push(TransportCall::Authenticate { block, key: *key });
        if let Some(code) = self.fail_auth {
            return Err(Error::Status(code));
        }
        let card = self.awake_card()?;
        if card.key != *key || card.uid.as_slice() != uid.as_bytes() {
            return Err(Error::Status(StatusCode::Timeout));
        }
        self.authenticated = Some(block);
        Ok(())
    }

    fn mifare_read(&mut self, block: u8) -> Result<BlockData> {
        self.calls.push(TransportCall::Read(block));
        if let Some(code) = self.fail_read {
            return Err(Error::Status(code));
        }
        self.check_session(block)?;
        Ok(self.awake_card()?.block(block))
    }

    fn mifare_write(&mut self, block: u8, data: &BlockData) -> Result<()> {
        self.calls.push(TransportCall::Write(block, *data));
        if let Some(code) = self.fail_write {
            return Err(Error::Status(code));
        }
        self.check_session(block)?;
        self.awake_card()?.blocks.insert(block, *data);
        Ok(())
    }

    fn halt_a(&mut self) -> Result<()> {
        self.calls.push(TransportCall::HaltA);
        if let Some(code) = self.fail_halt {
            return Err(Error::Status(code));
        }
        // HLTA is not answered; no card in the field is fine too
        if self.card.is_some() {
            self.halted = true;
        }
        Ok(())
    }

    fn stop_crypto1(&mut self) -> Result<()> {
        self.calls.push(TransportCall::StopCrypto1);
        self.authenticated = None;
        Ok(())
    }
}
