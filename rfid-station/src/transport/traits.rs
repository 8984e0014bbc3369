// rfid-station/src/transport/traits.rs

use crate::Result;
use crate::types::{BlockData, MifareKey, Uid};

/// Card transport abstracts the reader chip away from the station logic.
///
/// Failures are reported as `Error::Status` carrying the transport's own
/// status; the station prints its name and moves on.
pub trait CardTransport {
    /// Is a card in the field that answers REQA? Never an error: a card that
    /// cannot be talked to is simply not present.
    fn is_new_card_present(&mut self) -> bool;

    /// Run anticollision/select and return the UID of the card in the field.
    fn read_card_serial(&mut self) -> Result<Uid>;

    /// MIFARE Classic Key A authentication for the sector holding `block`.
    fn authenticate(&mut self, block: u8, key: &MifareKey, uid: &Uid) -> Result<()>;

    /// Read one 16 byte block. Requires prior authentication.
    fn mifare_read(&mut self, block: u8) -> Result<BlockData>;

    /// Write one 16 byte block. Requires prior authentication.
    fn mifare_write(&mut self, block: u8, data: &BlockData) -> Result<()>;

    /// Put the card into HALT so it stops answering REQA.
    fn halt_a(&mut self) -> Result<()>;

    /// Leave the authenticated (encrypted) session.
    fn stop_crypto1(&mut self) -> Result<()>;

    /// Release the card: HALT then stop crypto. Both steps always run; the
    /// first failure is returned.
    fn release(&mut self) -> Result<()> {
        let halted = self.halt_a();
        let stopped = self.stop_crypto1();
        halted.and(stopped)
    }
}

impl<T: CardTransport + ?Sized> CardTransport for Box<T> {
    fn is_new_card_present(&mut self) -> bool {
        (**self).is_new_card_present()
    }

    fn read_card_serial(&mut self) -> Result<Uid> {
        (**self).read_card_serial()
    }

    fn authenticate(&mut self, block: u8, key: &MifareKey, uid: &Uid) -> Result<()> {
        (**self).authenticate(block, key, uid)
    }

    fn mifare_read(&mut self, block: u8) -> Result<BlockData> {
        (**self).mifare_read(block)
    }

    fn mifare_write(&mut self, block: u8, data: &BlockData) -> Result<()> {
        (**self).mifare_write(block, data)
    }

    fn halt_a(&mut self) -> Result<()> {
        (**self).halt_a()
    }

    fn stop_crypto1(&mut self) -> Result<()> {
        (**self).stop_crypto1()
    }
}
