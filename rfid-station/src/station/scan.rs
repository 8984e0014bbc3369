// rfid-station/src/station/scan.rs

use log::debug;

use super::{
    CardFailure, MSG_DATA_PREFIX, MSG_NO_DATA, MSG_READING, MSG_SERIAL_FAILED, Stage, Station,
    StepOutcome,
};
use crate::Result;
use crate::console::Console;
use crate::constants::LINE_ENDING;
use crate::transport::CardTransport;
use crate::types::{BlockData, Uid};

impl<T, C> Station<'_, T, C>
where
    T: CardTransport,
    C: Console,
{
    /// Scan mode: poll, report the UID, read and report the fixed block, then
    /// release the card. Never blocks.
    pub(super) fn scan_cycle(&mut self) -> Result<StepOutcome> {
        if !self.transport.is_new_card_present() {
            return Ok(StepOutcome::NoCard);
        }

        let uid = match self.transport.read_card_serial() {
            Ok(uid) => uid,
            Err(e) => {
                debug!("card present but serial read failed: {}", e);
                self.console.println("")?;
                self.console.println(MSG_SERIAL_FAILED)?;
                return Ok(StepOutcome::SerialFailed);
            }
        };

        debug!("card {:?} selected", uid);
        self.console.println("")?;
        self.console.println(&format!("UID tag:{}", uid.to_report()))?;

        let block = self.read_block(&uid);
        // release before propagating a console error so the card is never
        // left authenticated
        self.release_card();
        let block = block?;

        match &block {
            Ok(data) if data.has_data() => {
                self.console.print(MSG_DATA_PREFIX)?;
                self.console.write(data.as_bytes())?;
                self.console.write(LINE_ENDING)?;
            }
            _ => self.console.println(MSG_NO_DATA)?,
        }

        Ok(StepOutcome::Scanned { uid, block })
    }

    /// Authenticate and read the configured block. Card failures are printed
    /// and returned as the inner `Err`.
    fn read_block(&mut self, uid: &Uid) -> Result<std::result::Result<BlockData, CardFailure>> {
        self.console.println(MSG_READING)?;
        let block = self.config.target.absolute();

        if let Err(e) = self.transport.authenticate(block, &self.config.key, uid) {
            return self.report_failure(Stage::Authenticate, e).map(Err);
        }

        match self.transport.mifare_read(block) {
            Ok(data) => {
                debug!("block {} read: {}", block, data.to_hex());
                Ok(Ok(data))
            }
            Err(e) => self.report_failure(Stage::Read, e).map(Err),
        }
    }
}
