// rfid-station/src/station/write.rs

use log::{debug, info};

use super::input::collect_line;
use super::{
    CardFailure, MSG_ECHO_PREFIX, MSG_ENTER_DATA, MSG_PLACE_CARD, MSG_WRITING, MSG_WRITTEN, Stage,
    Station, StepOutcome,
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
    /// Write mode: collect a line, wait for a card, write the line into the
    /// fixed block, release the card and lower the flag.
    ///
    /// Blocks on the operator and on the card. If either wait is abandoned the
    /// flag stays raised and no card operation has been attempted.
    pub(super) fn write_cycle(&mut self) -> Result<StepOutcome> {
        self.console.println("")?;
        self.console.println(MSG_ENTER_DATA)?;
        let line = collect_line(
            &mut self.console,
            &self.config.input_wait,
            self.config.poll_interval,
        )?;
        debug!("operator entered {} bytes", line.len());

        self.console.print(MSG_ECHO_PREFIX)?;
        self.console.write(line.as_bytes())?;
        self.console.write(LINE_ENDING)?;

        self.console.println("")?;
        self.console.println(MSG_PLACE_CARD)?;
        let uid = self.wait_for_card()?;

        let block = line.to_block();
        let result = self.write_block(&uid, &block);
        self.release_card();
        // the write attempt is over whatever happened above
        self.flag.clear();
        debug!("write cycle finished, back to scan mode");

        Ok(StepOutcome::Written {
            uid,
            block,
            result: result?,
        })
    }

    /// Poll until a card is present and its UID reads. Failures are silent
    /// and each one waits out the poll interval.
    fn wait_for_card(&mut self) -> Result<Uid> {
        let mut waiter = self.config.card_wait.paced(self.config.poll_interval);
        loop {
            if self.transport.is_new_card_present() {
                if let Ok(uid) = self.transport.read_card_serial() {
                    return Ok(uid);
                }
            }
            waiter.tick()?;
        }
    }

    fn write_block(
        &mut self,
        uid: &Uid,
        data: &BlockData,
    ) -> Result<std::result::Result<(), CardFailure>> {
        self.console.println("")?;
        self.console.println(MSG_WRITING)?;
        let block = self.config.target.absolute();

        if let Err(e) = self.transport.authenticate(block, &self.config.key, uid) {
            return self.report_failure(Stage::Authenticate, e).map(Err);
        }

        match self.transport.mifare_write(block, data) {
            Ok(()) => {
                info!("wrote block {} on card {:?}", block, uid);
                self.console.println(MSG_WRITTEN)?;
                Ok(Ok(()))
            }
            Err(e) => self.report_failure(Stage::Write, e).map(Err),
        }
    }
}
