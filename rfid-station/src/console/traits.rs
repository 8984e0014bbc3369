// rfid-station/src/console/traits.rs

use crate::Result;
use crate::constants::LINE_ENDING;

/// Character console the station reports to and reads operator input from.
pub trait Console {
    /// Send raw bytes. Bytes are passed through untouched (block contents are
    /// printed without any encoding check).
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Take one input byte if one is available. Must not block: `Ok(None)`
    /// means nothing has arrived yet.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Send text without a line ending.
    fn print(&mut self, text: &str) -> Result<()> {
        self.write(text.as_bytes())
    }

    /// Send text followed by `\r\n`.
    fn println(&mut self, text: &str) -> Result<()> {
        self.write(text.as_bytes())?;
        self.write(LINE_ENDING)
    }
}

impl<C: Console + ?Sized> Console for Box<C> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }
}
