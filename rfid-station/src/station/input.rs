// rfid-station/src/station/input.rs

use std::borrow::Cow;
use std::time::Duration;

use crate::Result;
use crate::console::Console;
use crate::types::BlockData;
use crate::utils::WaitBound;

/// Operator text collected from the console: never empty, terminator
/// stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine(Vec<u8>);

impl InputLine {
    /// Raw line bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a collected line.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lossy text view, for logs.
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// The block to write: NUL padded, clipped to 16 bytes.
    pub fn to_block(&self) -> BlockData {
        BlockData::from_line(&self.0)
    }
}

/// Accumulate console bytes until `\n` or `\r` ends a non-empty line.
///
/// Terminators on an empty buffer are skipped, so leading blank lines (and the
/// `\n` of a `\r\n` pair) never end the wait. Only polls that return nothing
/// count against `bound`, and each of them sleeps `interval` before the next
/// read.
pub fn collect_line<C: Console + ?Sized>(
    console: &mut C,
    bound: &WaitBound,
    interval: Duration,
) -> Result<InputLine> {
    let mut buf = Vec::new();
    let mut waiter = bound.paced(interval);
    loop {
        match console.read_byte()? {
            Some(b'\n') | Some(b'\r') => {
                if !buf.is_empty() {
                    return Ok(InputLine(buf));
                }
            }
            Some(b) => buf.push(b),
            None => waiter.tick()?,
        }
    }
}
