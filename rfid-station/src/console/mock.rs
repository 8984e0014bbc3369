// rfid-station/src/console/mock.rs

use std::collections::VecDeque;

use crate::Result;
use crate::console::traits::Console;

/// Mock console for unit tests. It records output and serves queued input
/// one byte at a time.
#[derive(Debug, Default)]
pub struct MockConsole {
    /// Bytes not read yet
    pub input: VecDeque<u8>,
    /// Everything written so far
    pub output: Vec<u8>,
    /// Number of input polls answered so far (including empty ones)
    pub polls: usize,
}

impl MockConsole {
    /// No input, no output.
    pub fn new() -> Self {
        Self::default()
    }

    /// A console with `text` queued as input.
    pub fn with_input(text: &str) -> Self {
        let mut c = Self::new();
        c.push_input(text);
        c
    }

    /// Queue more operator input.
    pub fn push_input(&mut self, text: &str) {
        self.input.extend(text.as_bytes());
    }

    /// Output decoded lossily; block contents may contain NUL bytes.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Output split on the `\r\n` line ending, with empty lines dropped.
    pub fn lines(&self) -> Vec<String> {
        self.output_text()
            .split("\r\n")
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Forget the output captured so far.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl Console for MockConsole {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        self.polls += 1;
        Ok(self.input.pop_front())
    }
}
