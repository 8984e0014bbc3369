// rfid-station/src/config.rs

use std::time::Duration;

use crate::flag::CancelToken;
use crate::types::{BlockAddress, MifareKey};
use crate::utils::{WaitBound, ms};

/// Station settings. `Default` is the firmware configuration: sector 1 /
/// block 4, factory key, unbounded waits, no idle sleep.
#[derive(Debug, Clone, Default)]
pub struct StationConfig {
    /// Block read in scan mode and written in write mode
    pub target: BlockAddress,
    /// Key A used for authentication
    pub key: MifareKey,
    /// Bound for the operator-input wait
    pub input_wait: WaitBound,
    /// Bound for the wait-for-card in write mode
    pub card_wait: WaitBound,
    /// Sleep after a scan iteration that found no card, and between
    /// unsuccessful polls of the write-mode waits
    pub poll_interval: Duration,
}

impl StationConfig {
    /// Same as `Default`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another block.
    pub fn target(mut self, target: BlockAddress) -> Self {
        self.target = target;
        self
    }

    /// Authenticate with another key.
    pub fn key(mut self, key: MifareKey) -> Self {
        self.key = key;
        self
    }

    /// Apply the same bound to both blocking waits.
    pub fn wait_bound(mut self, bound: WaitBound) -> Self {
        self.input_wait = bound.clone();
        self.card_wait = bound;
        self
    }

    /// Bound only the operator-input wait.
    pub fn input_wait(mut self, bound: WaitBound) -> Self {
        self.input_wait = bound;
        self
    }

    /// Bound only the wait for a card in write mode.
    pub fn card_wait(mut self, bound: WaitBound) -> Self {
        self.card_wait = bound;
        self
    }

    /// Sleep between unsuccessful polls, in milliseconds.
    pub fn poll_interval_ms(mut self, interval: u64) -> Self {
        self.poll_interval = ms(interval);
        self
    }

    /// Thread a cancel token into both waits, keeping any poll limits.
    pub fn cancel_with(mut self, token: &CancelToken) -> Self {
        self.input_wait = self.input_wait.with_cancel(token.clone());
        self.card_wait = self.card_wait.with_cancel(token.clone());
        self
    }
}
