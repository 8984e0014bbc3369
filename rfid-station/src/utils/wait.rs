//! Bounded polling for the blocking waits.
//!
//! The station blocks in two places (operator input, card wait). Both default
//! to waiting forever; a bound in polls and/or a cancel token lets hosted
//! callers and tests get control back.

use std::time::Duration;

use crate::flag::CancelToken;
use crate::{Error, Result};

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Limit applied to a blocking poll loop.
#[derive(Debug, Clone, Default)]
pub struct WaitBound {
    max_polls: Option<u64>,
    cancel: Option<CancelToken>,
}

impl WaitBound {
    /// Wait until the condition holds, however long that takes.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Give up after `n` unsuccessful polls.
    pub fn polls(n: u64) -> Self {
        Self {
            max_polls: Some(n),
            cancel: None,
        }
    }

    /// Also give up once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Poll limit, if any.
    pub fn max_polls(&self) -> Option<u64> {
        self.max_polls
    }

    /// Neither a poll limit nor a cancel token.
    pub fn is_unbounded(&self) -> bool {
        self.max_polls.is_none() && self.cancel.is_none()
    }

    pub(crate) fn start(&self) -> Waiter<'_> {
        self.paced(Duration::ZERO)
    }

    /// Like `start`, but every unsuccessful poll that keeps the wait going
    /// sleeps `interval` first.
    pub(crate) fn paced(&self, interval: Duration) -> Waiter<'_> {
        Waiter {
            bound: self,
            polls: 0,
            interval,
        }
    }
}

/// One running wait. Call [`Waiter::tick`] after every unsuccessful poll.
pub(crate) struct Waiter<'a> {
    bound: &'a WaitBound,
    polls: u64,
    interval: Duration,
}

impl Waiter<'_> {
    pub(crate) fn tick(&mut self) -> Result<()> {
        if let Some(token) = &self.bound.cancel {
            if token.is_cancelled() {
                return Err(Error::Cancelled);
            }
        }
        self.polls += 1;
        match self.bound.max_polls {
            Some(max) if self.polls >= max => Err(Error::WaitExhausted(self.polls)),
            _ => {
                if !self.interval.is_zero() {
                    std::thread::sleep(self.interval);
                }
                Ok(())
            }
        }
    }
}
