// rfid-station/src/flag.rs
//! One-bit signals shared between the interrupt context and the main loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Write-request flag.
///
/// The trigger side only ever calls [`ModeFlag::raise`], the main loop only
/// ever calls [`ModeFlag::clear`]. Raising an already raised flag is a no-op,
/// so triggers that arrive while a request is pending are coalesced.
#[derive(Debug, Default)]
pub struct ModeFlag(AtomicBool);

impl ModeFlag {
    /// A lowered flag. `const` so it can back a `static` reachable from an
    /// interrupt handler.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Trigger side: request write mode.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Main loop side: the write cycle is over.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Is a write request pending?
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Cloneable cancellation signal for the otherwise unbounded waits.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is not cancelled yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// None
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
