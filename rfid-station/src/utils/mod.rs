//! Utilities for rfid-station: small, reusable helpers used across the crate.
//!
//! This module contains the console formatting helpers (hex) and the bounded
//! wait used by the blocking loops.

/// Hex formatting
pub mod hex;
/// Bounded polling
pub mod wait;

pub use hex::*;
pub use wait::*;
