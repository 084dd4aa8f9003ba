//! # hotline-shared
//!
//! Domain models and wire types shared by every Hotline crate: user, contact
//! and friend-request records as the remote services serialize them, plus the
//! presence rule and the small text-formatting helpers the UI layers need.

pub mod constants;
pub mod format;
pub mod timestamp;
pub mod types;

pub use types::*;
