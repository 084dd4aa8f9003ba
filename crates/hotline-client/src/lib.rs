//! # hotline-client
//!
//! The session and request-state manager behind the Hotline UI. One
//! [`AppCore`](core::AppCore) owns every piece of mutable client state: the
//! persisted session, the friend/search/request working sets, and the call
//! session with its cancellable timers. Network work runs on spawned tokio
//! tasks that report back exclusively through an [`AppEvent`](events::AppEvent)
//! channel; the owning thread applies events between renders, so no state is
//! ever shared or locked.

pub mod call;
pub mod core;
pub mod events;
pub mod session;
pub mod views;

pub use crate::core::{AppCore, Notice, NoticeLevel, RootView, Tab};
pub use call::{ActiveCall, CallPhase, Timings};
pub use events::AppEvent;
pub use session::{SessionState, SessionStore, StoreError};
