//! Events flowing from spawned network/timer tasks back to the owning
//! thread. Every async outcome becomes exactly one event; [`AppCore`] applies
//! them between renders, so task code never touches app state directly.
//!
//! [`AppCore`]: crate::core::AppCore

use hotline_api::{ApiError, AuthError, StartedCall};
use hotline_shared::{CallRecord, Contact, FriendRequest, RequestId, SearchResult, User, UserId};

#[derive(Debug)]
pub enum AppEvent {
    /// Login or register completed.
    AuthFinished(Result<User, AuthError>),

    /// Friends list fetch completed. `generation` identifies the mount that
    /// issued it; stale generations are dropped on arrival.
    FriendsLoaded {
        generation: u64,
        result: Result<Vec<Contact>, ApiError>,
    },

    /// Pending-requests fetch completed.
    RequestsLoaded {
        generation: u64,
        result: Result<Vec<FriendRequest>, ApiError>,
    },

    /// User search completed.
    SearchFinished {
        generation: u64,
        result: Result<Vec<SearchResult>, ApiError>,
    },

    /// Call-history fetch completed.
    HistoryLoaded {
        generation: u64,
        result: Result<Vec<CallRecord>, ApiError>,
    },

    /// `send_request` acknowledged or rejected.
    RequestSent {
        target: UserId,
        result: Result<(), ApiError>,
    },

    /// `accept_request` acknowledged or rejected.
    RequestAccepted {
        id: RequestId,
        result: Result<(), ApiError>,
    },

    /// `reject_request` acknowledged or rejected.
    RequestRejected {
        id: RequestId,
        result: Result<(), ApiError>,
    },

    /// The calls service answered `start_call`. `generation` identifies the
    /// call session that asked; a session torn down before the answer
    /// arrives ignores it.
    CallIdAssigned {
        generation: u64,
        result: Result<StartedCall, ApiError>,
    },

    /// The simulated ring delay elapsed.
    CallConnected { generation: u64 },

    /// One second of connected call time elapsed.
    CallTick { generation: u64 },
}
