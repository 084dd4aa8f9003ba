//! Working-set state for the tabbed views.
//!
//! Each view owns its list outright and is loaded once per mount; a manual
//! reload is a remount. Loads carry a generation counter: remounting bumps
//! the generation, and a response whose generation no longer matches is
//! dropped on arrival instead of overwriting newer state. Responses within
//! one generation race freely; the last to arrive wins.

use std::collections::HashSet;

use hotline_shared::{CallRecord, Contact, FriendRequest, RequestId, SearchResult, UserId};

/// A list fetched once per mount, with the stale-response guard.
#[derive(Debug)]
pub struct LoadedList<T> {
    generation: u64,
    pub loading: bool,
    pub items: Vec<T>,
}

impl<T> Default for LoadedList<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            loading: false,
            items: Vec::new(),
        }
    }
}

impl<T> LoadedList<T> {
    /// Begin a fresh load, invalidating any in-flight response. Returns the
    /// new generation to tag the fetch with.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Apply a completed load if it belongs to the current generation.
    /// Returns false for stale responses, which leave state untouched.
    pub fn apply(&mut self, generation: u64, items: Vec<T>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        self.items = items;
        true
    }

    /// Mark a failed load finished without touching the items. Stale
    /// failures are ignored too.
    pub fn fail(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        true
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

pub type ContactsView = LoadedList<Contact>;
pub type HistoryView = LoadedList<CallRecord>;

/// Pending incoming friend requests.
///
/// Mutation follows confirmed acknowledgment: an entry leaves the working
/// set only after the service answered 2xx, so a failed accept/reject leaves
/// the list exactly as it was.
#[derive(Debug, Default)]
pub struct RequestInbox {
    pub list: LoadedList<FriendRequest>,
    /// Ids with an accept/reject in flight, to disable their actions.
    pub in_flight: HashSet<RequestId>,
}

impl RequestInbox {
    pub fn begin_action(&mut self, id: RequestId) -> bool {
        self.in_flight.insert(id)
    }

    /// Remove exactly the acknowledged entry.
    pub fn confirm_removal(&mut self, id: RequestId) {
        self.in_flight.remove(&id);
        self.list.items.retain(|r| r.id != id);
    }

    /// A failed command leaves the entry in place for manual retry.
    pub fn action_failed(&mut self, id: RequestId) {
        self.in_flight.remove(&id);
    }

    pub fn count(&self) -> usize {
        self.list.items.len()
    }
}

/// One search tab session: transient results plus the non-authoritative
/// sent-set that disables the send action for this process's lifetime.
#[derive(Debug, Default)]
pub struct SearchSession {
    pub query: String,
    pub results: LoadedList<SearchResult>,
    pub sent: HashSet<UserId>,
    /// Targets with a send_request in flight.
    pub sending: HashSet<UserId>,
}

impl SearchSession {
    pub fn mark_sending(&mut self, target: UserId) -> bool {
        if self.sent.contains(&target) {
            return false;
        }
        self.sending.insert(target)
    }

    pub fn confirm_sent(&mut self, target: UserId) {
        self.sending.remove(&target);
        self.sent.insert(target);
    }

    pub fn send_failed(&mut self, target: UserId) {
        self.sending.remove(&target);
    }

    pub fn can_send(&self, target: UserId) -> bool {
        !self.sent.contains(&target) && !self.sending.contains(&target)
    }
}
