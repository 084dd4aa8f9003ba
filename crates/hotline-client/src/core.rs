//! The root coordinator.
//!
//! [`AppCore`] owns the session, the tabbed working sets and the call
//! session, and decides which of the three exclusive root views is showing.
//! UI layers call its intent methods; network work is spawned onto tokio
//! tasks that answer through the [`AppEvent`] channel, and the owning thread
//! feeds those answers back through [`AppCore::handle_event`].

use tokio::sync::mpsc::UnboundedSender;

use hotline_api::ServiceClients;
use hotline_shared::constants::{MIN_PASSWORD_LEN, MIN_SEARCH_QUERY_LEN};
use hotline_shared::{Contact, RequestId, UserId};

use crate::call::{ActiveCall, Timings};
use crate::events::AppEvent;
use crate::session::{SessionState, SessionStore};
use crate::views::{ContactsView, HistoryView, RequestInbox, SearchSession};

/// Which tab of the main view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Contacts,
    Search,
    Requests,
    History,
}

/// The three mutually exclusive root states. Exactly one renders at any
/// instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootView {
    /// No session: the auth screen.
    Auth,
    /// A call is active: the full-screen call view.
    Call,
    /// Signed in, browsing the tabbed main view.
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient user-facing notification, drained by the UI into its toast
/// stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

pub struct AppCore {
    clients: ServiceClients,
    store: SessionStore,
    timings: Timings,
    tx: UnboundedSender<AppEvent>,

    pub session: SessionState,
    pub tab: Tab,
    pub auth_busy: bool,
    pub contacts: ContactsView,
    pub inbox: RequestInbox,
    pub search: SearchSession,
    pub history: HistoryView,
    pub call: Option<ActiveCall>,

    call_generation: u64,
    notices: Vec<Notice>,
}

impl AppCore {
    pub fn new(
        clients: ServiceClients,
        store: SessionStore,
        timings: Timings,
        tx: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            clients,
            store,
            timings,
            tx,
            session: SessionState::Loading,
            tab: Tab::Contacts,
            auth_busy: false,
            contacts: ContactsView::default(),
            inbox: RequestInbox::default(),
            search: SearchSession::default(),
            history: HistoryView::default(),
            call: None,
            call_generation: 0,
            notices: Vec::new(),
        }
    }

    /// Read the persisted session and land in `Present` or `Absent`. A
    /// restored identity is trusted as-is; the store already enforced the
    /// maximum age.
    pub fn start(&mut self) {
        match self.store.load() {
            Some(user) => {
                tracing::info!(user = %user.id, "restored persisted session");
                self.session = SessionState::Present(user);
                self.select_tab(Tab::Contacts);
            }
            None => self.session = SessionState::Absent,
        }
    }

    pub fn root_view(&self) -> RootView {
        match (&self.session, &self.call) {
            (SessionState::Present(_), Some(_)) => RootView::Call,
            (SessionState::Present(_), None) => RootView::Main,
            _ => RootView::Auth,
        }
    }

    /// Notices accumulated since the last drain, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    fn user_id(&self) -> Option<UserId> {
        self.session.user().map(|u| u.id)
    }

    // -- Auth --

    pub fn login(&mut self, email: &str, password: &str) {
        if self.auth_busy {
            return;
        }
        let email = email.trim().to_string();
        if email.is_empty() || password.is_empty() {
            self.notice(NoticeLevel::Error, "Enter your email and password");
            return;
        }

        self.auth_busy = true;
        let auth = self.clients.auth.clone();
        let password = password.to_string();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = auth.login(&email, &password).await;
            let _ = tx.send(AppEvent::AuthFinished(result));
        });
    }

    pub fn register(&mut self, email: &str, password: &str, display_name: &str) {
        if self.auth_busy {
            return;
        }
        let email = email.trim().to_string();
        let display_name = display_name.trim().to_string();
        if email.is_empty() || password.is_empty() || display_name.is_empty() {
            self.notice(NoticeLevel::Error, "Fill in every field");
            return;
        }
        if !email.contains('@') {
            self.notice(NoticeLevel::Error, "That does not look like an email address");
            return;
        }
        // Input-layer gating only; the service never re-checks this.
        if password.chars().count() < MIN_PASSWORD_LEN {
            self.notice(
                NoticeLevel::Error,
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
            return;
        }

        self.auth_busy = true;
        let auth = self.clients.auth.clone();
        let password = password.to_string();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = auth.register(&email, &password, &display_name).await;
            let _ = tx.send(AppEvent::AuthFinished(result));
        });
    }

    /// The Google button exists but the integration does not.
    pub fn google_sign_in(&mut self) {
        self.notice(NoticeLevel::Info, "Google sign-in is not available yet");
    }

    pub fn logout(&mut self) {
        self.end_call();
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
        self.session = SessionState::Absent;
        self.tab = Tab::Contacts;
        self.auth_busy = false;
        self.contacts = ContactsView::default();
        self.inbox = RequestInbox::default();
        self.search = SearchSession::default();
        self.history = HistoryView::default();
    }

    // -- Tabbed views --

    /// Switch tabs. Entering a tab mounts its view, which fetches its list
    /// fresh; switching back is also how a manual reload works.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        match tab {
            Tab::Contacts => self.load_friends(),
            Tab::Requests => self.load_requests(),
            Tab::History => self.load_history(),
            // the search tab keeps its query and results until re-run
            Tab::Search => {}
        }
    }

    pub fn load_friends(&mut self) {
        let Some(user) = self.user_id() else { return };
        let generation = self.contacts.begin_load();
        let contacts = self.clients.contacts.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = contacts.friends(user).await;
            let _ = tx.send(AppEvent::FriendsLoaded { generation, result });
        });
    }

    pub fn load_requests(&mut self) {
        let Some(user) = self.user_id() else { return };
        let generation = self.inbox.list.begin_load();
        let contacts = self.clients.contacts.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = contacts.pending_requests(user).await;
            let _ = tx.send(AppEvent::RequestsLoaded { generation, result });
        });
    }

    pub fn load_history(&mut self) {
        let Some(user) = self.user_id() else { return };
        let generation = self.history.begin_load();
        let calls = self.clients.calls.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = calls.history(user).await;
            let _ = tx.send(AppEvent::HistoryLoaded { generation, result });
        });
    }

    /// Run a user search. Queries under the minimum length are rejected
    /// locally and never reach the network.
    pub fn run_search(&mut self, query: &str) {
        let Some(user) = self.user_id() else { return };
        let query = query.trim().to_string();
        if query.chars().count() < MIN_SEARCH_QUERY_LEN {
            self.notice(
                NoticeLevel::Error,
                format!("Enter at least {MIN_SEARCH_QUERY_LEN} characters"),
            );
            return;
        }

        self.search.query = query.clone();
        let generation = self.search.results.begin_load();
        let contacts = self.clients.contacts.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = contacts.search(user, &query).await;
            let _ = tx.send(AppEvent::SearchFinished { generation, result });
        });
    }

    pub fn send_friend_request(&mut self, target: UserId) {
        let Some(user) = self.user_id() else { return };
        if !self.search.mark_sending(target) {
            return;
        }
        let contacts = self.clients.contacts.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = contacts.send_request(user, target).await.map(|_| ());
            let _ = tx.send(AppEvent::RequestSent { target, result });
        });
    }

    pub fn accept_request(&mut self, id: RequestId) {
        let Some(user) = self.user_id() else { return };
        if !self.inbox.begin_action(id) {
            return;
        }
        let contacts = self.clients.contacts.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = contacts.accept_request(user, id).await;
            let _ = tx.send(AppEvent::RequestAccepted { id, result });
        });
    }

    pub fn reject_request(&mut self, id: RequestId) {
        let Some(user) = self.user_id() else { return };
        if !self.inbox.begin_action(id) {
            return;
        }
        let contacts = self.clients.contacts.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = contacts.reject_request(user, id).await;
            let _ = tx.send(AppEvent::RequestRejected { id, result });
        });
    }

    // -- Call lifecycle --

    /// Promote a contact into the exclusive call view and ask the service
    /// for a call id. The ring timer is armed only once the id arrives.
    pub fn start_call(&mut self, contact: Contact) {
        let Some(user) = self.user_id() else { return };
        if self.call.is_some() {
            return;
        }

        self.call_generation += 1;
        let generation = self.call_generation;
        let receiver = contact.id;
        self.call = Some(ActiveCall::new(contact, generation));

        let calls = self.clients.calls.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = calls.start_call(user, receiver).await;
            let _ = tx.send(AppEvent::CallIdAssigned { generation, result });
        });
    }

    /// Hang up from either phase. Timers are released immediately, the
    /// service is notified best-effort when an id exists, and the UI returns
    /// to browsing unconditionally.
    pub fn end_call(&mut self) {
        let Some(mut call) = self.call.take() else {
            return;
        };
        call.release_timers();

        if let (Some(user), Some(call_id)) = (self.user_id(), call.call_id) {
            let calls = self.clients.calls.clone();
            tokio::spawn(async move {
                if let Err(e) = calls.end_call(user, call_id).await {
                    tracing::error!(call = %call_id, error = %e, "failed to report call end");
                }
            });
        }
    }

    pub fn toggle_mute(&mut self) {
        if let Some(call) = &mut self.call {
            call.muted = !call.muted;
        }
    }

    pub fn toggle_video(&mut self) {
        if let Some(call) = &mut self.call {
            call.video_on = !call.video_on;
        }
    }

    // -- Event application --

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AuthFinished(result) => {
                self.auth_busy = false;
                match result {
                    Ok(user) => {
                        if let Err(e) = self.store.save(&user) {
                            tracing::warn!(error = %e, "failed to persist session");
                        }
                        self.notice(
                            NoticeLevel::Success,
                            format!("Welcome, {}", user.display_name),
                        );
                        self.session = SessionState::Present(user);
                        self.select_tab(Tab::Contacts);
                    }
                    Err(e) => self.notice(NoticeLevel::Error, e.to_string()),
                }
            }

            AppEvent::FriendsLoaded { generation, result } => match result {
                Ok(friends) => {
                    self.contacts.apply(generation, friends);
                }
                Err(e) => {
                    if self.contacts.fail(generation) {
                        self.notice(NoticeLevel::Error, format!("Could not load contacts: {e}"));
                    }
                }
            },

            AppEvent::RequestsLoaded { generation, result } => match result {
                Ok(requests) => {
                    self.inbox.list.apply(generation, requests);
                }
                Err(e) => {
                    if self.inbox.list.fail(generation) {
                        self.notice(NoticeLevel::Error, format!("Could not load requests: {e}"));
                    }
                }
            },

            AppEvent::SearchFinished { generation, result } => match result {
                Ok(results) => {
                    if self.search.results.apply(generation, results)
                        && self.search.results.items.is_empty()
                    {
                        self.notice(NoticeLevel::Info, "No one matched that search");
                    }
                }
                Err(e) => {
                    if self.search.results.fail(generation) {
                        self.notice(NoticeLevel::Error, format!("Search failed: {e}"));
                    }
                }
            },

            AppEvent::HistoryLoaded { generation, result } => match result {
                Ok(calls) => {
                    self.history.apply(generation, calls);
                }
                Err(e) => {
                    if self.history.fail(generation) {
                        self.notice(NoticeLevel::Error, format!("Could not load history: {e}"));
                    }
                }
            },

            AppEvent::RequestSent { target, result } => match result {
                Ok(()) => {
                    self.search.confirm_sent(target);
                    self.notice(NoticeLevel::Success, "Friend request sent");
                }
                Err(e) => {
                    self.search.send_failed(target);
                    self.notice(NoticeLevel::Error, format!("Could not send request: {e}"));
                }
            },

            AppEvent::RequestAccepted { id, result } => match result {
                Ok(()) => {
                    self.inbox.confirm_removal(id);
                    self.notice(NoticeLevel::Success, "Friend request accepted");
                    // the original flips back to contacts once a request is
                    // handled, which also remounts the friends list
                    self.select_tab(Tab::Contacts);
                }
                Err(e) => {
                    self.inbox.action_failed(id);
                    self.notice(NoticeLevel::Error, format!("Could not accept request: {e}"));
                }
            },

            AppEvent::RequestRejected { id, result } => match result {
                Ok(()) => {
                    self.inbox.confirm_removal(id);
                    self.notice(NoticeLevel::Info, "Friend request rejected");
                }
                Err(e) => {
                    self.inbox.action_failed(id);
                    self.notice(NoticeLevel::Error, format!("Could not reject request: {e}"));
                }
            },

            AppEvent::CallIdAssigned { generation, result } => {
                let Some(call) = self.call.as_mut().filter(|c| c.generation() == generation)
                else {
                    return;
                };
                match result {
                    Ok(started) => {
                        call.id_assigned(started.id, self.timings, self.tx.clone());
                    }
                    // call-lifecycle failures are logged, never toasted; the
                    // session keeps ringing until the user hangs up
                    Err(e) => tracing::error!(error = %e, "failed to start call"),
                }
            }

            AppEvent::CallConnected { generation } => {
                if let Some(call) = self.call.as_mut().filter(|c| c.generation() == generation) {
                    call.connect(self.timings, self.tx.clone());
                }
            }

            AppEvent::CallTick { generation } => {
                if let Some(call) = self.call.as_mut().filter(|c| c.generation() == generation) {
                    call.tick();
                }
            }
        }
    }
}
