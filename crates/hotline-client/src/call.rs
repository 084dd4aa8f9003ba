//! Call session state machine.
//!
//! `Idle → Calling → Connected → Idle`, where `Idle` is the absence of an
//! [`ActiveCall`]. Entering `Calling` asks the calls service for a call id;
//! the simulated 2-second ring timer is armed only once that id arrives, so
//! `Connected` is unreachable without a server-assigned [`CallId`]. There is
//! no media transport behind any of this; the call is a UI lifecycle plus a
//! bookkeeping row on the service.
//!
//! Both timers are spawned tokio tasks whose handles the session owns.
//! Dropping the session aborts them, so every exit transition (hang-up,
//! logout, shutdown) releases the recurring tick deterministically.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use hotline_shared::{CallId, Contact};

use crate::events::AppEvent;

/// Timer intervals, injectable so tests can run the machine fast.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// Ring time before a call with an assigned id flips to connected.
    pub connect_delay: Duration,
    /// Duration-counter tick while connected.
    pub tick_interval: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            connect_delay: Duration::from_secs(
                hotline_shared::constants::CONNECT_DELAY_SECS,
            ),
            tick_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// Ringing; no duration yet. May or may not hold a call id.
    Calling,
    /// Simulated connection established; duration ticks once a second.
    Connected,
}

/// One in-progress call, exclusively owning its timers.
pub struct ActiveCall {
    pub contact: Contact,
    pub phase: CallPhase,
    pub call_id: Option<CallId>,
    pub duration_secs: u64,
    /// Local toggle, shown on the call screen, never transmitted.
    pub muted: bool,
    /// Local toggle, shown on the call screen, never transmitted.
    pub video_on: bool,

    /// Distinguishes this session's events from a previous session's.
    generation: u64,
    connect_timer: Option<JoinHandle<()>>,
    ticker: Option<JoinHandle<()>>,
}

impl ActiveCall {
    pub fn new(contact: Contact, generation: u64) -> Self {
        Self {
            contact,
            phase: CallPhase::Calling,
            call_id: None,
            duration_secs: 0,
            muted: false,
            video_on: true,
            generation,
            connect_timer: None,
            ticker: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record the server-assigned id and arm the ring timer. No-op if the
    /// session already left `Calling`.
    pub fn id_assigned(&mut self, id: CallId, timings: Timings, tx: UnboundedSender<AppEvent>) {
        if self.phase != CallPhase::Calling || self.call_id.is_some() {
            return;
        }
        self.call_id = Some(id);

        let generation = self.generation;
        let deadline = tokio::time::Instant::now() + timings.connect_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(AppEvent::CallConnected { generation });
        });
        self.connect_timer = Some(handle);
    }

    /// Flip to `Connected` and start the per-second duration tick. Ignored
    /// unless the session is `Calling` with an assigned id.
    pub fn connect(&mut self, timings: Timings, tx: UnboundedSender<AppEvent>) {
        if self.phase != CallPhase::Calling || self.call_id.is_none() {
            return;
        }
        self.phase = CallPhase::Connected;

        if let Some(timer) = self.connect_timer.take() {
            timer.abort();
        }

        let generation = self.generation;
        let mut interval = tokio::time::interval(timings.tick_interval);
        let handle = tokio::spawn(async move {
            // the first tick of a tokio interval fires immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(AppEvent::CallTick { generation }).is_err() {
                    break;
                }
            }
        });
        self.ticker = Some(handle);
    }

    /// Apply one second of connected time.
    pub fn tick(&mut self) {
        if self.phase == CallPhase::Connected {
            self.duration_secs += 1;
        }
    }

    /// Abort both timers. Also runs on drop.
    pub fn release_timers(&mut self) {
        if let Some(timer) = self.connect_timer.take() {
            timer.abort();
        }
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for ActiveCall {
    fn drop(&mut self) {
        self.release_timers();
    }
}

impl std::fmt::Debug for ActiveCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveCall")
            .field("contact", &self.contact.id)
            .field("phase", &self.phase)
            .field("call_id", &self.call_id)
            .field("duration_secs", &self.duration_secs)
            .finish()
    }
}
