//! Live-session polling with backoff and connectivity awareness.
//!
//! The poller fetches immediately on start, then keeps exactly one pending
//! refresh (a delay timer plus a 1 Hz countdown). A fetch leaves the pending
//! pair running; only the scheduling pass after it swaps in a new pair.
//! Stopping or dropping the poller leaves no timers.
//! Overlapping fetches are not sequenced: whichever resolves last wins.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use chrono::Utc;
use gre_core::GreError;
use gre_core::api::DashboardApi;
use gre_core::auth::SessionStore;
use gre_core::filter::search;
use gre_core::polling::{FailureClass, OFFLINE_MESSAGE, PollPhase, PollSnapshot, RefreshPolicy};
use gre_core::session::ActiveSession;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, interval_at, sleep};
use tokio_util::sync::CancellationToken;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Connectivity transitions reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

/// Cancels its timer pair when replaced or dropped.
struct ScheduleHandle {
    token: CancellationToken,
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

struct PollerInner {
    api: Arc<dyn DashboardApi>,
    session: Arc<SessionStore>,
    policy: RefreshPolicy,
    state: watch::Sender<PollSnapshot>,
    schedule: Mutex<Option<ScheduleHandle>>,
    shutdown: CancellationToken,
}

/// Keeps the active-session list fresh.
///
/// Spawned tasks hold only weak references, so dropping the poller stops it.
pub struct ActiveSessionPoller {
    inner: Arc<PollerInner>,
}

impl ActiveSessionPoller {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        session: Arc<SessionStore>,
        policy: RefreshPolicy,
    ) -> Self {
        let (state, _) = watch::channel(PollSnapshot::default());
        Self {
            inner: Arc::new(PollerInner {
                api,
                session,
                policy,
                state,
                schedule: Mutex::new(None),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Initial foreground load; schedules the next refresh.
    pub async fn start(&self) {
        tracing::info!(
            base_secs = self.inner.policy.base_interval.as_secs(),
            "Starting active-session polling"
        );
        self.inner.fetch(true).await;
    }

    /// Manual refresh: forgets past failures and reloads in the foreground.
    ///
    /// The pending background refresh and countdown keep running until the
    /// fetch resolves.
    pub async fn refresh_now(&self) {
        self.inner.update(|s| s.failures = 0);
        self.inner.fetch(true).await;
    }

    /// Connection restored: clears the banner and reloads in the background.
    pub async fn on_online(&self) {
        self.inner.go_online().await;
    }

    /// Connection lost: shows the offline banner and slows refreshes down.
    pub fn on_offline(&self) {
        self.inner.go_offline();
    }

    /// Applies a search to the current list immediately.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.inner.update(|s| {
            s.filtered = search(&s.sessions, &term);
            s.search_term = term;
        });
    }

    /// Feeds connectivity events from `events` until the poller stops.
    pub fn watch_connectivity(&self, mut events: mpsc::Receiver<Connectivity>) {
        let weak = Arc::downgrade(&self.inner);
        let shutdown = self.inner.shutdown.clone();

        tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    _ = shutdown.cancelled() => break,
                    event = events.recv() => match event {
                        Some(event) => event,
                        None => break,
                    },
                };
                let Some(inner) = weak.upgrade() else { break };
                match event {
                    Connectivity::Online => inner.go_online().await,
                    Connectivity::Offline => inner.go_offline(),
                }
            }
            tracing::debug!("Connectivity listener finished");
        });
    }

    pub fn snapshot(&self) -> PollSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.inner.state.subscribe()
    }

    /// True while a refresh timer pair is armed.
    pub fn has_pending_refresh(&self) -> bool {
        self.inner
            .lock_schedule()
            .as_ref()
            .is_some_and(|handle| !handle.token.is_cancelled())
    }

    /// Cancels every timer and listener; later fetch results are discarded.
    pub fn stop(&self) {
        self.inner.stop();
    }
}

impl Drop for ActiveSessionPoller {
    fn drop(&mut self) {
        self.inner.stop();
    }
}

impl PollerInner {
    fn update(&self, f: impl FnOnce(&mut PollSnapshot)) {
        self.state.send_modify(f);
    }

    fn lock_schedule(&self) -> std::sync::MutexGuard<'_, Option<ScheduleHandle>> {
        self.schedule.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel_schedule(&self) {
        self.lock_schedule().take();
    }

    fn stop(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.shutdown.cancel();
        self.cancel_schedule();
        self.update(|s| {
            s.phase = PollPhase::Stopped;
            s.countdown_secs = 0;
        });
        tracing::info!("Stopped active-session polling");
    }

    async fn go_online(self: &Arc<Self>) {
        tracing::info!("Connection restored");
        self.update(|s| {
            s.online = true;
            s.error = None;
        });
        self.fetch(false).await;
    }

    fn go_offline(self: &Arc<Self>) {
        tracing::warn!("Connection lost");
        self.update(|s| {
            s.online = false;
            s.error = Some(OFFLINE_MESSAGE.to_string());
        });
        self.schedule_next();
    }

    async fn fetch(self: &Arc<Self>, foreground: bool) {
        if self.shutdown.is_cancelled() {
            return;
        }
        // The pending pair keeps running until schedule_next swaps it.
        self.update(|s| s.phase = PollPhase::Fetching { foreground });
        tracing::debug!(foreground, "Fetching active sessions");

        let token = self.session.token();
        let result = self.api.fetch_active_sessions(token.as_deref()).await;

        if self.shutdown.is_cancelled() {
            tracing::debug!("Poller stopped during fetch; result discarded");
            return;
        }

        match result {
            Ok(sessions) => self.record_success(sessions),
            Err(e) => self.record_failure(&e),
        }
        self.schedule_next();
    }

    fn record_success(&self, sessions: Vec<ActiveSession>) {
        tracing::debug!(count = sessions.len(), "Active sessions refreshed");
        self.update(|s| {
            s.failures = 0;
            s.online = true;
            s.error = None;
            s.last_failure = None;
            s.last_updated = Some(Utc::now());
            s.filtered = search(&sessions, &s.search_term);
            s.sessions = sessions;
        });
    }

    fn record_failure(&self, err: &GreError) {
        let class = FailureClass::from(err);
        let mut failures = 0;
        self.update(|s| {
            s.failures = s.failures.saturating_add(1);
            s.last_failure = Some(class);
            s.error = Some(err.to_string());
            if class == FailureClass::Network {
                s.online = false;
            }
            failures = s.failures;
        });
        tracing::error!(failures, failure = ?class, error = %err, "Active-session refresh failed");
    }

    /// Arms the next refresh, replacing any pending one.
    fn schedule_next(self: &Arc<Self>) {
        if self.shutdown.is_cancelled() {
            return;
        }

        let mut delay = Duration::ZERO;
        self.update(|s| {
            delay = self.policy.next_delay(s.failures, s.online);
            s.phase = PollPhase::Scheduled;
            s.countdown_secs = delay.as_secs();
        });
        tracing::debug!(delay_secs = delay.as_secs(), "Next refresh scheduled");

        let token = self.shutdown.child_token();
        self.spawn_refresh(delay, token.clone());
        self.spawn_countdown(delay, token.clone());

        // Dropping the previous handle cancels its pair.
        let previous = self.lock_schedule().replace(ScheduleHandle { token });
        drop(previous);
    }

    fn spawn_refresh(self: &Arc<Self>, delay: Duration, token: CancellationToken) {
        let weak: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = sleep(delay) => {
                    if let Some(inner) = weak.upgrade() {
                        inner.fetch(false).await;
                    }
                }
            }
        });
    }

    fn spawn_countdown(self: &Arc<Self>, delay: Duration, token: CancellationToken) {
        let weak: Weak<Self> = Arc::downgrade(self);
        let reset_to = delay.as_secs();
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + COUNTDOWN_TICK, COUNTDOWN_TICK);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(inner) = weak.upgrade() else { break };
                        inner.update(|s| {
                            s.countdown_secs = if s.countdown_secs <= 1 {
                                reset_to
                            } else {
                                s.countdown_secs - 1
                            };
                        });
                    }
                }
            }
        });
    }
}
