use super::audit::OverrideAuditLog;
use super::record::{OverrideAction, SessionPhase, SessionRecord, SessionStatus};
use crate::clock::Clock;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Timeout policy for a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionTimeouts {
    /// Soft timeout: elapsed inactivity after which the session expires.
    pub timeout: Duration,
    /// Warning window before the timeout (must be shorter than `timeout`).
    pub warning: Duration,
}

impl Default for SessionTimeouts {
    fn default() -> Self {
        Self {
            timeout: Duration::minutes(120),
            warning: Duration::minutes(10),
        }
    }
}

/// Why a session was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearReason {
    /// User asked for their data to be wiped.
    UserRequested,
    /// The inactivity timeout elapsed.
    Expired,
    /// The application is shutting down (best-effort close hook).
    Shutdown,
}

/// Events published to session subscribers.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Touched,
    Extended { minutes: i64 },
    OverrideStored { speaker_id: String },
    Cleared { reason: ClearReason, new_session_id: String },
    Tick(SessionStatus),
}

/// Handle returned by [`SessionLifecycleManager::subscribe`]; pass it back
/// to `unsubscribe` when the consuming component goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

type Listener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Owns session identity, activity timestamps, timeout state, and the
/// override audit log.
///
/// The state machine runs over elapsed time since `last_activity`, with
/// timeout `T` (plus accumulated extensions) and warning window `W`:
/// Active while elapsed < T − W, Warning in [T − W, T), Expired at ≥ T.
/// Expiry is enforced only by [`enforce_expiry`](Self::enforce_expiry),
/// which the periodic ticker calls; every predicate here is pure.
///
/// Constructed once per application instance and passed where needed; a
/// fresh session identity is minted only by `clear`.
pub struct SessionLifecycleManager {
    timeouts: SessionTimeouts,
    clock: Arc<dyn Clock>,
    record: SessionRecord,
    listeners: HashMap<u64, Listener>,
    next_token: u64,
}

impl SessionLifecycleManager {
    /// Initialize a session: mint an unguessable id and an empty record.
    pub fn new(timeouts: SessionTimeouts, clock: Arc<dyn Clock>) -> Self {
        let record = SessionRecord::new(clock.now());
        info!(session_id = %record.session_id, "session initialized");

        Self {
            timeouts,
            clock,
            record,
            listeners: HashMap::new(),
            next_token: 0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.record.session_id
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// Reset `last_activity` to now. Invoked on every mutating user action.
    pub fn touch(&mut self) {
        self.record.last_activity = self.clock.now();
        self.notify(&SessionEvent::Touched);
    }

    /// Add minutes to the effective timeout. The accumulated counter only
    /// grows; non-positive values are rejected so an extension can never
    /// shorten the timeout, and `session_started` and `last_activity` are
    /// never rewound.
    pub fn extend(&mut self, minutes: i64) {
        if minutes <= 0 {
            warn!(minutes, "ignoring non-positive session extension");
            return;
        }

        self.record.session_extensions += minutes;
        info!(
            minutes,
            total = self.record.session_extensions,
            "session extended"
        );
        self.notify(&SessionEvent::Extended { minutes });
    }

    /// Effective timeout: configured timeout plus accumulated extensions.
    fn effective_timeout(&self) -> Duration {
        self.timeouts.timeout + Duration::minutes(self.record.session_extensions)
    }

    fn phase(&self) -> SessionPhase {
        let elapsed = self.clock.now() - self.record.last_activity;
        let timeout = self.effective_timeout();

        if elapsed >= timeout {
            SessionPhase::Expired
        } else if elapsed >= timeout - self.timeouts.warning {
            SessionPhase::Warning
        } else {
            SessionPhase::Active
        }
    }

    /// Pure projection of the current session status. No side effects.
    pub fn status(&self) -> SessionStatus {
        let phase = self.phase();
        let duration = self.clock.now() - self.record.session_started;
        let data_size_bytes = serde_json::to_vec(&self.record).map_or(0, |v| v.len());

        SessionStatus {
            session_id: self.record.session_id.clone(),
            is_active: phase != SessionPhase::Expired,
            phase,
            session_duration_secs: duration.num_seconds(),
            data_size_bytes,
            has_overrides: !self.record.overrides.is_empty(),
            override_count: self.record.overrides.len(),
        }
    }

    /// Whether the session is inside its warning window.
    pub fn should_warn(&self) -> bool {
        self.phase() == SessionPhase::Warning
    }

    /// Pure expiry predicate. Never clears; that is `enforce_expiry`'s job.
    pub fn is_expired_now(&self) -> bool {
        self.phase() == SessionPhase::Expired
    }

    /// Clear the session if it has expired. Returns true when a clear
    /// happened. Called by the periodic ticker, never by queries.
    pub fn enforce_expiry(&mut self) -> bool {
        if !self.is_expired_now() {
            return false;
        }

        warn!(session_id = %self.record.session_id, "session expired, clearing");
        self.clear(ClearReason::Expired);
        true
    }

    /// Wipe the record, mint a new session identity, and notify
    /// subscribers so dependent stores reset.
    pub fn clear(&mut self, reason: ClearReason) {
        let old_id = std::mem::replace(&mut self.record, SessionRecord::new(self.clock.now()))
            .session_id;

        info!(
            old_session_id = %old_id,
            new_session_id = %self.record.session_id,
            ?reason,
            "session cleared"
        );

        self.notify(&SessionEvent::Cleared {
            reason,
            new_session_id: self.record.session_id.clone(),
        });
    }

    /// Record an override action for a speaker (last-write-wins slot),
    /// refresh activity, and notify subscribers.
    pub fn store_override(&mut self, speaker_id: &str, action: OverrideAction) {
        self.record.overrides.record(speaker_id, action);
        self.record.last_activity = self.clock.now();

        debug!(speaker_id, "override stored");
        self.notify(&SessionEvent::OverrideStored {
            speaker_id: speaker_id.to_string(),
        });
    }

    /// Record a revert for a speaker, if an action exists to revert.
    /// Returns false when the speaker has no recorded action.
    pub fn revert_override(&mut self, speaker_id: &str) -> bool {
        let Some(prior) = self.record.overrides.get(speaker_id).cloned() else {
            return false;
        };

        let revert = OverrideAction::revert_of(&prior, self.clock.now());
        self.store_override(speaker_id, revert);
        true
    }

    /// The full override map with materialized timestamps.
    pub fn overrides(&self) -> &OverrideAuditLog {
        &self.record.overrides
    }

    /// Register a listener; it is invoked on every state-affecting
    /// operation. Keep the token and unsubscribe when done.
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> SubscriptionToken {
        self.next_token += 1;
        let token = SubscriptionToken(self.next_token);
        self.listeners.insert(token.0, Box::new(listener));
        token
    }

    /// Remove a listener. Returns false if the token was already gone.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        self.listeners.remove(&token.0).is_some()
    }

    /// Publish the current status to subscribers. Called by the ticker.
    pub fn publish_tick(&self) {
        self.notify(&SessionEvent::Tick(self.status()));
    }

    fn notify(&self, event: &SessionEvent) {
        for listener in self.listeners.values() {
            listener(event);
        }
    }
}
