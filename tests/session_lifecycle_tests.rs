// Tests for the session lifecycle state machine
//
// Expiry is a function of simulated elapsed time, so every test drives a
// ManualClock instead of sleeping. Default policy: 120 minute timeout,
// 10 minute warning window.

use chrono::{Duration, TimeZone, Utc};
use speaker_sessions::{
    ClearReason, Clock, ManualClock, OverrideAction, OverrideKind, SessionEvent,
    SessionLifecycleManager, SessionPhase, SessionTimeouts, SpeakerMappingStore,
};
use std::sync::{Arc, Mutex};

fn start_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
}

fn manager(clock: &ManualClock) -> SessionLifecycleManager {
    SessionLifecycleManager::new(SessionTimeouts::default(), Arc::new(clock.clone()))
}

#[test]
fn test_fresh_session_is_active() {
    let clock = start_clock();
    let mgr = manager(&clock);

    let status = mgr.status();
    assert!(status.is_active);
    assert_eq!(status.phase, SessionPhase::Active);
    assert!(!status.has_overrides);
    assert_eq!(status.override_count, 0);
    assert!(status.data_size_bytes > 0);
}

#[test]
fn test_touch_is_idempotent_under_frozen_time() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    for _ in 0..10 {
        mgr.touch();
        assert!(!mgr.is_expired_now());
    }

    // Only elapsed wall-clock time changes expiry.
    clock.advance(Duration::minutes(120));
    assert!(mgr.is_expired_now());
}

#[test]
fn test_warning_window_before_expiry() {
    let clock = start_clock();
    let mgr = manager(&clock);

    clock.advance(Duration::minutes(109));
    assert!(!mgr.should_warn());

    clock.advance(Duration::minutes(1));
    assert!(mgr.should_warn(), "warning starts at timeout - warning window");
    assert!(!mgr.is_expired_now());

    clock.advance(Duration::minutes(10));
    assert!(mgr.is_expired_now());
    assert!(!mgr.should_warn(), "expired is past warning");
}

#[test]
fn test_expiry_after_120_idle_minutes() {
    let clock = start_clock();
    let mgr = manager(&clock);

    clock.advance(Duration::minutes(119));
    assert!(!mgr.is_expired_now());

    clock.advance(Duration::minutes(1));
    assert!(mgr.is_expired_now());
    assert!(!mgr.status().is_active);
}

#[test]
fn test_touch_defers_expiry() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    clock.advance(Duration::minutes(100));
    mgr.touch();
    clock.advance(Duration::minutes(100));

    assert!(!mgr.is_expired_now(), "activity 100 minutes ago, not expired");
}

#[test]
fn test_is_expired_now_has_no_side_effects() {
    let clock = start_clock();
    let mgr = manager(&clock);
    let original_id = mgr.session_id().to_string();

    clock.advance(Duration::minutes(500));

    assert!(mgr.is_expired_now());
    assert!(mgr.is_expired_now());
    assert_eq!(mgr.session_id(), original_id, "query must never clear");
}

#[test]
fn test_enforce_expiry_clears_and_mints_new_identity() {
    let clock = start_clock();
    let mut mgr = manager(&clock);
    let original_id = mgr.session_id().to_string();

    mgr.store_override(
        "S1",
        OverrideAction::override_of("Speaker 1", "Bob", "name", clock.now()),
    );

    clock.advance(Duration::minutes(121));

    assert!(mgr.enforce_expiry());
    assert_ne!(mgr.session_id(), original_id);
    assert!(mgr.overrides().is_empty());
    assert!(!mgr.is_expired_now(), "fresh session starts active");
}

#[test]
fn test_enforce_expiry_noop_while_active() {
    let clock = start_clock();
    let mut mgr = manager(&clock);
    let original_id = mgr.session_id().to_string();

    assert!(!mgr.enforce_expiry());
    assert_eq!(mgr.session_id(), original_id);
}

#[test]
fn test_extend_raises_threshold_without_rewinding_start() {
    let clock = start_clock();
    let mut mgr = manager(&clock);
    let started = mgr.record().session_started;

    mgr.extend(30);

    clock.advance(Duration::minutes(125));
    assert!(!mgr.is_expired_now(), "effective timeout is now 150 minutes");

    clock.advance(Duration::minutes(25));
    assert!(mgr.is_expired_now());

    assert_eq!(mgr.record().session_started, started);
    assert_eq!(mgr.record().session_extensions, 30);
}

#[test]
fn test_non_positive_extension_rejected() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    mgr.extend(-200);
    mgr.extend(0);

    assert_eq!(mgr.record().session_extensions, 0);

    // The effective timeout is still the configured 120 minutes.
    clock.advance(Duration::minutes(119));
    assert!(!mgr.is_expired_now());
    clock.advance(Duration::minutes(1));
    assert!(mgr.is_expired_now());
}

#[test]
fn test_extensions_accumulate() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    mgr.extend(30);
    mgr.extend(15);

    assert_eq!(mgr.record().session_extensions, 45);
}

#[test]
fn test_override_round_trip_preserves_timestamp() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    let at = clock.now();
    mgr.store_override("S1", OverrideAction::override_of("Speaker 1", "Bob", "name", at));

    let stored = mgr.overrides().get("S1").expect("entry for S1");
    assert_eq!(stored.timestamp, at, "timestamp survives as a time value");
    assert_eq!(stored.action, OverrideKind::Override);
    assert_eq!(stored.original_value, "Speaker 1");
    assert_eq!(stored.new_value, "Bob");
}

#[test]
fn test_override_slot_is_last_write_wins() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    mgr.store_override("S1", OverrideAction::override_of("Speaker 1", "Bob", "name", clock.now()));
    clock.advance(Duration::minutes(1));
    mgr.store_override("S1", OverrideAction::override_of("Bob", "Carol", "name", clock.now()));

    assert_eq!(mgr.overrides().len(), 1, "one slot per speaker");
    assert_eq!(mgr.overrides().get("S1").unwrap().new_value, "Carol");
}

#[test]
fn test_revert_records_new_action_not_erasure() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    mgr.store_override("S1", OverrideAction::override_of("Speaker 1", "Bob", "name", clock.now()));
    clock.advance(Duration::minutes(2));

    assert!(mgr.revert_override("S1"));

    let entry = mgr.overrides().get("S1").expect("revert entry remains");
    assert_eq!(entry.action, OverrideKind::Revert);
    assert_eq!(entry.original_value, "Speaker 1");
    assert_eq!(entry.new_value, "Speaker 1", "restored to the original label");
    assert_eq!(entry.timestamp, clock.now());
}

#[test]
fn test_revert_without_prior_action() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    assert!(!mgr.revert_override("S9"));
    assert!(mgr.overrides().is_empty());
}

#[test]
fn test_store_override_refreshes_activity() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    clock.advance(Duration::minutes(119));
    mgr.store_override("S1", OverrideAction::override_of("Speaker 1", "Bob", "name", clock.now()));

    clock.advance(Duration::minutes(2));
    assert!(!mgr.is_expired_now(), "override counted as activity");
}

#[test]
fn test_status_reflects_overrides() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    mgr.store_override("S1", OverrideAction::override_of("Speaker 1", "Bob", "name", clock.now()));
    mgr.store_override("S2", OverrideAction::override_of("Speaker 2", "Carol", "name", clock.now()));

    let status = mgr.status();
    assert!(status.has_overrides);
    assert_eq!(status.override_count, 2);
}

#[test]
fn test_session_duration_tracks_start_not_activity() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    clock.advance(Duration::minutes(30));
    mgr.touch();
    clock.advance(Duration::minutes(30));

    assert_eq!(mgr.status().session_duration_secs, 3600);
}

#[test]
fn test_subscribers_observe_lifecycle_events() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let token = mgr.subscribe(move |event| {
        let label = match event {
            SessionEvent::Touched => "touched",
            SessionEvent::Extended { .. } => "extended",
            SessionEvent::OverrideStored { .. } => "override",
            SessionEvent::Cleared { .. } => "cleared",
            SessionEvent::Tick(_) => "tick",
        };
        sink.lock().unwrap().push(label.to_string());
    });

    mgr.touch();
    mgr.extend(10);
    mgr.store_override("S1", OverrideAction::override_of("Speaker 1", "Bob", "name", clock.now()));
    mgr.publish_tick();
    mgr.clear(ClearReason::UserRequested);

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["touched", "extended", "override", "tick", "cleared"]
    );

    // After unsubscribing nothing more is delivered.
    assert!(mgr.unsubscribe(token));
    mgr.touch();
    assert_eq!(seen.lock().unwrap().len(), 5);
}

#[test]
fn test_unsubscribe_unknown_token() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    let token = mgr.subscribe(|_| {});
    assert!(mgr.unsubscribe(token));
    assert!(!mgr.unsubscribe(token));
}

#[test]
fn test_clear_resets_dependent_store_via_event() {
    let clock = start_clock();
    let mut mgr = manager(&clock);

    let store = Arc::new(Mutex::new(SpeakerMappingStore::new()));
    {
        let mut s = store.lock().unwrap();
        s.initialize("t1", vec!["S1".to_string()], Vec::new());
        s.add("S1", "Alice", None);
    }

    let wired = Arc::clone(&store);
    mgr.subscribe(move |event| {
        if let SessionEvent::Cleared { .. } = event {
            wired.lock().unwrap().reset();
        }
    });

    mgr.clear(ClearReason::UserRequested);

    assert_eq!(store.lock().unwrap().mapped_count(), 0);
    assert!(store.lock().unwrap().transcription_id().is_none());
}

#[test]
fn test_cleared_event_carries_new_session_id() {
    let clock = start_clock();
    let mut mgr = manager(&clock);
    let original_id = mgr.session_id().to_string();

    let observed: Arc<Mutex<Option<(ClearReason, String)>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&observed);
    mgr.subscribe(move |event| {
        if let SessionEvent::Cleared { reason, new_session_id } = event {
            *sink.lock().unwrap() = Some((*reason, new_session_id.clone()));
        }
    });

    mgr.clear(ClearReason::UserRequested);

    let (reason, new_id) = observed.lock().unwrap().clone().expect("cleared event");
    assert_eq!(reason, ClearReason::UserRequested);
    assert_ne!(new_id, original_id);
    assert_eq!(new_id, mgr.session_id());
}

#[test]
fn test_session_record_wire_shape() {
    let clock = start_clock();
    let mut mgr = manager(&clock);
    mgr.store_override("S1", OverrideAction::override_of("Speaker 1", "Bob", "name", clock.now()));

    let json = serde_json::to_value(mgr.record()).unwrap();

    assert!(json.get("sessionId").is_some());
    assert!(json.get("sessionStarted").is_some());
    assert!(json.get("lastActivity").is_some());
    assert!(json.get("sessionExtensions").is_some());
    let entry = &json["overrides"]["S1"];
    assert_eq!(entry["action"], "Override");
    assert_eq!(entry["originalValue"], "Speaker 1");
    assert_eq!(entry["newValue"], "Bob");
    assert_eq!(entry["fieldModified"], "name");
    assert!(entry.get("timestamp").is_some());
}
