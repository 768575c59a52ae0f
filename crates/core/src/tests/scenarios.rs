use crate::broadcast::SessionBroadcast;
use crate::config::SessionConfig;
use crate::effect::SessionEvent;
use crate::error::SessionError;
use crate::idle::IdlePhase;
use crate::logout::run_forced_logout;
use crate::testing::{RecordingBackend, SimulatedRuntime};
use crate::types::{LogoutReason, Session};

fn signed_in() -> SimulatedRuntime {
    let mut runtime = SimulatedRuntime::with_token(SessionConfig::default(), "tok");
    runtime.mount();
    assert_eq!(runtime.view().access_token, "tok");
    runtime
}

#[test]
fn clicks_before_deadline_leave_one_pending_timeout() {
    let mut runtime = signed_in();
    for _ in 0..25 {
        runtime.advance_secs(30);
        runtime.click();
    }

    assert_eq!(runtime.pending_idle_timeouts(), 1);
    assert_eq!(runtime.pending_countdowns(), 0);
    assert_eq!(runtime.supervisor().idle().phase(), IdlePhase::Active);
}

#[test]
fn idle_threshold_enters_warning_once() {
    let mut runtime = signed_in();
    runtime.advance_mins(28);
    assert!(!runtime.view().idle.dialog_visible);

    runtime.advance_mins(1);
    let view = runtime.view();
    assert!(view.idle.dialog_visible);
    assert_eq!(view.idle.seconds_remaining, 10);
    assert_eq!(runtime.pending_countdowns(), 1);
    assert_eq!(runtime.pending_idle_timeouts(), 0);

    runtime.advance_secs(5);
    assert_eq!(runtime.view().idle.seconds_remaining, 5);
    assert_eq!(runtime.pending_countdowns(), 1);
}

#[test]
fn clicks_during_warning_do_not_reset_countdown() {
    let mut runtime = signed_in();
    runtime.advance_mins(29);
    runtime.advance_secs(3);
    runtime.click();

    assert_eq!(runtime.view().idle.seconds_remaining, 7);
    assert_eq!(runtime.pending_idle_timeouts(), 0);
}

#[test]
fn extend_resets_from_every_remaining_value() {
    for elapsed in 0..=10 {
        let mut runtime = signed_in();
        runtime.advance_mins(29);
        runtime.advance_secs(elapsed);
        assert!(runtime.view().idle.dialog_visible);

        runtime.send(SessionEvent::Extend);

        assert!(!runtime.view().idle.dialog_visible);
        assert_eq!(runtime.pending_countdowns(), 0);
        assert_eq!(runtime.pending_idle_timeouts(), 1);
        assert!(runtime.logouts().is_empty());
    }
}

#[test]
fn extend_then_idle_again_reenters_warning() {
    let mut runtime = signed_in();
    runtime.advance_mins(29);
    runtime.advance_secs(6);
    assert_eq!(runtime.view().idle.seconds_remaining, 4);

    runtime.send(SessionEvent::Extend);
    assert!(!runtime.view().idle.dialog_visible);

    runtime.advance_mins(28);
    assert!(!runtime.view().idle.dialog_visible);
    runtime.advance_mins(1);
    assert!(runtime.view().idle.dialog_visible);
    assert_eq!(runtime.view().idle.seconds_remaining, 10);
}

#[test]
fn click_at_28_minutes_keeps_dialog_hidden_at_56() {
    let mut runtime = signed_in();
    runtime.advance_mins(28);
    runtime.click();
    runtime.advance_mins(28);

    assert!(!runtime.view().idle.dialog_visible);
    assert!(runtime.logouts().is_empty());

    runtime.advance_mins(1);
    assert!(runtime.view().idle.dialog_visible);
}

#[test]
fn expiry_fires_once_after_zero_is_shown() {
    let mut runtime = signed_in();
    runtime.advance_mins(29);
    runtime.advance_secs(10);

    assert_eq!(runtime.view().idle.seconds_remaining, 0);
    assert!(runtime.view().idle.dialog_visible);
    assert!(runtime.logouts().is_empty());

    runtime.advance_secs(1);
    assert_eq!(runtime.logouts().len(), 1);

    runtime.advance_mins(60);
    assert_eq!(runtime.logouts().len(), 1);
    assert_eq!(runtime.pending_timers(), 0);
    assert!(!runtime.listener_attached());
}

#[test]
fn expiry_without_grace_fires_at_zero() {
    let config = SessionConfig {
        zero_grace: false,
        ..SessionConfig::default()
    };
    let mut runtime = SimulatedRuntime::with_token(config, "tok");
    runtime.mount();
    runtime.advance_mins(29);
    runtime.advance_secs(9);
    assert!(runtime.logouts().is_empty());

    runtime.advance_secs(1);
    assert_eq!(runtime.logouts().len(), 1);
}

#[tokio::test]
async fn idle_expiry_signs_out_and_redirects_home() {
    let mut runtime = signed_in();
    runtime.advance_mins(29);
    assert_eq!(runtime.view().idle.seconds_remaining, 10);
    runtime.advance_secs(11);

    let [plan] = runtime.logouts() else {
        panic!("expected exactly one logout, got {:?}", runtime.logouts());
    };
    assert_eq!(plan.reason, LogoutReason::IdleExpired);
    assert_eq!(plan.bearer.as_deref(), Some("tok"));
    assert_eq!(runtime.customer_cleared(), 1);
    assert_eq!(runtime.view().access_token, "");

    let backend = RecordingBackend::new();
    run_forced_logout(&backend, &backend, plan).await;
    assert_eq!(backend.api_calls(), 1);
    assert_eq!(backend.redirects_to("/"), 1);
    assert_eq!(backend.calls(), vec!["api:tok", "provider:/"]);
}

#[test]
fn failed_poll_forces_logout_for_any_prior_token() {
    for failure in [
        Ok(None),
        Ok(Some(Session::default())),
        Err(SessionError::provider_unavailable("503")),
    ] {
        let mut failure = Some(failure);
        let mut runtime = SimulatedRuntime::scripted(SessionConfig::default(), move |n| {
            if n == 1 {
                Ok(Some(Session::with_token("first")))
            } else {
                failure.take().unwrap_or(Ok(None))
            }
        });
        runtime.mount();
        assert_eq!(runtime.view().access_token, "first");

        runtime.advance_mins(29);

        assert_eq!(runtime.view().access_token, "");
        assert_eq!(runtime.logouts().len(), 1);
        assert_eq!(runtime.logouts()[0].bearer, None);
        assert_eq!(runtime.logouts()[0].callback_url, "/");
        assert_eq!(runtime.customer_cleared(), 1);
        assert_eq!(runtime.pending_timers(), 0);
        assert!(!runtime.listener_attached());
    }
}

#[test]
fn no_session_on_mount_logs_out_immediately() {
    let mut runtime = SimulatedRuntime::scripted(SessionConfig::default(), |_| Ok(None));
    runtime.mount();

    assert_eq!(runtime.logouts().len(), 1);
    assert_eq!(runtime.logouts()[0].reason, LogoutReason::SessionLost);
    assert!(!runtime.listener_attached());
    assert_eq!(runtime.pending_timers(), 0);
}

#[test]
fn periodic_poll_refreshes_token() {
    let mut runtime = SimulatedRuntime::scripted(SessionConfig::default(), |n| {
        Ok(Some(Session::with_token(format!("tok-{n}"))))
    });
    runtime.mount();
    assert_eq!(runtime.view().access_token, "tok-1");

    // Keep the user active so only the poll changes state
    for _ in 0..4 {
        runtime.advance_mins(15);
        runtime.click();
    }
    assert_eq!(runtime.fetches(), 3);
    assert_eq!(runtime.view().access_token, "tok-3");
    assert_eq!(runtime.pending_idle_timeouts(), 1);
}

#[test]
fn listener_waits_for_token() {
    let mut runtime = SimulatedRuntime::with_token(SessionConfig::default(), "tok");
    runtime.hold_polls(true);
    runtime.mount();

    assert!(!runtime.listener_attached());
    assert_eq!(runtime.pending_idle_timeouts(), 0);

    assert!(runtime.release_poll(Ok(Some(Session::with_token("tok")))));
    assert!(runtime.listener_attached());
    assert_eq!(runtime.pending_idle_timeouts(), 1);
}

#[test]
fn nested_surfaces_share_one_poll() {
    let mut runtime = SimulatedRuntime::with_token(SessionConfig::default(), "tok");
    runtime.mount();
    runtime.mount();

    assert_eq!(runtime.fetches(), 1);
    assert_eq!(runtime.pending_polls(), 1);
    assert_eq!(runtime.pending_idle_timeouts(), 1);

    runtime.unmount();
    assert_eq!(runtime.pending_polls(), 1);
    assert_eq!(runtime.pending_idle_timeouts(), 1);
    assert!(runtime.listener_attached());

    runtime.unmount();
    assert_eq!(runtime.pending_timers(), 0);
    assert!(!runtime.listener_attached());
}

#[test]
fn unmount_during_warning_cancels_countdown() {
    let mut runtime = signed_in();
    runtime.advance_mins(29);
    assert_eq!(runtime.pending_countdowns(), 1);

    runtime.unmount();
    assert_eq!(runtime.pending_timers(), 0);
    assert!(!runtime.view().idle.dialog_visible);

    runtime.advance_mins(5);
    assert!(runtime.logouts().is_empty());
}

#[test]
fn remount_resumes_with_held_token() {
    let mut runtime = signed_in();
    runtime.unmount();
    runtime.mount();

    assert_eq!(runtime.fetches(), 2);
    assert!(runtime.listener_attached());
    assert_eq!(runtime.pending_idle_timeouts(), 1);
    assert_eq!(runtime.pending_polls(), 1);
}

#[test]
fn poll_due_while_in_flight_is_skipped() {
    let mut runtime = SimulatedRuntime::with_token(SessionConfig::default(), "tok");
    runtime.hold_polls(true);
    runtime.mount();
    runtime.advance_mins(29);
    runtime.advance_mins(29);

    assert_eq!(runtime.fetches(), 1);
}

#[test]
fn poll_result_after_unmount_is_ignored() {
    let mut runtime = SimulatedRuntime::with_token(SessionConfig::default(), "tok");
    runtime.hold_polls(true);
    runtime.mount();
    runtime.unmount();

    assert!(runtime.release_poll(Ok(Some(Session::with_token("late")))));
    assert_eq!(runtime.view().access_token, "");
    assert!(!runtime.listener_attached());
    assert_eq!(runtime.pending_timers(), 0);
}

#[test]
fn poll_result_after_logout_is_ignored() {
    let mut runtime = SimulatedRuntime::with_token(SessionConfig::default(), "tok");
    runtime.hold_polls(true);
    runtime.mount();
    runtime.send(SessionEvent::LogoutRequested);

    assert!(runtime.release_poll(Err(SessionError::provider_unavailable("late"))));
    assert_eq!(runtime.logouts().len(), 1);
    assert_eq!(runtime.logouts()[0].reason, LogoutReason::UserRequested);
}

#[test]
fn user_logout_notifies_server() {
    let mut runtime = signed_in();
    runtime.send(SessionEvent::LogoutRequested);

    let plan = &runtime.logouts()[0];
    assert_eq!(plan.reason, LogoutReason::UserRequested);
    assert_eq!(plan.bearer.as_deref(), Some("tok"));
    assert_eq!(runtime.pending_timers(), 0);
}

#[test]
fn signout_broadcast_logs_out_without_bearer() {
    let mut runtime = signed_in();
    let raw = r#"{"event":"session","data":{"trigger":"signout"},"timestamp":1760400000}"#;
    let broadcast = SessionBroadcast::parse(raw).unwrap();
    runtime.send(SessionEvent::Broadcast(broadcast));

    let [plan] = runtime.logouts() else {
        panic!("expected one logout");
    };
    assert_eq!(plan.reason, LogoutReason::SignedOutElsewhere);
    assert_eq!(plan.bearer, None);
    assert_eq!(runtime.customer_cleared(), 1);
}

#[test]
fn malformed_broadcast_is_ignored() {
    let mut runtime = signed_in();
    for raw in ["", "{", r#"{"event":"session","data":{"trigger":"nope"}}"#] {
        if let Some(broadcast) = SessionBroadcast::parse(raw) {
            runtime.send(SessionEvent::Broadcast(broadcast));
        }
    }
    assert!(runtime.logouts().is_empty());
    assert_eq!(runtime.view().access_token, "tok");
}

#[test]
fn session_changed_broadcast_refreshes_status() {
    let mut runtime = SimulatedRuntime::with_token(SessionConfig::default(), "tok");
    runtime.hold_polls(true);
    runtime.mount();
    runtime.send(SessionEvent::Broadcast(SessionBroadcast::SessionChanged));

    assert_eq!(runtime.refreshes(), 1);
    assert_eq!(runtime.view().access_token, "tok");
    assert!(runtime.listener_attached());
}

#[test]
fn refresh_reporting_no_session_drops_held_token() {
    for lost in [Ok(None), Ok(Some(Session::default()))] {
        let mut lost = Some(lost);
        let mut runtime = SimulatedRuntime::scripted(SessionConfig::default(), move |n| {
            if n == 1 {
                Ok(Some(Session::with_token("tok")))
            } else {
                lost.take().unwrap_or(Ok(None))
            }
        });
        runtime.mount();
        assert_eq!(runtime.view().access_token, "tok");

        runtime.send(SessionEvent::Broadcast(SessionBroadcast::SessionChanged));

        assert_eq!(runtime.refreshes(), 1);
        assert_eq!(runtime.view().access_token, "");
        let [plan] = runtime.logouts() else {
            panic!("expected one logout");
        };
        assert_eq!(plan.reason, LogoutReason::SessionLost);
        assert_eq!(plan.bearer, None);
        assert_eq!(runtime.customer_cleared(), 1);
        assert_eq!(runtime.pending_timers(), 0);
        assert!(!runtime.listener_attached());
    }
}

#[test]
fn refresh_transport_error_keeps_held_token() {
    let mut runtime = SimulatedRuntime::scripted(SessionConfig::default(), |n| {
        if n == 1 {
            Ok(Some(Session::with_token("tok")))
        } else {
            Err(SessionError::provider_unavailable("offline"))
        }
    });
    runtime.mount();
    runtime.send(SessionEvent::Broadcast(SessionBroadcast::SessionChanged));

    assert_eq!(runtime.refreshes(), 1);
    assert_eq!(runtime.view().access_token, "tok");
    assert!(runtime.logouts().is_empty());
    assert!(runtime.listener_attached());
}
