//! Discovery and hot-plug behaviour of the display session.

use std::time::Duration;

use crate::mock_hw::{InstantSleeper, RecordingSink, ScriptedConnector, panel_on};

use cubenano::app::events::SessionEvent;
use cubenano::display::FrameBuffer;
use cubenano::error::{DiscoveryFailure, DisplayError};
use cubenano::session::bus::BusAddress;
use cubenano::session::{Discovery, DiscoverySession, RetryPolicy};
use cubenano::shutdown::ShutdownSignal;

const PRIORITY: [u8; 5] = [7, 1, 0, 8, 4];

#[test]
fn auto_mode_tries_each_bus_once_per_cycle_in_priority_order() {
    let panel = panel_on(&[]);
    let mut session = DiscoverySession::new(
        ScriptedConnector::new(&panel),
        BusAddress::auto(&PRIORITY).unwrap(),
    );
    for _ in 0..PRIORITY.len() * 2 {
        assert!(session.attempt().is_err());
    }
    let attempts = panel.borrow().attempts.clone();
    assert_eq!(attempts[..5], PRIORITY);
    assert_eq!(attempts[5..], PRIORITY);
}

#[test]
fn fixed_mode_only_ever_tries_its_bus() {
    let panel = panel_on(&[7]);
    let mut session =
        DiscoverySession::new(ScriptedConnector::new(&panel), BusAddress::fixed(4));
    for _ in 0..6 {
        assert_eq!(
            session.attempt(),
            Err(DisplayError::BusUnavailable { bus: 4 })
        );
    }
    assert!(panel.borrow().attempts.iter().all(|&b| b == 4));
}

#[test]
fn retry_keeps_scanning_until_the_display_is_plugged_in() {
    let panel = panel_on(&[]);
    let plug = panel.clone();
    // Display appears on bus 0 after the 7th backoff.
    let mut sleeper = InstantSleeper::with_hook(move |n, _| {
        if n == 7 {
            plug.borrow_mut().present.push(0);
        }
    });
    let mut sink = RecordingSink::default();
    let mut session = DiscoverySession::new(
        ScriptedConnector::new(&panel),
        BusAddress::auto(&PRIORITY).unwrap(),
    );

    let policy = RetryPolicy::default();
    let result =
        session.connect_with_retry(&policy, &mut sleeper, &ShutdownSignal::new(), &mut sink);

    assert_eq!(result, Ok(Discovery::Connected(0)));
    // 7 failures: 7 1 0 8 4 7 1, then 0 answers.
    assert_eq!(
        panel.borrow().attempts,
        vec![7, 1, 0, 8, 4, 7, 1, 0]
    );
    assert!(sleeper.sleeps.iter().all(|d| *d == Duration::from_secs(2)));
    assert_eq!(
        sink.events
            .iter()
            .filter(|e| matches!(e, SessionEvent::AttemptFailed { .. }))
            .count(),
        7
    );
    assert_eq!(sink.events.last(), Some(&SessionEvent::Connected { bus: 0 }));
}

#[test]
fn fixed_bus_failure_is_terminal_after_configured_attempts() {
    let panel = panel_on(&[]);
    let mut session =
        DiscoverySession::new(ScriptedConnector::new(&panel), BusAddress::fixed(1));
    let mut sink = RecordingSink::default();
    let policy = RetryPolicy {
        backoff: Duration::from_millis(10),
        fixed_attempts: 5,
    };
    let result = session.connect_with_retry(
        &policy,
        &mut InstantSleeper::new(),
        &ShutdownSignal::new(),
        &mut sink,
    );
    let failure = DiscoveryFailure::FixedBusUnavailable { bus: 1, attempts: 5 };
    assert_eq!(result, Err(failure));
    assert_eq!(
        sink.events.last(),
        Some(&SessionEvent::DiscoveryAbandoned(failure))
    );
}

#[test]
fn shutdown_during_backoff_cancels_discovery() {
    let panel = panel_on(&[]);
    let shutdown = ShutdownSignal::new();
    let remote = shutdown.clone();
    let mut sleeper = InstantSleeper::with_hook(move |n, _| {
        if n == 3 {
            remote.request();
        }
    });
    let mut session = DiscoverySession::new(
        ScriptedConnector::new(&panel),
        BusAddress::auto(&PRIORITY).unwrap(),
    );
    let result = session.connect_with_retry(
        &RetryPolicy::default(),
        &mut sleeper,
        &shutdown,
        &mut RecordingSink::default(),
    );
    assert_eq!(result, Ok(Discovery::Cancelled));
    assert_eq!(panel.borrow().attempts.len(), 3);
}

#[test]
fn unplug_drops_the_handle_and_replug_reconnects() {
    let panel = panel_on(&[8]);
    let mut session = DiscoverySession::new(
        ScriptedConnector::new(&panel),
        BusAddress::auto(&PRIORITY).unwrap(),
    );
    let frame = FrameBuffer::new();

    while session.attempt().is_err() {}
    assert_eq!(session.connected_bus(), Some(8));
    assert!(session.push(&frame).is_ok());

    panel.borrow_mut().present.clear();
    assert_eq!(session.push(&frame), Err(DisplayError::PushFailed));
    assert!(!session.is_connected());

    panel.borrow_mut().present.push(8);
    assert_eq!(session.attempt(), Ok(8));
    assert!(session.push(&frame).is_ok());
}
