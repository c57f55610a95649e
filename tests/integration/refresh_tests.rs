//! RefreshLoop end to end against the mock host.

use std::time::Duration;

use crate::mock_hw::{
    InstantSleeper, PanelHandle, RecordingSink, ScriptedConnector, ScriptedTelemetry, panel_on,
};

use cubenano::app::events::SessionEvent;
use cubenano::app::refresh::{RefreshLoop, RefreshSettings, SessionExit, Welcome};
use cubenano::display::{self, FrameBuffer, ROW_HEIGHT};
use cubenano::error::{DiscoveryFailure, FatalError};
use cubenano::sensors::MetricSampler;
use cubenano::session::bus::BusAddress;
use cubenano::session::{DiscoverySession, RetryPolicy};
use cubenano::shutdown::ShutdownSignal;

type Loop = RefreshLoop<ScriptedConnector, ScriptedTelemetry, InstantSleeper, RecordingSink>;

const TICK: Duration = Duration::from_millis(200);
const BACKOFF: Duration = Duration::from_secs(2);

fn settings(welcome: Option<Welcome>) -> RefreshSettings {
    RefreshSettings {
        tick: TICK,
        retry: RetryPolicy {
            backoff: BACKOFF,
            fixed_attempts: 3,
        },
        welcome,
    }
}

fn build(
    panel: &PanelHandle,
    address: BusAddress,
    sleeper: InstantSleeper,
    shutdown: &ShutdownSignal,
    settings: RefreshSettings,
) -> Loop {
    RefreshLoop::new(
        DiscoverySession::new(ScriptedConnector::new(panel), address),
        MetricSampler::new(
            ScriptedTelemetry::default(),
            vec!["eno1".into(), "eth0".into(), "wlan0".into()],
        ),
        sleeper,
        RecordingSink::default(),
        shutdown.clone(),
        settings,
    )
}

/// Sleeper that raises `shutdown` on the `n`-th sleep.
fn stop_after_sleeps(shutdown: &ShutdownSignal, n: usize) -> InstantSleeper {
    let remote = shutdown.clone();
    InstantSleeper::with_hook(move |count, _| {
        if count == n {
            remote.request();
        }
    })
}

fn auto() -> BusAddress {
    BusAddress::auto(&[7, 1, 0, 8, 4]).unwrap()
}

fn row_lit(frame: &FrameBuffer, row: u8) -> usize {
    let y = display::row_y(row) as u32;
    frame.lit_in_rows(y..y + ROW_HEIGHT as u32)
}

// ── Tick loop ────────────────────────────────────────────────

#[test]
fn ten_ticks_then_stop_blanks_the_display() {
    let panel = panel_on(&[7]);
    let shutdown = ShutdownSignal::new();
    let mut refresh = build(
        &panel,
        auto(),
        stop_after_sleeps(&shutdown, 10),
        &shutdown,
        settings(None),
    );

    assert_eq!(refresh.run(), Ok(()));

    let panel = panel.borrow();
    // 10 dashboards + the final blank frame.
    assert_eq!(panel.frames.len(), 11);
    assert!(panel.frames[..10].iter().all(|(bus, f)| *bus == 7 && !f.is_blank()));
    assert!(panel.frames[10].1.is_blank());
    assert_eq!(refresh.ticks(), 10);
    assert_eq!(refresh.sink().events.last(), Some(&SessionEvent::Stopped));
}

#[test]
fn expensive_metrics_once_per_five_ticks() {
    let panel = panel_on(&[7]);
    let shutdown = ShutdownSignal::new();
    let mut refresh = build(
        &panel,
        auto(),
        stop_after_sleeps(&shutdown, 15),
        &shutdown,
        settings(None),
    );
    refresh.run().unwrap();

    let source = refresh.sampler_mut().source_mut();
    assert_eq!(source.memory_probes, 3);
    assert_eq!(source.disk_probes, 3);
    // eno1 has no address, eth0 does: two lookups per window.
    assert_eq!(source.ip_probes, 6);
    // Baseline + completion per window.
    assert_eq!(source.cpu_probes, 6);
}

#[test]
fn dashboard_labels_after_one_window() {
    let panel = panel_on(&[7]);
    let shutdown = ShutdownSignal::new();
    let mut refresh = build(
        &panel,
        auto(),
        stop_after_sleeps(&shutdown, 5),
        &shutdown,
        settings(None),
    );
    refresh.run().unwrap();

    let d = refresh.dashboard();
    // (1000, 700) at phase 0, (1200, 750) at phase 4.
    assert_eq!(d.cpu, "CPU:75%");
    assert_eq!(d.time, "12:34:56");
    assert_eq!(d.ram, "RAM:25% -> 8.0GB");
    assert_eq!(d.disk, "SDC:30% -> 100GB");
    assert_eq!(d.ip, "IPA:192.168.1.20");
}

#[test]
fn cpu_label_holds_until_the_window_closes() {
    let panel = panel_on(&[7]);
    let shutdown = ShutdownSignal::new();
    let mut refresh = build(
        &panel,
        auto(),
        stop_after_sleeps(&shutdown, 4),
        &shutdown,
        settings(None),
    );
    refresh.run().unwrap();
    assert_eq!(refresh.dashboard().cpu, "CPU:0%");
    assert_eq!(refresh.phase(), 4);
}

#[test]
fn tick_sleeps_at_most_one_period() {
    let panel = panel_on(&[7]);
    let shutdown = ShutdownSignal::new();
    let mut refresh = build(
        &panel,
        auto(),
        stop_after_sleeps(&shutdown, 5),
        &shutdown,
        settings(None),
    );
    refresh.run().unwrap();
    assert!(refresh.sleeper().sleeps.iter().all(|d| *d <= TICK));
}

// ── Welcome ──────────────────────────────────────────────────

#[test]
fn welcome_is_shown_on_row_two_and_held() {
    let panel = panel_on(&[7]);
    let shutdown = ShutdownSignal::new();
    let welcome = Welcome {
        message: "Jetson Orin Ready!".into(),
        duration: Duration::from_secs(3),
    };
    // 15 welcome slices, then 2 ticks.
    let mut refresh = build(
        &panel,
        auto(),
        stop_after_sleeps(&shutdown, 17),
        &shutdown,
        settings(Some(welcome)),
    );
    refresh.run().unwrap();

    let panel = panel.borrow();
    let first = &panel.frames[0].1;
    assert_eq!(row_lit(first, 1), 0);
    assert!(row_lit(first, 2) > 0);
    assert_eq!(row_lit(first, 3), 0);

    let held: Duration = refresh.sleeper().sleeps[..15].iter().sum();
    assert_eq!(held, Duration::from_secs(3));
    // Welcome, two dashboards, blank.
    assert_eq!(panel.frames.len(), 4);
}

#[test]
fn shutdown_while_holding_welcome_stops_cleanly() {
    let panel = panel_on(&[7]);
    let shutdown = ShutdownSignal::new();
    let welcome = Welcome {
        message: "hello".into(),
        duration: Duration::from_secs(3),
    };
    let mut refresh = build(
        &panel,
        auto(),
        stop_after_sleeps(&shutdown, 3),
        &shutdown,
        settings(Some(welcome)),
    );
    assert_eq!(refresh.run(), Ok(()));
    assert_eq!(refresh.ticks(), 0);
    let panel = panel.borrow();
    assert_eq!(panel.frames.len(), 2);
    assert!(panel.frames[1].1.is_blank());
}

// ── Hot-plug ─────────────────────────────────────────────────

#[test]
fn push_failure_rediscovers_instead_of_terminating() {
    let panel = panel_on(&[1]);
    panel.borrow_mut().unplug_after_frames = Some(3);

    let shutdown = ShutdownSignal::new();
    let remote = shutdown.clone();
    let plug = panel.clone();
    let sleeper = InstantSleeper::with_hook(move |_, duration| {
        let mut p = plug.borrow_mut();
        // Replug during the first reconnect backoff.
        if duration == BACKOFF && p.present.is_empty() {
            p.present.push(1);
        }
        if p.frames.len() >= 6 {
            remote.request();
        }
    });

    let mut refresh = build(&panel, auto(), sleeper, &shutdown, settings(None));
    assert_eq!(refresh.run(), Ok(()));

    let events = &refresh.sink().events;
    let lost = events
        .iter()
        .position(|e| *e == SessionEvent::ConnectionLost { bus: 1 })
        .expect("connection loss reported");
    let reconnected = events
        .iter()
        .rposition(|e| *e == SessionEvent::Connected { bus: 1 })
        .expect("reconnected");
    assert!(lost < reconnected);
    assert_eq!(events.last(), Some(&SessionEvent::Stopped));

    // The new session starts a fresh window: phase-0 probes again.
    assert_eq!(refresh.sampler_mut().source_mut().memory_probes, 2);
    assert!(panel.borrow().frames.last().unwrap().1.is_blank());
}

#[test]
fn fixed_bus_outlasts_an_unplug_longer_than_the_attempt_budget() {
    let panel = panel_on(&[1]);
    panel.borrow_mut().unplug_after_frames = Some(3);

    let shutdown = ShutdownSignal::new();
    let remote = shutdown.clone();
    let plug = panel.clone();
    let mut backoffs = 0;
    let sleeper = InstantSleeper::with_hook(move |_, duration| {
        let mut p = plug.borrow_mut();
        if duration == BACKOFF {
            backoffs += 1;
            // Well past the three attempts allowed at startup.
            if backoffs == 5 {
                p.present.push(1);
            }
        }
        if p.frames.len() >= 6 {
            remote.request();
        }
    });

    let mut refresh = build(&panel, BusAddress::fixed(1), sleeper, &shutdown, settings(None));
    assert_eq!(refresh.run(), Ok(()));

    let events = &refresh.sink().events;
    let failed = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::AttemptFailed { bus: 1, .. }))
        .count();
    assert_eq!(failed, 5);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, SessionEvent::DiscoveryAbandoned(_)))
    );
    let connects = events
        .iter()
        .filter(|e| **e == SessionEvent::Connected { bus: 1 })
        .count();
    assert_eq!(connects, 2);
    assert_eq!(events.last(), Some(&SessionEvent::Stopped));
    assert!(panel.borrow().attempts.iter().all(|&b| b == 1));
}

#[test]
fn run_session_reports_a_lost_display() {
    let panel = panel_on(&[7]);
    panel.borrow_mut().unplug_after_frames = Some(2);
    let mut session = DiscoverySession::new(ScriptedConnector::new(&panel), auto());
    assert_eq!(session.attempt(), Ok(7));

    let mut refresh = RefreshLoop::new(
        session,
        MetricSampler::new(ScriptedTelemetry::default(), vec!["eth0".into()]),
        InstantSleeper::new(),
        RecordingSink::default(),
        ShutdownSignal::new(),
        settings(None),
    );
    assert_eq!(refresh.run_session(), SessionExit::ConnectionLost);
    assert_eq!(refresh.ticks(), 2);
    assert!(!refresh.session().is_connected());
    assert_eq!(
        refresh.sink().events,
        vec![SessionEvent::ConnectionLost { bus: 7 }]
    );
}

// ── Terminal failure ─────────────────────────────────────────

#[test]
fn fixed_bus_without_display_is_fatal() {
    let panel = panel_on(&[7]);
    let shutdown = ShutdownSignal::new();
    let mut refresh = build(
        &panel,
        BusAddress::fixed(3),
        InstantSleeper::new(),
        &shutdown,
        settings(None),
    );
    assert_eq!(
        refresh.run(),
        Err(FatalError::Discovery(DiscoveryFailure::FixedBusUnavailable {
            bus: 3,
            attempts: 3
        }))
    );
    assert!(panel.borrow().frames.is_empty());
    assert_eq!(refresh.sleeper().sleeps, vec![BACKOFF; 2]);
    assert_eq!(refresh.sleeper().total(), BACKOFF * 2);
}
