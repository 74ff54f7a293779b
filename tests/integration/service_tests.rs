//! Integration tests: screen lifecycle → sampler → detector → dispatch queue.

use futures_lite::future::block_on;
use shakealert::app::commands::AppCommand;
use shakealert::app::events::AppEvent;
use shakealert::app::notices::Notice;
use shakealert::app::ports::HostKind;
use shakealert::app::service::ShakeAlertService;
use shakealert::config::ShakeConfig;
use shakealert::contact::EmergencyContactStore;
use shakealert::dispatch::{DISPATCH_QUEUE_DEPTH, DispatchQueue};
use shakealert::error::SensorError;
use shakealert::sampler::{Availability, ShakeStatus};

use crate::mock_platform::{
    FixedClock, MockAccelerometer, MockMessaging, RecordingNotices, RecordingSink, push_sample,
};

struct Harness {
    service: ShakeAlertService<MockAccelerometer>,
    storage: MockMessaging,
    notices: RecordingNotices,
    sink: RecordingSink,
    clock: FixedClock,
    requests: DispatchQueue,
}

impl Harness {
    fn new(accel: MockAccelerometer) -> Self {
        Self::with_config(&ShakeConfig::default(), accel)
    }

    fn with_config(config: &ShakeConfig, accel: MockAccelerometer) -> Self {
        Self {
            service: ShakeAlertService::new(config, accel),
            storage: MockMessaging::working(),
            notices: RecordingNotices::default(),
            sink: RecordingSink::default(),
            clock: FixedClock::at(10_000),
            requests: DispatchQueue::new(),
        }
    }

    fn start(&mut self) -> ShakeStatus {
        block_on(self.service.start(&mut self.notices, &mut self.sink))
    }

    fn command(&mut self, cmd: AppCommand) {
        self.service
            .handle_command(cmd, &mut self.storage, &mut self.notices, &mut self.sink);
    }

    fn tick(&mut self) -> usize {
        self.service.tick(
            &self.clock,
            &self.requests,
            &mut self.notices,
            &mut self.sink,
        )
    }

    fn queued(&self) -> usize {
        self.requests.len()
    }
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn start_without_focus_is_paused() {
    let mut h = Harness::new(MockAccelerometer::present());
    assert_eq!(h.start(), ShakeStatus::Paused);
    assert!(!h.service.is_sampling());
}

#[test]
fn focused_and_available_subscribes_once() {
    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut h = Harness::new(accel);

    h.command(AppCommand::FocusChanged(true));
    assert_eq!(h.start(), ShakeStatus::Active);
    assert_eq!(log.borrow().subscribes, 1);
    assert_eq!(log.borrow().live, 1);
    assert_eq!(h.sink.count(|e| *e == AppEvent::SamplingStarted), 1);
}

#[test]
fn focus_toggling_never_leaves_two_subscriptions() {
    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut h = Harness::new(accel);
    h.command(AppCommand::FocusChanged(true));
    h.start();

    for _ in 0..5 {
        h.command(AppCommand::FocusChanged(false));
        assert!(!h.service.is_sampling());
        assert_eq!(log.borrow().live, 0);

        h.command(AppCommand::FocusChanged(true));
        assert!(h.service.is_sampling());
        assert_eq!(log.borrow().live, 1);
    }

    // Repeated focus=true while already sampling must not resubscribe.
    h.command(AppCommand::FocusChanged(true));
    assert_eq!(log.borrow().max_live, 1);
    assert_eq!(log.borrow().subscribes, 6);
    assert_eq!(log.borrow().removes, 5);
}

#[test]
fn unmount_releases_sensor() {
    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut h = Harness::new(accel);
    h.command(AppCommand::FocusChanged(true));
    h.start();

    h.command(AppCommand::Unmount);
    assert_eq!(log.borrow().live, 0);
    assert_eq!(h.sink.count(|e| *e == AppEvent::SamplingStopped), 1);
}

#[test]
fn dropping_service_removes_subscription() {
    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut h = Harness::new(accel);
    h.command(AppCommand::FocusChanged(true));
    h.start();
    drop(h);
    assert_eq!(log.borrow().live, 0);
}

#[test]
fn web_host_is_rejected_without_query() {
    let mut accel = MockAccelerometer::present();
    accel.host = HostKind::Web;
    let log = accel.handle();
    let mut h = Harness::new(accel);
    h.command(AppCommand::FocusChanged(true));

    assert_eq!(h.start(), ShakeStatus::Unavailable);
    assert_eq!(log.borrow().queries, 0);
    assert_eq!(log.borrow().subscribes, 0);
    assert_eq!(h.notices.all(), vec![Notice::ShakeUnsupportedHost]);
}

#[test]
fn missing_sensor_shows_notice() {
    let mut accel = MockAccelerometer::present();
    accel.available = Ok(false);
    let mut h = Harness::new(accel);
    h.command(AppCommand::FocusChanged(true));

    assert_eq!(h.start(), ShakeStatus::Unavailable);
    assert_eq!(h.notices.all(), vec![Notice::ShakeUnavailable]);
}

#[test]
fn failed_query_counts_as_unavailable() {
    let mut accel = MockAccelerometer::present();
    accel.available = Err(SensorError::QueryFailed);
    let mut h = Harness::new(accel);
    h.command(AppCommand::FocusChanged(true));

    assert_eq!(h.start(), ShakeStatus::Unavailable);
    assert_eq!(h.service.sampler().availability(), Availability::Unavailable);
    assert_eq!(h.notices.all(), vec![Notice::ShakeCheckFailed]);
}

#[test]
fn subscribe_failure_disables_feature() {
    let mut accel = MockAccelerometer::present();
    accel.fail_subscribe = true;
    let mut h = Harness::new(accel);
    h.command(AppCommand::FocusChanged(true));

    assert_eq!(h.start(), ShakeStatus::Unavailable);
    assert_eq!(h.notices.all(), vec![Notice::ShakeInitFailed]);

    // Later focus changes do not retry a sensor marked unavailable.
    h.command(AppCommand::FocusChanged(false));
    h.command(AppCommand::FocusChanged(true));
    assert_eq!(h.notices.all().len(), 1);
}

// ── Detection ─────────────────────────────────────────────────

#[test]
fn shake_then_immediate_bigger_shake_queues_once() {
    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut h = Harness::new(accel);
    h.command(AppCommand::FocusChanged(true));
    h.start();

    push_sample(&log, 3.0, 3.0, 3.0);
    push_sample(&log, 10.0, 10.0, 10.0);
    assert_eq!(h.tick(), 1);
    assert_eq!(h.queued(), 1);
    assert_eq!(
        h.sink
            .count(|e| matches!(e, AppEvent::ShakeDebounced { .. })),
        1
    );
}

#[test]
fn shakes_outside_window_each_queue() {
    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut h = Harness::new(accel);
    h.command(AppCommand::FocusChanged(true));
    h.start();

    push_sample(&log, 6.0, 0.0, 0.0);
    h.tick();
    h.clock.set(11_000);
    push_sample(&log, 6.0, 0.0, 0.0);
    h.tick();

    assert_eq!(h.queued(), 2);
    assert_eq!(h.service.shakes_accepted(), 2);
}

#[test]
fn gentle_motion_never_queues() {
    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut h = Harness::new(accel);
    h.command(AppCommand::FocusChanged(true));
    h.start();

    for i in 0..50 {
        push_sample(&log, 1.0, -1.0, 1.0 + i as f32 * 0.01);
    }
    assert_eq!(h.tick(), 0);
    assert_eq!(h.queued(), 0);
    assert_eq!(h.service.samples_seen(), 50);
}

#[test]
fn no_samples_is_not_an_error() {
    let mut h = Harness::new(MockAccelerometer::present());
    h.command(AppCommand::FocusChanged(true));
    h.start();
    assert_eq!(h.tick(), 0);
    assert!(h.notices.all().is_empty());
}

#[test]
fn samples_while_unfocused_are_never_seen() {
    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut h = Harness::new(accel);
    h.start();

    push_sample(&log, 10.0, 10.0, 10.0);
    assert_eq!(h.tick(), 0);
    assert_eq!(h.service.samples_seen(), 0);
}

#[test]
fn full_queue_drops_and_reports() {
    let config = ShakeConfig {
        cooldown_ms: 1,
        ..ShakeConfig::default()
    };
    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut h = Harness::with_config(&config, accel);
    h.command(AppCommand::FocusChanged(true));
    h.start();

    let mut queued = 0;
    for i in 0..=DISPATCH_QUEUE_DEPTH as u64 {
        h.clock.set(20_000 + i * 10);
        push_sample(&log, 9.0, 0.0, 0.0);
        queued += h.tick();
    }
    assert_eq!(queued, DISPATCH_QUEUE_DEPTH);
    assert_eq!(h.queued(), DISPATCH_QUEUE_DEPTH);
    assert_eq!(
        h.sink
            .count(|e| matches!(e, AppEvent::DispatchDropped(_))),
        1
    );
    // The dropped shake is never silent.
    assert_eq!(h.notices.all(), vec![Notice::AlertDropped]);
}

// ── Emergency number settings ─────────────────────────────────

#[test]
fn save_valid_number() {
    let mut h = Harness::new(MockAccelerometer::present());
    h.command(AppCommand::SaveEmergencyNumber("5512345678".into()));

    assert_eq!(h.notices.all(), vec![Notice::NumberSaved]);
    let stored = EmergencyContactStore::load(&h.storage).unwrap().unwrap();
    assert_eq!(stored.as_str(), "5512345678");
}

#[test]
fn save_invalid_number_keeps_previous() {
    let mut h = Harness::new(MockAccelerometer::present());
    h.command(AppCommand::SaveEmergencyNumber("5512345678".into()));
    h.command(AppCommand::SaveEmergencyNumber("12345".into()));

    assert_eq!(h.notices.all(), vec![Notice::NumberSaved, Notice::NumberInvalid]);
    let stored = EmergencyContactStore::load(&h.storage).unwrap().unwrap();
    assert_eq!(stored.as_str(), "5512345678");
}

#[test]
fn save_with_broken_storage_reports_failure() {
    let mut h = Harness::new(MockAccelerometer::present());
    h.storage.storage_broken = true;
    h.command(AppCommand::SaveEmergencyNumber("5512345678".into()));
    assert_eq!(h.notices.all(), vec![Notice::NumberSaveFailed]);
}
