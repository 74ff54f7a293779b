//! Integration tests: screen task and dispatch worker on the local executor.

use futures_lite::future::{block_on, yield_now};
use shakealert::app::commands::AppCommand;
use shakealert::app::events::AppEvent;
use shakealert::app::notices::Notice;
use shakealert::app::service::ShakeAlertService;
use shakealert::config::ShakeConfig;
use shakealert::dispatch::{DispatchOutcome, DispatchQueue, Dispatcher};
use shakealert::runtime::{DispatchWorker, run_local};

use crate::mock_platform::{
    FixedClock, MockAccelerometer, MockMessaging, RecordingNotices, RecordingSink, push_sample,
};

#[test]
fn shake_on_screen_reaches_sms() {
    let config = ShakeConfig::default();
    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut service = ShakeAlertService::new(&config, accel);
    let dispatcher = Dispatcher::new(&config);
    let requests = DispatchQueue::new();
    let worker = DispatchWorker::new(&dispatcher, &requests);

    let platform = MockMessaging::working().with_number("5512345678");
    let notices = RecordingNotices::default();
    let sink = RecordingSink::default();
    let clock = FixedClock::at(1_000);

    let screen = {
        let mut storage = platform.clone();
        let mut notices = notices.clone();
        let mut sink = sink.clone();
        let service = &mut service;
        let worker = &worker;
        let requests = &requests;
        let clock = &clock;
        async move {
            service.handle_command(
                AppCommand::FocusChanged(true),
                &mut storage,
                &mut notices,
                &mut sink,
            );
            service.start(&mut notices, &mut sink).await;

            push_sample(&log, 3.0, 3.0, 3.0);
            push_sample(&log, 10.0, 10.0, 10.0);
            service.tick(clock, requests, &mut notices, &mut sink);
            yield_now().await;
            worker.wait_idle().await;
        }
    };

    run_local(
        screen,
        worker.run(platform.clone(), notices.clone(), sink.clone()),
    );

    assert_eq!(worker.completed(), 1);
    assert_eq!(platform.sms_sends(), 1);
    assert_eq!(notices.all(), vec![Notice::AlertSentSms]);
    assert_eq!(
        sink.count(|e| *e == AppEvent::DispatchFinished(DispatchOutcome::SentViaSms)),
        1
    );
}

#[test]
fn queued_shakes_dispatch_in_order() {
    let config = ShakeConfig::default();
    let dispatcher = Dispatcher::new(&config);
    let requests = DispatchQueue::new();
    let worker = DispatchWorker::new(&dispatcher, &requests);
    let platform = MockMessaging::working().with_number("5512345678");
    let sink = RecordingSink::default();

    let accel = MockAccelerometer::present();
    let log = accel.handle();
    let mut service = ShakeAlertService::new(&config, accel);
    let clock = FixedClock::at(0);

    let mut storage = platform.clone();
    let mut notices = RecordingNotices::default();
    let mut screen_sink = RecordingSink::default();
    service.handle_command(
        AppCommand::FocusChanged(true),
        &mut storage,
        &mut notices,
        &mut screen_sink,
    );
    block_on(service.start(&mut notices, &mut screen_sink));

    for at in [5_000, 6_500, 8_000] {
        clock.set(at);
        push_sample(&log, 6.0, 0.0, 0.0);
        service.tick(&clock, &requests, &mut notices, &mut screen_sink);
    }
    assert_eq!(requests.len(), 3);

    run_local(
        worker.wait_idle(),
        worker.run(platform.clone(), RecordingNotices::default(), sink.clone()),
    );

    assert!(worker.is_idle());
    assert_eq!(worker.completed(), 3);
    assert_eq!(platform.sms_sends(), 3);
    assert_eq!(sink.all().len(), 3);
}

#[test]
fn idle_worker_returns_immediately() {
    let dispatcher = Dispatcher::new(&ShakeConfig::default());
    let requests = DispatchQueue::new();
    let worker = DispatchWorker::new(&dispatcher, &requests);
    let platform = MockMessaging::working();

    let value = run_local(
        async {
            worker.wait_idle().await;
            42
        },
        worker.run(platform.clone(), RecordingNotices::default(), RecordingSink::default()),
    );

    assert_eq!(value, 42);
    assert_eq!(worker.completed(), 0);
    assert!(platform.calls().is_empty());
}
