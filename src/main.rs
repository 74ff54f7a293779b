//! ShakeAlert simulator: replays recorded accelerometer scripts.
//!
//! Runs the real service, detector and dispatcher against the replay
//! adapters, so thresholds, debounce and the send-with-fallback chain can
//! be exercised on a desktop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                     │
//! │  ReplayAccelerometer   SimulatedMessaging   MemoryStore    │
//! │  ScriptClock           LogNotices           LogEventSink   │
//! │  ──────────────── Port Trait Boundary ───────────────────  │
//! │   ShakeAlertService ──DispatchQueue──▶ DispatchWorker      │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Script format (JSON lines):
//!
//! ```text
//! {"at_ms": 0,   "event": "focus", "focused": true}
//! {"at_ms": 100, "event": "sample", "x": 3.0, "y": 3.0, "z": 3.0}
//! {"at_ms": 200, "event": "save_number", "number": "5512345678"}
//! {"at_ms": 900, "event": "unmount"}
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{Level, info};

use shakealert::adapters::log_sink::LogEventSink;
use shakealert::adapters::memory_store::MemoryStore;
use shakealert::adapters::notices::LogNotices;
use shakealert::adapters::replay::{
    MessagingBehaviour, ReplayAccelerometer, SampleFeed, ScriptEvent, SimulatedMessaging,
    parse_script,
};
use shakealert::adapters::time::ScriptClock;
use shakealert::app::commands::AppCommand;
use shakealert::app::ports::{HostKind, SmsStatus};
use shakealert::app::service::ShakeAlertService;
use shakealert::config::ShakeConfig;
use shakealert::contact::EmergencyContactStore;
use shakealert::dispatch::{DispatchQueue, Dispatcher};
use shakealert::runtime::{DispatchWorker, run_local};
use shakealert::sampler::AccelSample;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SmsResult {
    Sent,
    Cancelled,
    Unknown,
}

impl From<SmsResult> for SmsStatus {
    fn from(r: SmsResult) -> Self {
        match r {
            SmsResult::Sent => SmsStatus::Sent,
            SmsResult::Cancelled => SmsStatus::Cancelled,
            SmsResult::Unknown => SmsStatus::Unknown,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shakealert-sim", version, about = "Replay accelerometer scripts through the shake-alert core")]
struct Args {
    /// JSON-lines replay script
    script: PathBuf,

    /// JSON file overriding the default configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emergency number stored before the replay starts
    #[arg(long)]
    number: Option<String>,

    /// Pretend to run in a browser (no motion sensors)
    #[arg(long)]
    web: bool,

    /// Device has no accelerometer
    #[arg(long)]
    no_sensor: bool,

    /// SMS composer unavailable
    #[arg(long)]
    no_sms: bool,

    /// Result the SMS composer reports
    #[arg(long, value_enum, default_value = "sent")]
    sms_result: SmsResult,

    /// Messaging app not installed
    #[arg(long)]
    no_messaging_app: bool,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let level_color = match record.level() {
                Level::Error => "\x1b[31m\x1b[1m",
                Level::Warn => "\x1b[33m\x1b[1m",
                Level::Info => "\x1b[32m\x1b[1m",
                Level::Debug => "\x1b[36m\x1b[1m",
                Level::Trace => "\x1b[90m\x1b[1m",
            };
            writeln!(
                buf,
                "{}{:<5}\x1b[0m [{}] {}",
                level_color,
                record.level(),
                record.target(),
                record.args(),
            )
        })
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ShakeConfig> {
    let Some(path) = path else {
        return Ok(ShakeConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = ShakeConfig::from_json(&text)
        .map_err(shakealert::error::Error::from)
        .with_context(|| format!("loading config {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    info!("ShakeAlert simulator v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Configuration + storage ────────────────────────────
    let config = load_config(args.config.as_ref())?;
    info!(
        "Threshold {:.2} g, cooldown {} ms, fallback {:?}",
        config.threshold_g, config.cooldown_ms, config.fallback
    );

    let mut store = MemoryStore::new();
    if let Some(number) = &args.number {
        EmergencyContactStore::save(&mut store, number)
            .map_err(shakealert::error::Error::from)
            .context("storing --number")?;
    }

    // ── 2. Script ─────────────────────────────────────────────
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let script = parse_script(&text)?;
    info!("Loaded {} script steps", script.len());

    // ── 3. Adapters ───────────────────────────────────────────
    let host = if args.web { HostKind::Web } else { HostKind::Native };
    let feed = SampleFeed::new();
    let clock = ScriptClock::new();
    let accelerometer = ReplayAccelerometer::new(host, !args.no_sensor, feed.clone());
    let messaging = SimulatedMessaging::new(
        MessagingBehaviour {
            sms_available: !args.no_sms,
            sms_status: args.sms_result.into(),
            messaging_app_installed: !args.no_messaging_app,
        },
        store.clone(),
    );

    // ── 4. Core ───────────────────────────────────────────────
    let mut service = ShakeAlertService::new(&config, accelerometer);
    let dispatcher = Dispatcher::new(&config);
    let requests = DispatchQueue::new();
    let worker = DispatchWorker::new(&dispatcher, &requests);

    let screen = async {
        let mut notices = LogNotices::new();
        let mut sink = LogEventSink::new();

        // The home screen opens focused.
        service.handle_command(AppCommand::FocusChanged(true), &mut store, &mut notices, &mut sink);
        service.start(&mut notices, &mut sink).await;

        for step in &script {
            clock.set(step.at_ms);
            match &step.event {
                ScriptEvent::Focus { focused } => service.handle_command(
                    AppCommand::FocusChanged(*focused),
                    &mut store,
                    &mut notices,
                    &mut sink,
                ),
                ScriptEvent::Sample { x, y, z } => {
                    feed.push(AccelSample::new(*x, *y, *z));
                }
                ScriptEvent::SaveNumber { number } => service.handle_command(
                    AppCommand::SaveEmergencyNumber(number.clone()),
                    &mut store,
                    &mut notices,
                    &mut sink,
                ),
                ScriptEvent::Unmount => service.handle_command(
                    AppCommand::Unmount,
                    &mut store,
                    &mut notices,
                    &mut sink,
                ),
            }
            service.tick(&clock, &requests, &mut notices, &mut sink);
            futures_lite::future::yield_now().await;
        }

        worker.wait_idle().await;
        service.handle_command(AppCommand::Unmount, &mut store, &mut notices, &mut sink);
        (service.samples_seen(), service.shakes_accepted(), service.status())
    };

    let (samples, shakes, status) = run_local(
        screen,
        worker.run(messaging, LogNotices::new(), LogEventSink::new()),
    );

    info!(
        "Replay done: {} samples, {} shakes, {} dispatches, status '{}'",
        samples,
        shakes,
        worker.completed(),
        status.label()
    );
    Ok(())
}
