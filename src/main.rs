//! Nakshatra Desk - Main binary
//!
//! Scores a trading session minute by minute and plays it back on a TUI
//! dashboard, or prints/exports the session in headless mode.
//!
//! # Architecture
//!
//! The whole record sequence is computed up front (it is a pure function
//! of the session window), then a playback thread streams it to the TUI:
//!
//! ```text
//! ┌────────────────┐   SessionUpdate    ┌────────────────┐
//! │    Playback    │ ────────────────►  │      TUI       │
//! │   (Thread A)   │    (channel)       │   (Thread B)   │
//! │                │ ◄────────────────  │                │
//! └────────────────┘   SessionCommand   └────────────────┘
//! ```
//!
//! Playback starts paused. Press Space to start/stop.
//!
//! # Headless Mode
//!
//! Run `--headless` for a boxed text summary on stderr, or `--json` to
//! emit the full record sequence and summary as JSON on stdout.

mod config;

use std::process;
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;
use crossbeam_channel::{bounded, Receiver, Sender};
use ephem::MeeusMoon;
use serde::Serialize;
use session::{generate_with, summarize, SessionWindow};
use tui::{EventEntry, SessionCommand, SessionUpdate, TuiApp};
use types::{PredictionRecord, SessionSummary};

pub use config::DeskConfig;

/// Nakshatra Desk - per-minute lunar influence scoring for a trading session
#[derive(Parser, Debug)]
#[command(name = "nakshatra-desk")]
#[command(about = "Market astrology dashboard for a trading session")]
#[command(version)]
struct Args {
    /// Session date (YYYY-MM-DD, defaults to today)
    #[arg(long, env = "DESK_DATE")]
    date: Option<String>,

    /// Session open (HH:MM)
    #[arg(long, env = "DESK_OPEN")]
    open: Option<String>,

    /// Session close (HH:MM)
    #[arg(long, env = "DESK_CLOSE")]
    close: Option<String>,

    /// Instrument label for display
    #[arg(long, env = "DESK_SYMBOL")]
    symbol: Option<String>,

    /// Run without TUI and print a session summary to stderr
    #[arg(long, env = "DESK_HEADLESS")]
    headless: bool,

    /// Emit the record sequence and summary as JSON on stdout (implies headless)
    #[arg(long, env = "DESK_JSON")]
    json: bool,

    /// Playback delay per minute in milliseconds
    #[arg(long, env = "DESK_STEP_DELAY")]
    step_delay: Option<u64>,

    /// Force sequential record evaluation
    #[arg(long, env = "DESK_SEQUENTIAL")]
    sequential: bool,
}

/// Full-session export for downstream consumers.
#[derive(Serialize)]
struct SessionReport<'a> {
    symbol: &'a str,
    date: String,
    records: &'a [PredictionRecord],
    summary: &'a SessionSummary,
}

fn main() {
    let args = Args::parse();

    let mut config = DeskConfig::default();
    if let Some(symbol) = args.symbol.clone() {
        config.symbol = symbol;
    }
    if let Some(ref open) = args.open {
        config.open = exit_on_parse_error(config::parse_time(open));
    }
    if let Some(ref close) = args.close {
        config.close = exit_on_parse_error(config::parse_time(close));
    }
    if let Some(delay) = args.step_delay {
        config.step_delay_ms = delay;
    }
    config.sequential = args.sequential;

    let date = match args.date {
        Some(ref input) => exit_on_parse_error(config::parse_date(input)),
        None => chrono::Utc::now().date_naive(),
    };

    let window = SessionWindow::trading_day(date).with_times(config.open, config.close);

    eprintln!("╔═══════════════════════════════════════════════════════════╗");
    eprintln!(
        "║  Nakshatra Desk — {}                                   ║",
        if args.headless || args.json {
            "Headless"
        } else {
            "TUI     "
        }
    );
    eprintln!("╠═══════════════════════════════════════════════════════════╣");
    eprintln!(
        "║  Session: {:10} {}  {}–{}              ║",
        config.symbol,
        date,
        config.open.format("%H:%M"),
        config.close.format("%H:%M"),
    );
    eprintln!(
        "║  Minutes: {:4}  │  Epoch: {}          ║",
        window.len_minutes(),
        window.epoch.format("%Y-%m-%d %H:%M"),
    );
    eprintln!("╚═══════════════════════════════════════════════════════════╝");
    eprintln!();

    if args.headless || args.json {
        run_headless(&config, &window, date, args.json);
    } else {
        eprintln!("  Press Space to start playback...");
        eprintln!();
        run_with_tui(config, window, date);
    }
}

fn exit_on_parse_error<T>(result: Result<T, String>) -> T {
    match result {
        Ok(value) => value,
        Err(message) => {
            eprintln!("error: {}", message);
            process::exit(2);
        }
    }
}

/// Compute the session or exit with the engine's error.
fn compute_session(
    config: &DeskConfig,
    window: &SessionWindow,
) -> (Vec<PredictionRecord>, SessionSummary) {
    let ephemeris = MeeusMoon::new();
    let records = match generate_with(&ephemeris, window, config.sequential) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    };
    let summary = summarize(&records);
    (records, summary)
}

/// Run without TUI: boxed summary on stderr, or JSON on stdout.
fn run_headless(config: &DeskConfig, window: &SessionWindow, date: NaiveDate, json: bool) {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let (records, summary) = compute_session(config, window);

    if json {
        let report = SessionReport {
            symbol: &config.symbol,
            date: date.to_string(),
            records: &records,
            summary: &summary,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("{}", payload),
            Err(err) => {
                eprintln!("error: failed to serialize session report: {}", err);
                process::exit(1);
            }
        }
        return;
    }

    eprintln!("╔═══════════════════════════════════════════════════════════╗");
    eprintln!("║  Session Summary                                          ║");
    eprintln!("╠═══════════════════════════════════════════════════════════╣");
    eprintln!(
        "║  Outcome: {:9} ({:3.0}% of minutes)                     ║",
        summary.direction.to_string(),
        summary.confidence * 100.0,
    );
    eprintln!(
        "║  Character: {:28}                  ║",
        summary.character,
    );
    eprintln!(
        "║  Avg volatility: {:5.3}  │  Risk: {:6} — {:22} ║",
        summary.average_volatility,
        summary.risk.level.to_string(),
        summary.risk.advice,
    );
    for share in &summary.dominant_rulers {
        eprintln!(
            "║    {:8} {:5.1}%                                        ║",
            share.ruler.to_string(),
            share.percentage,
        );
    }
    for window in &summary.windows {
        eprintln!(
            "║  {}: {:40} ║",
            window.kind,
            window.minutes.join(", "),
        );
    }
    eprintln!("╚═══════════════════════════════════════════════════════════╝");
}

/// Run playback with the TUI dashboard.
fn run_with_tui(config: DeskConfig, window: SessionWindow, date: NaiveDate) {
    // Compute before taking over the terminal so engine errors stay
    // readable and the TUI never races an aborting pipeline.
    let (records, summary) = compute_session(&config, &window);
    let session_label = format!("{} {}", config.symbol, date);

    // Bounded channels: updates get backpressure if the TUI falls behind.
    let (tx, rx) = bounded::<SessionUpdate>(100);
    let (cmd_tx, cmd_rx) = bounded::<SessionCommand>(10);

    let frame_rate = config.tui_frame_rate;
    let step_delay_ms = config.step_delay_ms;
    let playback_handle = thread::spawn(move || {
        run_playback(tx, cmd_rx, records, summary, session_label, step_delay_ms);
    });

    let app = TuiApp::new(rx)
        .with_command_sender(cmd_tx)
        .frame_rate(frame_rate);
    if let Err(err) = app.run() {
        eprintln!("TUI error: {}", err);
    }

    let _ = playback_handle.join();
}

/// Playback state for the streaming loop.
struct PlaybackState {
    running: bool,
    played: usize,
    session_label: String,
    influence_history: Vec<f64>,
    volatility_history: Vec<f64>,
    events: Vec<EventEntry>,
}

impl PlaybackState {
    fn new(session_label: String, capacity: usize) -> Self {
        Self {
            running: false,
            played: 0,
            session_label,
            influence_history: Vec::with_capacity(capacity),
            volatility_history: Vec::with_capacity(capacity),
            events: Vec::new(),
        }
    }

    /// Advance playback by one record.
    fn play(&mut self, record: &PredictionRecord) {
        self.influence_history.push(record.influence);
        self.volatility_history.push(record.volatility);
        for event in &record.events {
            self.events.push(EventEntry {
                time: record.time_label(),
                label: event.to_string(),
            });
        }
        self.played += 1;
    }

    /// Build an update from the current state.
    fn build_update(
        &self,
        records: &[PredictionRecord],
        summary: &SessionSummary,
        finished: bool,
    ) -> SessionUpdate {
        SessionUpdate {
            session_label: self.session_label.clone(),
            minute: self.played,
            total_minutes: records.len(),
            influence_history: self.influence_history.clone(),
            volatility_history: self.volatility_history.clone(),
            latest: self.played.checked_sub(1).map(|i| records[i].clone()),
            events: self.events.clone(),
            summary: if finished { Some(summary.clone()) } else { None },
            finished,
        }
    }
}

/// Process incoming commands, returning whether to continue the loop.
fn process_commands(
    cmd_rx: &Receiver<SessionCommand>,
    state: &mut PlaybackState,
) -> bool {
    while let Ok(cmd) = cmd_rx.try_recv() {
        match cmd {
            SessionCommand::Start => state.running = true,
            SessionCommand::Pause => state.running = false,
            SessionCommand::Toggle => state.running = !state.running,
            SessionCommand::Quit => return false,
        }
    }
    true
}

/// Wait for a quit command after playback finishes.
fn wait_for_quit(cmd_rx: &Receiver<SessionCommand>) {
    loop {
        match cmd_rx.recv() {
            Ok(SessionCommand::Quit) | Err(_) => return,
            _ => {}
        }
    }
}

/// Stream the precomputed session to the TUI, one minute per step.
///
/// Playback starts **paused** and waits for a Start or Toggle command.
fn run_playback(
    tx: Sender<SessionUpdate>,
    cmd_rx: Receiver<SessionCommand>,
    records: Vec<PredictionRecord>,
    summary: SessionSummary,
    session_label: String,
    step_delay_ms: u64,
) {
    let mut state = PlaybackState::new(session_label, records.len());
    let _ = tx.send(state.build_update(&records, &summary, records.is_empty()));

    loop {
        if !process_commands(&cmd_rx, &mut state) {
            return;
        }

        if !state.running {
            thread::sleep(Duration::from_millis(10));
            continue;
        }

        if state.played >= records.len() {
            let _ = tx.send(state.build_update(&records, &summary, true));
            wait_for_quit(&cmd_rx);
            return;
        }

        state.play(&records[state.played]);

        if tx.send(state.build_update(&records, &summary, false)).is_err() {
            break;
        }

        if step_delay_ms > 0 {
            thread::sleep(Duration::from_millis(step_delay_ms));
        }
    }
}
