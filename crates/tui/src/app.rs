//! Main TUI application - composes widgets and handles the render loop.
//!
//! # Controls
//!
//! - `Space`: start/pause playback (playback starts paused)
//! - `Up`/`Down`: scroll the event feed
//! - `q`/`Esc`: quit

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::widgets::{CyclePanel, EventsPanel, InfluenceChart, SessionUpdate, SummaryPanel};
use crate::SessionCommand;

/// TUI application state.
pub struct TuiApp {
    /// Channel receiver for playback updates.
    receiver: Receiver<SessionUpdate>,
    /// Channel sender for commands to the playback thread.
    command_sender: Option<Sender<SessionCommand>>,
    /// Latest playback state.
    state: SessionUpdate,
    /// Whether playback has finished.
    finished: bool,
    /// Whether playback is currently running.
    running: bool,
    /// Target frame rate.
    frame_rate: u64,
    /// Event feed scroll offset.
    event_scroll: usize,
    /// Pin the event feed to the newest entry until the user scrolls.
    follow_events: bool,
}

impl TuiApp {
    /// Create a new TUI app over the given update channel.
    ///
    /// Playback starts **paused**. Press Space to start.
    pub fn new(receiver: Receiver<SessionUpdate>) -> Self {
        Self {
            receiver,
            command_sender: None,
            state: SessionUpdate::default(),
            finished: false,
            running: false,
            frame_rate: 30,
            event_scroll: 0,
            follow_events: true,
        }
    }

    /// Set the command sender for controlling playback.
    pub fn with_command_sender(mut self, sender: Sender<SessionCommand>) -> Self {
        self.command_sender = Some(sender);
        self
    }

    /// Set the target frame rate (frames per second).
    pub fn frame_rate(mut self, fps: u64) -> Self {
        self.frame_rate = fps.max(1);
        self
    }

    /// Run the TUI event loop.
    ///
    /// Blocks until the user quits.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Main event loop.
    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        let tick_rate = Duration::from_millis(1000 / self.frame_rate);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| self.draw(f))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key_event(key.code) {
                        return Ok(());
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.poll_updates();
                last_tick = Instant::now();
            }
        }
    }

    /// Handle keyboard input. Returns true if the app should quit.
    fn handle_key_event(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if let Some(ref sender) = self.command_sender {
                    let _ = sender.send(SessionCommand::Quit);
                }
                return true;
            }

            KeyCode::Char(' ') => {
                if !self.finished {
                    self.running = !self.running;
                    if let Some(ref sender) = self.command_sender {
                        let _ = sender.send(SessionCommand::Toggle);
                    }
                }
            }

            KeyCode::Up => {
                self.follow_events = false;
                self.event_scroll = self.event_scroll.saturating_sub(1);
            }

            KeyCode::Down => {
                let max_scroll = self.state.events.len().saturating_sub(1);
                self.event_scroll = (self.event_scroll + 1).min(max_scroll);
                if self.event_scroll == max_scroll {
                    self.follow_events = true;
                }
            }

            _ => {}
        }
        false
    }

    /// Poll for updates from the playback channel (non-blocking).
    fn poll_updates(&mut self) {
        for update in self.receiver.try_iter() {
            if update.finished {
                self.finished = true;
            }
            self.state = update;
        }
        if self.follow_events {
            self.event_scroll = self.state.events.len().saturating_sub(1);
        }
    }

    /// Draw the UI.
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.draw_header(frame, main_chunks[0]);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
            .split(main_chunks[1]);

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(10), Constraint::Min(8)])
            .split(content_chunks[0]);

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(content_chunks[1]);

        frame.render_widget(CyclePanel::new(self.state.latest.as_ref()), left_chunks[0]);
        frame.render_widget(SummaryPanel::new(self.state.summary.as_ref()), left_chunks[1]);
        self.draw_chart(frame, right_chunks[0]);
        frame.render_widget(
            EventsPanel::new(&self.state.events).scroll_offset(self.event_scroll),
            right_chunks[1],
        );

        self.draw_footer(frame, main_chunks[2]);
    }

    /// Draw the header bar.
    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let status = if self.finished {
            Span::styled(
                " FINISHED ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else if self.running {
            Span::styled(
                " RUNNING ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                " PAUSED ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let title = Line::from(vec![
            Span::styled(
                "Nakshatra Desk",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled(
                self.state.session_label.clone(),
                Style::default().fg(Color::White),
            ),
            Span::raw(" │ "),
            status,
            Span::styled(
                format!(
                    " {}/{} min ({:.0}%)",
                    self.state.minute,
                    self.state.total_minutes,
                    self.state.progress() * 100.0
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);

        let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(header, area);
    }

    /// Draw the influence chart.
    fn draw_chart(&self, frame: &mut Frame, area: Rect) {
        let title = match self.state.latest.as_ref() {
            Some(record) => format!(
                "Influence {} — score {:.3}",
                record.time_label(),
                record.influence
            ),
            None => "Influence".to_string(),
        };
        let chart = InfluenceChart::new(
            &self.state.influence_history,
            &self.state.volatility_history,
        )
        .title(&title)
        .total_minutes(self.state.total_minutes);
        frame.render_widget(chart, area);
    }

    /// Draw the footer bar.
    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let start_stop = if self.finished {
            Span::raw("")
        } else if self.running {
            Span::raw(" Pause  │ ")
        } else {
            Span::raw(" Start  │ ")
        };

        let footer = Paragraph::new(Line::from(vec![
            Span::styled(" q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit  │ "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            start_stop,
            Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
            Span::raw(" Events"),
        ]))
        .style(Style::default().bg(Color::DarkGray));
        frame.render_widget(footer, area);
    }
}
