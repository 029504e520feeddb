/*
[INPUT]:  Dashboard config, platform schemas, log buffer
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
[UPDATE]: 2026-10-06 Feed connection test results into the select loop
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

use reelbrand_dashboard::{DashboardConfig, OnboardingSession, Platforms};

use super::app::{AppState, Tab};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::*;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub(crate) const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// The most recent `count` lines, oldest first
    pub fn tail(&self, count: usize) -> Vec<String> {
        let start = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(start).cloned().collect()
    }
}

/// Routes tracing output into the Logs tab instead of the terminal
#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    fn push(&self, line: String) {
        // a poisoned buffer only loses log lines
        if let Ok(mut guard) = self.buffer.lock() {
            guard.push_line(line);
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial.drain(..=pos);
            self.push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.push(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
}

pub async fn run_tui(
    config: DashboardConfig,
    platforms: Platforms,
    log_buffer: LogBufferHandle,
) -> Result<()> {
    let client = config.build_client()?;
    let tester = Arc::new(config.connection_tester());
    let session = OnboardingSession::new(platforms, config.require_connection_test);

    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (test_tx, mut test_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = event_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = AppState::new(client, tester, session, log_buffer, test_tx);
    terminal.draw(|frame| draw_ui(frame, &app))?;
    app.refresh_accounts().await;

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {}
            Some(result) = test_rx.recv() => {
                app.finish_connection_test(result);
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) => {
                        if handle_key_event(&mut app, key).await {
                            should_quit = true;
                        }
                    }
                    Some(_) => {}
                    None => should_quit = true,
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &app))?;
    }

    input_shutdown.cancel();
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &AppState) {
    let area = frame.area();
    let [tabs_area, notice_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(4),
    ])
    .areas(area);

    draw_tabs(frame, tabs_area, app.current_tab);
    draw_notification(frame, notice_area, app.notification.as_ref());

    match app.current_tab {
        Tab::Accounts => draw_account_list(frame, body_area, &app.accounts),
        Tab::Connect => draw_connect_form(frame, body_area, &app.session, app.field_focus),
        Tab::Guide => draw_guide(frame, body_area, app.session.platform()),
        Tab::Logs => draw_logs(frame, body_area, &app.log_buffer),
    }

    draw_footer(frame, footer_area, app);

    if let Some(modal) = app.edit_modal.as_ref() {
        draw_edit_modal(frame, centered_rect(area, 70, 80), modal);
    }
}

fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key = |label: &'static str| Span::styled(label, key_style);

    let line1 = Line::from(vec![
        key("[F1-F4]"),
        Span::raw(" Tabs  "),
        key("[Ctrl-C]"),
        Span::raw(" Quit  "),
        Span::raw(format!("Status: {}", app.status_message)),
    ]);
    let line2 = if app.edit_modal.is_some() {
        Line::from(vec![
            key("[Tab/Up/Down]"),
            Span::raw(" Field  "),
            key("[Space]"),
            Span::raw(" Toggle  "),
            key("[F7]"),
            Span::raw(" Show secret  "),
            key("[Enter]"),
            Span::raw(" Save  "),
            key("[Esc]"),
            Span::raw(" Cancel"),
        ])
    } else {
        match app.current_tab {
            Tab::Accounts => Line::from(vec![
                key("[Up/Down]"),
                Span::raw(" Select  "),
                key("[e]"),
                Span::raw(" Edit  "),
                key("[a]"),
                Span::raw(" Add  "),
                key("[r]"),
                Span::raw(" Refresh  "),
                key("[q]"),
                Span::raw(" Quit"),
            ]),
            Tab::Connect => {
                let save = if app.session.can_save() {
                    Span::raw(" Save  ")
                } else {
                    Span::styled(" Save (test first)  ", Style::default().fg(Color::DarkGray))
                };
                Line::from(vec![
                    key("[PgUp/PgDn]"),
                    Span::raw(" Platform  "),
                    key("[Tab]"),
                    Span::raw(" Field  "),
                    key("[F5]"),
                    Span::raw(" Test  "),
                    key("[F6]"),
                    save,
                    key("[F7]"),
                    Span::raw(" Show secret  "),
                    key("[Esc]"),
                    Span::raw(" Back"),
                ])
            }
            Tab::Guide | Tab::Logs => Line::from(vec![
                key("[Left/Right]"),
                Span::raw(" Platform  "),
                key("[Tab]"),
                Span::raw(" Next tab  "),
                key("[q]"),
                Span::raw(" Quit"),
            ]),
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(vec![line1, line2]))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn accent_color(name: &str) -> Color {
    Color::from_str(name).unwrap_or(Color::Cyan)
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
