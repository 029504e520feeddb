/*
[INPUT]:  OnboardingSession and focused field index
[OUTPUT]: Platform selector, schema-driven form, and connection status panel
[POS]:    TUI UI add-account tab
[UPDATE]: When changing the onboarding layout
*/

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use reelbrand_dashboard::{ConnectionStatus, OnboardingSession};

use super::fields::{draw_field_help, draw_fields};
use crate::tui::runtime::{accent_color, border_style};

pub(in crate::tui) fn draw_connect_form(
    frame: &mut ratatui::Frame,
    area: Rect,
    session: &OnboardingSession,
    focus: usize,
) {
    let [selector_area, main_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(6)]).areas(area);
    let [fields_area, side_area] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(main_area);
    let [status_area, help_area] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(3)]).areas(side_area);

    let current = session.platform();
    let accent = accent_color(&current.accent);

    let mut names = Vec::new();
    for (index, def) in session.platforms().iter().enumerate() {
        let style = if index == session.selected_index() {
            Style::default()
                .fg(Color::Black)
                .bg(accent_color(&def.accent))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent_color(&def.accent))
        };
        names.push(Span::styled(format!(" {} ", def.name), style));
        names.push(Span::raw(" "));
    }
    let selector = Paragraph::new(vec![
        Line::from(names),
        Line::from(Span::styled(
            current.description.clone(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Platform"),
    );
    frame.render_widget(selector, selector_area);

    let rendered = session.rendered();
    let fields_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(format!("{} credentials", current.name));
    draw_fields(frame, fields_area, fields_block, &rendered, focus);

    let status_color = match session.status() {
        ConnectionStatus::Idle => Color::Gray,
        ConnectionStatus::Testing => Color::Yellow,
        ConnectionStatus::Success => Color::LightGreen,
        ConnectionStatus::Error => Color::LightRed,
    };
    let save_line = if session.can_save() {
        Line::from(Span::styled("Ready to save", Style::default().fg(Color::LightGreen)))
    } else if session.require_connection_test() {
        Line::from(Span::styled(
            "Save unlocks after a successful test",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from("")
    };
    let status = Paragraph::new(vec![
        Line::from(Span::styled(
            session.status().label(),
            Style::default().fg(status_color).add_modifier(Modifier::BOLD),
        )),
        save_line,
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Connection"),
    );
    frame.render_widget(status, status_area);

    let help_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Field");
    draw_field_help(frame, help_area, help_block, rendered.get(focus));
}
