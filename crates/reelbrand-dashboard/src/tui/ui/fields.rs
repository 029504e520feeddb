/*
[INPUT]:  RenderedField descriptions and the focused index
[OUTPUT]: Field rows shared by the onboarding form and the edit modal
[POS]:    TUI UI field list rendering
[UPDATE]: When render::Control gains variants
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use reelbrand_dashboard::render::{Control, InputType, RenderedField};

pub(super) fn draw_fields(
    frame: &mut ratatui::Frame,
    area: Rect,
    block: Block,
    fields: &[RenderedField],
    focus: usize,
) {
    let visible = area.height.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    let mut focus_line = 0;
    for (index, field) in fields.iter().enumerate() {
        if index == focus {
            focus_line = lines.len();
        }
        lines.push(field_line(field, index == focus));
        if let Some(help) = field.help() {
            lines.push(Line::from(Span::styled(
                format!("    {help}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    let offset = focus_line.saturating_sub(visible.saturating_sub(2));
    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((offset as u16, 0));
    frame.render_widget(widget, area);
}

/// Control hint for the focused field
pub(super) fn draw_field_help(frame: &mut ratatui::Frame, area: Rect, block: Block, field: Option<&RenderedField>) {
    let mut lines = Vec::new();
    if let Some(field) = field {
        lines.push(Line::from(Span::styled(
            control_hint(&field.control),
            Style::default().fg(Color::DarkGray),
        )));
        if field.field.read_only {
            lines.push(Line::from(Span::styled(
                "Read only",
                Style::default().fg(Color::Yellow),
            )));
        }
    }
    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn field_line(field: &RenderedField, focused: bool) -> Line<'static> {
    let mut label_style = Style::default().add_modifier(Modifier::BOLD);
    if field.highlighted {
        label_style = label_style.fg(Color::LightRed);
    }
    let marker = if focused { "> " } else { "  " };

    let value = match field.placeholder() {
        Some(placeholder) => Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
        None => Span::raw(field.display.replace('\n', " ↵ ")),
    };
    let mut value_style = Style::default();
    if focused {
        value_style = value_style.add_modifier(Modifier::REVERSED);
    }
    if field.field.read_only {
        value_style = value_style.fg(Color::DarkGray);
    }

    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{}: ", field.label()), label_style),
        value.patch_style(value_style),
    ])
}

fn control_hint(control: &Control) -> &'static str {
    match control {
        Control::Input { input_type: InputType::Date } => "Date (YYYY-MM-DD)",
        Control::Input { input_type: InputType::Email } => "Email address",
        Control::Input { input_type: InputType::Text } => "Text",
        Control::Secret { revealed: true } => "Secret (shown) - F7 to hide",
        Control::Secret { revealed: false } => "Secret (hidden) - F7 to show",
        Control::TextArea => "Multi-line text - Enter for a new line",
        Control::Checkbox { .. } => "Space to toggle",
        Control::Select { .. } => "Left/Right to choose",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::widgets::Borders;

    use reelbrand_adapter::Platform;
    use reelbrand_dashboard::Platforms;
    use reelbrand_dashboard::form::FormState;
    use reelbrand_dashboard::render::render_fields;

    use super::*;

    fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_help_is_drawn_under_its_field() {
        let platforms = Platforms::builtin();
        let instagram = platforms.get(Platform::Instagram).expect("instagram");
        let rendered = render_fields(&instagram.fields, &FormState::new(), &BTreeSet::new());

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_fields(frame, area, Block::default().borders(Borders::ALL), &rendered, 0);
            })
            .expect("draw");

        let rows = rows(&terminal);
        let token_row = rows
            .iter()
            .position(|row| row.contains("Long-Lived Access Token"))
            .expect("token row");
        assert!(rows[token_row + 1].contains("Long-lived tokens expire every 60 days"));
    }
}
