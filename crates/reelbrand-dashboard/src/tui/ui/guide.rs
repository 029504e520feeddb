/*
[INPUT]:  PlatformDefinition guide
[OUTPUT]: Numbered setup steps, reference links, notes, and redirect URI
[POS]:    TUI UI setup guide tab
[UPDATE]: When SetupGuide gains sections
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use reelbrand_dashboard::PlatformDefinition;
use reelbrand_dashboard::schema::REDIRECT_URI;

use crate::tui::runtime::accent_color;

pub(in crate::tui) fn draw_guide(frame: &mut ratatui::Frame, area: Rect, def: &PlatformDefinition) {
    let guide = &def.guide;
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled(guide.title.clone(), heading)), Line::from("")];

    for (index, step) in guide.steps.iter().enumerate() {
        lines.push(Line::from(format!("{:>2}. {step}", index + 1)));
    }

    if !guide.urls.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Links", heading)));
        for link in &guide.urls {
            lines.push(Line::from(vec![
                Span::raw(format!("  {}: ", link.label)),
                Span::styled(
                    link.url.clone(),
                    Style::default().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
    }

    if !guide.notes.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Important", heading)));
        for note in &guide.notes {
            lines.push(Line::from(vec![
                Span::styled("  ! ", Style::default().fg(Color::Yellow)),
                Span::raw(note.clone()),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Redirect URI: ", heading),
        Span::styled(REDIRECT_URI, Style::default().fg(Color::LightGreen)),
    ]));

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent_color(&def.accent)))
                .title(format!("{} setup", def.name)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}
