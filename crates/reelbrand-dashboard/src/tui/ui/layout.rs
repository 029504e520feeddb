/*
[INPUT]:  Current tab and latest notification
[OUTPUT]: Tab bar and notification banner
[POS]:    TUI UI layout chrome
[UPDATE]: When adding tabs
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use reelbrand_dashboard::notify::Notification;

use crate::tui::app::Tab;
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_tabs(frame: &mut ratatui::Frame, area: Rect, current_tab: Tab) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(index, tab)| Line::from(format!("F{} {}", index + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("ReelBrand"),
        )
        .highlight_style(header_style())
        .select(current_tab.index());

    frame.render_widget(tabs, area);
}

pub(in crate::tui) fn draw_notification(
    frame: &mut ratatui::Frame,
    area: Rect,
    notification: Option<&Notification>,
) {
    let (line, color) = match notification {
        Some(notification) => {
            let color = if notification.is_destructive() {
                Color::LightRed
            } else {
                Color::LightGreen
            };
            let line = Line::from(vec![
                Span::styled(
                    notification.title.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {}", notification.description)),
            ]);
            (line, color)
        }
        None => (Line::from(""), Color::DarkGray),
    };
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(widget, area);
}
