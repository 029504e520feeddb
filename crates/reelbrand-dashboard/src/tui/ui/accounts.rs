/*
[INPUT]:  AccountList view model
[OUTPUT]: Account list and selected account card
[POS]:    TUI UI accounts tab
[UPDATE]: When account card contents change
*/

use chrono::Local;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use reelbrand_adapter::AccountStatus;
use reelbrand_dashboard::accounts::{AccountList, AccountListState, EMPTY_ACCOUNTS_MESSAGE, summarize};

use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_account_list(frame: &mut ratatui::Frame, area: Rect, list: &AccountList) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Connected Accounts");

    let accounts = match list.state() {
        AccountListState::Loading => {
            let widget = Paragraph::new("Loading accounts...")
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(widget, area);
            return;
        }
        AccountListState::Empty => {
            let widget = Paragraph::new(vec![
                Line::from(EMPTY_ACCOUNTS_MESSAGE),
                Line::from(""),
                Line::from(Span::styled(
                    "Press [a] to add an account",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(block)
            .alignment(Alignment::Center);
            frame.render_widget(widget, area);
            return;
        }
        AccountListState::Loaded(accounts) => accounts,
    };

    let [list_area, card_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);

    let today = Local::now().date_naive();
    let items: Vec<ListItem> = accounts
        .iter()
        .map(|account| {
            let summary = summarize(account, today);
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(status_color(summary.status))),
                Span::raw(summary.title),
                Span::styled(
                    format!(" ({})", summary.platform),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(list.selected_index()));
    let widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(widget, list_area, &mut state);

    let Some(account) = list.selected() else {
        return;
    };
    let summary = summarize(account, today);
    let mut lines = vec![
        Line::from(Span::styled(
            summary.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(format!("{}  ", summary.platform)),
            Span::styled(
                summary.status.label(),
                Style::default().fg(status_color(summary.status)),
            ),
        ]),
        Line::from(""),
    ];
    for (label, value) in &summary.stats {
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<12}"), Style::default().fg(Color::Gray)),
            Span::raw(value.clone()),
        ]));
    }
    if let Some(expiry) = &summary.token_expiry {
        let style = if expiry.needs_attention() {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(expiry.label(), style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[e] Edit settings",
        Style::default().fg(Color::DarkGray),
    )));

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Account"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(card, card_area);
}

fn status_color(status: AccountStatus) -> Color {
    match status {
        AccountStatus::Connected => Color::LightGreen,
        AccountStatus::Syncing => Color::Yellow,
        AccountStatus::Error => Color::LightRed,
        AccountStatus::Unknown => Color::Gray,
    }
}
