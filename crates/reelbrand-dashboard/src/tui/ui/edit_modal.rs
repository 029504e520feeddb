/*
[INPUT]:  EditModal state
[OUTPUT]: Account settings modal overlay
[POS]:    TUI UI edit account modal
[UPDATE]: When the edit form layout changes
*/

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear};

use super::fields::{draw_field_help, draw_fields};
use crate::tui::app::EditModal;
use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_edit_modal(frame: &mut ratatui::Frame, area: Rect, modal: &EditModal) {
    frame.render_widget(Clear, area);
    let [fields_area, help_area] =
        Layout::vertical([Constraint::Min(6), Constraint::Length(5)]).areas(area);

    let rendered = modal.editor.rendered();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(
            "Edit {} ({})",
            modal.editor.title(),
            modal.editor.account_id()
        ));
    draw_fields(frame, fields_area, block, &rendered, modal.focus);

    let help_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style());
    draw_field_help(frame, help_area, help_block, rendered.get(modal.focus));
}
