/*
[INPUT]:  AppState parts and engine view models
[OUTPUT]: Panel render functions for each tab and the edit modal
[POS]:    TUI UI module root
[UPDATE]: When adding panels
*/

mod accounts;
mod edit_modal;
mod fields;
mod form;
mod guide;
mod layout;
mod logs;

pub(in crate::tui) use accounts::draw_account_list;
pub(in crate::tui) use edit_modal::draw_edit_modal;
pub(in crate::tui) use form::draw_connect_form;
pub(in crate::tui) use guide::draw_guide;
pub(in crate::tui) use layout::{draw_notification, draw_tabs};
pub(in crate::tui) use logs::draw_logs;
