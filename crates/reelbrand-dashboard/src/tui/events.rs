/*
[INPUT]:  Crossterm key events
[OUTPUT]: AppState mutations and quit requests
[POS]:    TUI key routing
[UPDATE]: When changing keybindings
*/

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use reelbrand_dashboard::FieldKind;
use reelbrand_dashboard::form::FormInput;

use super::app::{AppState, EditModal, Tab};

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) async fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    if app.edit_modal.is_some() {
        handle_modal_key_event(app, key).await;
        return false;
    }

    let tab = match key.code {
        KeyCode::F(1) => Some(Tab::Accounts),
        KeyCode::F(2) => Some(Tab::Connect),
        KeyCode::F(3) => Some(Tab::Guide),
        KeyCode::F(4) => Some(Tab::Logs),
        _ => None,
    };
    if let Some(tab) = tab {
        app.set_tab(tab);
        return false;
    }

    match app.current_tab {
        Tab::Accounts => handle_accounts_key(app, key.code).await,
        Tab::Connect => {
            handle_connect_key(app, key.code).await;
            false
        }
        Tab::Guide | Tab::Logs => handle_browse_key(app, key.code),
    }
}

async fn handle_accounts_key(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('r') => app.refresh_accounts().await,
        KeyCode::Char('a') => app.set_tab(Tab::Connect),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_selected().await,
        KeyCode::Up => app.accounts.move_selection(-1),
        KeyCode::Down => app.accounts.move_selection(1),
        KeyCode::Tab => app.next_tab(),
        _ => {}
    }
    false
}

fn handle_browse_key(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.next_tab(),
        KeyCode::Esc => app.set_tab(Tab::Accounts),
        KeyCode::PageUp | KeyCode::Left => app.switch_platform(-1),
        KeyCode::PageDown | KeyCode::Right => app.switch_platform(1),
        _ => {}
    }
    false
}

async fn handle_connect_key(app: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Esc => app.set_tab(Tab::Accounts),
        KeyCode::Tab | KeyCode::Down => app.move_field_focus(1),
        KeyCode::BackTab | KeyCode::Up => app.move_field_focus(-1),
        KeyCode::PageUp => app.switch_platform(-1),
        KeyCode::PageDown => app.switch_platform(1),
        KeyCode::F(5) => app.start_connection_test(),
        KeyCode::F(6) => app.save_account().await,
        other => {
            if let Some(input) = form_input(other) {
                app.input(input);
            }
        }
    }
}

async fn handle_modal_key_event(app: &mut AppState, key: KeyEvent) {
    let Some(modal) = app.edit_modal.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => app.close_modal(),
        KeyCode::Tab | KeyCode::Down => modal.move_focus(1),
        KeyCode::BackTab | KeyCode::Up => modal.move_focus(-1),
        KeyCode::Enter if focused_textarea(modal) => {
            let focus = modal.focus;
            modal.editor.apply(focus, FormInput::Newline);
        }
        KeyCode::Enter | KeyCode::F(6) => app.save_edit().await,
        other => {
            if let Some(input) = form_input(other) {
                let focus = modal.focus;
                modal.editor.apply(focus, input);
            }
        }
    }
}

fn focused_textarea(modal: &EditModal) -> bool {
    modal
        .editor
        .fields()
        .get(modal.focus)
        .is_some_and(|field| field.kind == FieldKind::Textarea)
}

fn form_input(key: KeyCode) -> Option<FormInput> {
    match key {
        KeyCode::Enter => Some(FormInput::Newline),
        KeyCode::Char(ch) => Some(FormInput::Char(ch)),
        KeyCode::Backspace => Some(FormInput::Backspace),
        KeyCode::Delete => Some(FormInput::Clear),
        KeyCode::Right => Some(FormInput::NextOption),
        KeyCode::Left => Some(FormInput::PrevOption),
        KeyCode::F(7) => Some(FormInput::RevealSecret),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use reelbrand_adapter::{Platform, ReelbrandClient};
    use reelbrand_dashboard::{ConnectionStatus, OnboardingSession, Platforms, SimulatedConnectionTester};
    use tokio::sync::mpsc;

    use crate::tui::app::TestResult;
    use crate::tui::LogBuffer;

    fn app() -> (AppState, mpsc::UnboundedReceiver<TestResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = ReelbrandClient::new("http://127.0.0.1:9").expect("client");
        let tester = Arc::new(SimulatedConnectionTester::new(Duration::ZERO, 1.0));
        let session = OnboardingSession::new(Platforms::builtin(), true);
        let log_buffer = Arc::new(Mutex::new(LogBuffer::new(16)));
        (AppState::new(client, tester, session, log_buffer, tx), rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            handle_key_event(app, press(KeyCode::Char(ch))).await;
        }
    }

    #[tokio::test]
    async fn test_typing_fills_focused_field() {
        let (mut app, _rx) = app();
        handle_key_event(&mut app, press(KeyCode::F(2))).await;
        type_text(&mut app, "quick").await;
        assert_eq!(app.session.form().text("businessName"), Some("quick"));
        assert_eq!(app.current_tab, Tab::Connect);
    }

    #[tokio::test]
    async fn test_q_quits_outside_form_only() {
        let (mut app, _rx) = app();
        assert!(handle_key_event(&mut app, press(KeyCode::Char('q'))).await);
        app.set_tab(Tab::Connect);
        assert!(!handle_key_event(&mut app, press(KeyCode::Char('q'))).await);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key_event(&mut app, ctrl_c).await);
    }

    #[tokio::test]
    async fn test_page_down_switches_platform_and_resets_focus() {
        let (mut app, _rx) = app();
        app.set_tab(Tab::Connect);
        handle_key_event(&mut app, press(KeyCode::Down)).await;
        assert_eq!(app.field_focus, 1);
        handle_key_event(&mut app, press(KeyCode::PageDown)).await;
        assert_eq!(app.session.platform().platform, Platform::Facebook);
        assert_eq!(app.field_focus, 0);
    }

    #[tokio::test]
    async fn test_reveal_toggles_only_focused_secret() {
        let (mut app, _rx) = app();
        app.set_tab(Tab::Connect);
        app.field_focus = 2;
        type_text(&mut app, "tok").await;
        handle_key_event(&mut app, press(KeyCode::F(7))).await;
        assert!(app.session.form().is_revealed("longLivedToken"));
        assert_eq!(app.session.form().text("longLivedToken"), Some("tok"));
    }

    #[tokio::test]
    async fn test_enter_adds_newline_to_textarea_only() {
        let (mut app, _rx) = app();
        app.set_tab(Tab::Connect);
        let caption = app
            .session
            .platform()
            .fields
            .iter()
            .position(|field| field.id == "captionTemplate")
            .expect("caption field");
        app.field_focus = caption;
        type_text(&mut app, "a").await;
        handle_key_event(&mut app, press(KeyCode::Enter)).await;
        type_text(&mut app, "b").await;
        assert_eq!(app.session.form().text("captionTemplate"), Some("a\nb"));

        app.field_focus = 0;
        handle_key_event(&mut app, press(KeyCode::Enter)).await;
        assert!(!app.session.form().is_set("businessName"));
    }

    #[tokio::test]
    async fn test_platform_switch_refused_while_testing() {
        let (mut app, _rx) = app();
        app.set_tab(Tab::Connect);
        for (index, value) in [(0, "brand"), (1, "1784"), (2, "token")] {
            app.field_focus = index;
            type_text(&mut app, value).await;
        }
        handle_key_event(&mut app, press(KeyCode::F(5))).await;
        assert!(app.session.status().is_testing());

        handle_key_event(&mut app, press(KeyCode::PageDown)).await;
        assert_eq!(app.session.platform().platform, Platform::Instagram);
        assert!(app.session.status().is_testing());
    }

    #[tokio::test]
    async fn test_connection_test_reports_over_channel() {
        let (mut app, mut rx) = app();
        app.set_tab(Tab::Connect);
        for (index, value) in [(0, "brand"), (1, "1784"), (2, "token")] {
            app.field_focus = index;
            type_text(&mut app, value).await;
        }
        handle_key_event(&mut app, press(KeyCode::F(5))).await;
        assert_eq!(app.session.status(), ConnectionStatus::Testing);

        let result = rx.recv().await.expect("test result");
        app.finish_connection_test(result);
        assert_eq!(app.session.status(), ConnectionStatus::Success);
        assert_eq!(
            app.notification.as_ref().map(|n| n.title.as_str()),
            Some("Connection successful")
        );
    }

    #[tokio::test]
    async fn test_connection_test_refused_when_fields_missing() {
        let (mut app, _rx) = app();
        app.set_tab(Tab::Connect);
        handle_key_event(&mut app, press(KeyCode::F(5))).await;
        assert_eq!(app.session.status(), ConnectionStatus::Idle);
        assert!(app.session.highlighted().contains("businessName"));
        assert!(app.notification.as_ref().is_some_and(|n| n.is_destructive()));
    }
}
