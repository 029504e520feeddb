/*
[INPUT]:  API client, connection tester, platform schemas, log buffer
[OUTPUT]: AppState helpers for TUI rendering and account flows
[POS]:    TUI app state
[UPDATE]: When adding tabs, modals, or app-level actions
[UPDATE]: 2026-10-06 Run connection tests on a spawned task reporting over a channel
*/

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use reelbrand_adapter::ReelbrandClient;
use reelbrand_dashboard::accounts::AccountList;
use reelbrand_dashboard::connection::{ConnectionError, ConnectionTester};
use reelbrand_dashboard::edit::AccountEditor;
use reelbrand_dashboard::form::FormInput;
use reelbrand_dashboard::notify::Notification;
use reelbrand_dashboard::OnboardingSession;

use crate::tui::LogBufferHandle;

pub(super) type TestResult = Result<(), ConnectionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Accounts,
    Connect,
    Guide,
    Logs,
}

impl Tab {
    pub(super) const ALL: [Tab; 4] = [Tab::Accounts, Tab::Connect, Tab::Guide, Tab::Logs];

    pub(super) fn title(self) -> &'static str {
        match self {
            Tab::Accounts => "Accounts",
            Tab::Connect => "Add Account",
            Tab::Guide => "Setup Guide",
            Tab::Logs => "Logs",
        }
    }

    pub(super) fn index(self) -> usize {
        Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

pub(super) struct EditModal {
    pub(super) editor: AccountEditor,
    pub(super) focus: usize,
}

impl EditModal {
    pub(super) fn move_focus(&mut self, delta: isize) {
        self.focus = wrap(self.focus, delta, self.editor.fields().len());
    }
}

pub(super) struct AppState {
    pub(super) client: ReelbrandClient,
    pub(super) tester: Arc<dyn ConnectionTester>,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) accounts: AccountList,
    pub(super) session: OnboardingSession,
    pub(super) field_focus: usize,
    pub(super) current_tab: Tab,
    pub(super) status_message: String,
    pub(super) notification: Option<Notification>,
    pub(super) edit_modal: Option<EditModal>,
    test_tx: mpsc::UnboundedSender<TestResult>,
}

impl AppState {
    pub(super) fn new(
        client: ReelbrandClient,
        tester: Arc<dyn ConnectionTester>,
        session: OnboardingSession,
        log_buffer: LogBufferHandle,
        test_tx: mpsc::UnboundedSender<TestResult>,
    ) -> Self {
        Self {
            client,
            tester,
            log_buffer,
            accounts: AccountList::new(),
            session,
            field_focus: 0,
            current_tab: Tab::Accounts,
            status_message: "Ready".to_string(),
            notification: None,
            edit_modal: None,
            test_tx,
        }
    }

    pub(super) fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    pub(super) fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
    }

    pub(super) async fn refresh_accounts(&mut self) {
        self.accounts.refresh(&self.client).await;
        self.status_message = format!("{} account(s)", self.accounts.accounts().len());
    }

    pub(super) fn move_field_focus(&mut self, delta: isize) {
        let count = self.session.platform().fields.len();
        self.field_focus = wrap(self.field_focus, delta, count);
    }

    pub(super) fn switch_platform(&mut self, step: isize) {
        if !self.session.cycle_platform(step) {
            self.status_message = "wait for the connection test to finish".to_string();
            return;
        }
        self.field_focus = 0;
        self.status_message = format!("Platform: {}", self.session.platform().name);
    }

    pub(super) fn input(&mut self, input: FormInput) {
        self.session.apply(self.field_focus, input);
    }

    pub(super) fn start_connection_test(&mut self) {
        let Some((platform, form)) = self.session.begin_connection_test() else {
            self.pull_notifications();
            return;
        };
        self.status_message = format!("Testing {} connection...", platform.name);
        let tester = self.tester.clone();
        let tx = self.test_tx.clone();
        tokio::spawn(async move {
            let result = tester.test_connection(&platform, &form).await;
            let _ = tx.send(result);
        });
    }

    pub(super) fn finish_connection_test(&mut self, result: TestResult) {
        self.session.finish_connection_test(result);
        self.status_message = self.session.status().label().to_string();
        self.pull_notifications();
    }

    pub(super) async fn save_account(&mut self) {
        let saved = self.session.save(&self.client).await;
        self.pull_notifications();
        if saved.is_ok() {
            self.refresh_accounts().await;
            self.set_tab(Tab::Accounts);
        }
    }

    pub(super) async fn open_edit_selected(&mut self) {
        let Some(account_id) = self.accounts.selected().and_then(|account| account.id()) else {
            self.status_message = "no account selected".to_string();
            return;
        };
        match AccountEditor::load(&self.client, &account_id).await {
            Ok(editor) => {
                self.edit_modal = Some(EditModal { editor, focus: 0 });
            }
            Err(err) => {
                warn!(account_id = %account_id, error = %err, "failed to load account");
                let description = if err.is_not_found() {
                    "This account no longer exists."
                } else {
                    "Failed to load account settings."
                };
                self.notification = Some(Notification::destructive("Error", description));
            }
        }
    }

    pub(super) async fn save_edit(&mut self) {
        let Some(modal) = self.edit_modal.as_ref() else {
            return;
        };
        let notification = modal.editor.save(&self.client).await;
        let failed = notification.is_destructive();
        self.notification = Some(notification);
        if !failed {
            self.close_modal();
            self.refresh_accounts().await;
        }
    }

    pub(super) fn close_modal(&mut self) {
        self.edit_modal = None;
    }

    /// Only the most recent notification is shown
    fn pull_notifications(&mut self) {
        if let Some(latest) = self.session.take_notifications().pop() {
            self.notification = Some(latest);
        }
    }
}

fn wrap(current: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (current as isize + delta).rem_euclid(count as isize) as usize
}
