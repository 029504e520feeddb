/*
[INPUT]:  Platform definitions, user edits, ConnectionTester, ReelbrandClient
[OUTPUT]: Onboarding flow state: selection, form, highlights, status, notifications
[POS]:    Onboarding - account connection state machine
[UPDATE]: When changing the validate -> test -> save flow
[UPDATE]: 2026-10-05 Split connection test into begin/finish for the TUI task
[UPDATE]: 2026-10-17 Lock platform while testing, route every edit through the session
*/

use std::collections::BTreeSet;

use reelbrand_adapter::{Platform, ReelbrandClient, ReelbrandError};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::connection::{ConnectionError, ConnectionStatus, ConnectionTester};
use crate::form::{FieldValue, FormInput, FormState, apply_input};
use crate::notify::Notification;
use crate::render::{RenderedField, render_fields};
use crate::schema::{PlatformDefinition, Platforms};
use crate::submission::build_request;
use crate::validation::{MissingRequiredFields, validate_required};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] MissingRequiredFields),

    #[error("test the connection successfully before saving")]
    ConnectionNotVerified,

    #[error("a connection test is still running")]
    Busy,

    #[error(transparent)]
    Backend(#[from] ReelbrandError),
}

#[derive(Debug, Clone)]
pub struct OnboardingSession {
    platforms: Platforms,
    selected: usize,
    form: FormState,
    highlighted: BTreeSet<String>,
    status: ConnectionStatus,
    notifications: Vec<Notification>,
    require_connection_test: bool,
    edited_during_test: bool,
}

impl OnboardingSession {
    pub fn new(platforms: Platforms, require_connection_test: bool) -> Self {
        Self {
            platforms,
            selected: 0,
            form: FormState::new(),
            highlighted: BTreeSet::new(),
            status: ConnectionStatus::Idle,
            notifications: Vec::new(),
            require_connection_test,
            edited_during_test: false,
        }
    }

    pub fn platforms(&self) -> &Platforms {
        &self.platforms
    }

    pub fn platform(&self) -> &PlatformDefinition {
        self.platforms.nth_clamped(self.selected)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Switch platforms. Form values are kept; only the new platform's fields are shown.
    ///
    /// Refused while a connection test is running, so a result always lands on the
    /// platform it was started for.
    pub fn select_platform(&mut self, platform: Platform) -> bool {
        if self.status.is_testing() {
            return false;
        }
        match self.platforms.position(platform) {
            Some(index) => {
                self.selected = index;
                self.highlighted.clear();
                self.status = ConnectionStatus::Idle;
                true
            }
            None => false,
        }
    }

    pub fn cycle_platform(&mut self, step: isize) -> bool {
        let count = self.platforms.len() as isize;
        if count == 0 {
            return false;
        }
        let next = (self.selected as isize + step).rem_euclid(count) as usize;
        match self.platforms.at(next).map(|def| def.platform) {
            Some(platform) => self.select_platform(platform),
            None => false,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Apply an edit to the field at `index` of the current platform
    pub fn apply(&mut self, index: usize, input: FormInput) -> bool {
        let Some(field) = self.platform().fields.get(index).cloned() else {
            return false;
        };
        let changed = apply_input(&field, &mut self.form, input);
        if changed && input != FormInput::RevealSecret {
            self.field_edited(&field.id);
        }
        changed
    }

    /// Store a whole value for `id`. Read-only fields of the current platform are left alone.
    pub fn set_value(&mut self, id: &str, value: impl Into<FieldValue>) -> bool {
        if self.platform().field(id).is_some_and(|field| field.read_only) {
            return false;
        }
        let value: FieldValue = value.into();
        if self.form.get(id) == Some(&value) {
            return false;
        }
        self.form.set(id, value);
        self.field_edited(id);
        true
    }

    /// Edited credentials have not been tested yet
    fn field_edited(&mut self, id: &str) {
        self.highlighted.remove(id);
        match self.status {
            ConnectionStatus::Success => self.status = ConnectionStatus::Idle,
            ConnectionStatus::Testing => self.edited_during_test = true,
            ConnectionStatus::Idle | ConnectionStatus::Error => {}
        }
    }

    pub fn highlighted(&self) -> &BTreeSet<String> {
        &self.highlighted
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn require_connection_test(&self) -> bool {
        self.require_connection_test
    }

    pub fn rendered(&self) -> Vec<RenderedField<'_>> {
        render_fields(&self.platform().fields, &self.form, &self.highlighted)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Required-field check. Failing fields are highlighted and one notification is raised.
    pub fn validate(&mut self) -> Result<(), MissingRequiredFields> {
        let platform = self.platform().clone();
        match validate_required(&platform.fields, &self.form) {
            Ok(()) => {
                self.highlighted.clear();
                Ok(())
            }
            Err(err) => {
                self.highlighted = err.missing.clone();
                let labels = err.labels(&platform.fields).join(", ");
                self.notify(Notification::destructive(
                    "Missing required fields",
                    format!("Please fill in: {labels}"),
                ));
                Err(err)
            }
        }
    }

    /// Validate and enter Testing. Returns what the tester needs, or None when refused.
    pub fn begin_connection_test(&mut self) -> Option<(PlatformDefinition, FormState)> {
        if self.status.is_testing() || self.validate().is_err() {
            return None;
        }
        self.status = ConnectionStatus::Testing;
        self.edited_during_test = false;
        Some((self.platform().clone(), self.form.clone()))
    }

    pub fn finish_connection_test(&mut self, result: Result<(), ConnectionError>) {
        if !self.status.is_testing() {
            return;
        }
        let name = self.platform().name.clone();
        if std::mem::take(&mut self.edited_during_test) {
            info!(platform = %name, "credentials changed during the connection test");
            self.status = ConnectionStatus::Idle;
            self.notify(Notification::destructive(
                "Connection not verified",
                "Credentials changed while testing. Please test again.",
            ));
            return;
        }
        match result {
            Ok(()) => {
                self.status = ConnectionStatus::Success;
                self.notify(Notification::info(
                    "Connection successful",
                    format!("{name} credentials verified."),
                ));
            }
            Err(err) => {
                warn!(platform = %name, error = %err, "connection test failed");
                self.status = ConnectionStatus::Error;
                self.notify(Notification::destructive(
                    "Connection failed",
                    "Please check your credentials and try again.",
                ));
            }
        }
    }

    pub async fn test_connection(&mut self, tester: &dyn ConnectionTester) -> ConnectionStatus {
        if let Some((platform, form)) = self.begin_connection_test() {
            let result = tester.test_connection(&platform, &form).await;
            self.finish_connection_test(result);
        }
        self.status
    }

    pub fn can_save(&self) -> bool {
        !self.status.is_testing()
            && (!self.require_connection_test || self.status == ConnectionStatus::Success)
    }

    /// Validate, then POST the platform payload. A failure leaves the form intact.
    pub async fn save(&mut self, client: &ReelbrandClient) -> Result<Value, SaveError> {
        if self.status.is_testing() {
            return Err(SaveError::Busy);
        }
        self.validate()?;
        if !self.can_save() {
            self.notify(Notification::destructive(
                "Connection not verified",
                "Test the connection before saving this account.",
            ));
            return Err(SaveError::ConnectionNotVerified);
        }

        let platform = self.platform().platform;
        let name = self.platform().name.clone();
        let request = build_request(platform, &self.form);
        match client.create_account(&request).await {
            Ok(response) => {
                info!(%platform, "account saved");
                self.notify(Notification::info(
                    "Account saved",
                    format!("Your {name} account has been connected."),
                ));
                Ok(response)
            }
            Err(err) => {
                warn!(%platform, error = %err, "saving account failed");
                self.notify(Notification::destructive(
                    "Error",
                    format!("Failed to save your {name} account. Please try again."),
                ));
                Err(SaveError::Backend(err))
            }
        }
    }
}
