/*
[INPUT]:  Account fetched from GET /accounts/{id} and user edits
[OUTPUT]: Merged account object sent back with PATCH /accounts/{id}
[POS]:    Accounts view - edit account settings form
[UPDATE]: When editable account settings change
*/

use std::collections::BTreeSet;

use reelbrand_adapter::{Account, AccountPatch, ReelbrandClient, ReelbrandError};
use serde_json::Value;
use tracing::{info, warn};

use crate::form::{FieldValue, FormInput, FormState, apply_input};
use crate::notify::Notification;
use crate::render::{RenderedField, render_fields};
use crate::schema::{FieldDefinition, FieldKind};

pub fn edit_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("instagram_username", "Username", FieldKind::Text),
        FieldDefinition::new("instagram_id", "Instagram ID", FieldKind::Text).read_only(),
        FieldDefinition::new("page_id", "Page ID", FieldKind::Text).read_only(),
        FieldDefinition::new("reminder_email", "Reminder Email", FieldKind::Email)
            .placeholder("user@example.com"),
        FieldDefinition::new("access_token", "Access Token", FieldKind::Password),
        FieldDefinition::new("token_expiry_date", "Token Expiry Date", FieldKind::Date),
        FieldDefinition::new("caption_template", "Caption Template", FieldKind::Textarea),
        FieldDefinition::new("hashtag_presets", "Hashtag Presets", FieldKind::Multitag),
        FieldDefinition::new("post_as_reel", "Post as Reel", FieldKind::Toggle),
        FieldDefinition::new("post_to_feed", "Post to Feed", FieldKind::Toggle),
        FieldDefinition::new("auto_upload", "Auto Upload", FieldKind::Toggle),
        FieldDefinition::new(
            "preferred_upload_time",
            "Preferred Upload Time",
            FieldKind::Text,
        )
        .placeholder("18:00"),
    ]
}

#[derive(Debug, Clone)]
pub struct AccountEditor {
    account_id: String,
    original: Account,
    fields: Vec<FieldDefinition>,
    form: FormState,
}

impl AccountEditor {
    pub async fn load(client: &ReelbrandClient, account_id: &str) -> Result<Self, ReelbrandError> {
        let account = client.get_account(account_id).await?;
        Ok(Self::from_account(account_id, account))
    }

    pub fn from_account(account_id: &str, account: Account) -> Self {
        let fields = edit_fields();
        let form = FormState::from_json(&fields, account.as_map());
        Self {
            account_id: account_id.to_string(),
            original: account,
            fields,
            form,
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn title(&self) -> String {
        self.original.display_name()
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn apply(&mut self, index: usize, input: FormInput) -> bool {
        match self.fields.get(index) {
            Some(field) => apply_input(field, &mut self.form, input),
            None => false,
        }
    }

    pub fn rendered(&self) -> Vec<RenderedField<'_>> {
        render_fields(&self.fields, &self.form, &BTreeSet::new())
    }

    /// The fetched object with every edited value written over it
    pub fn to_patch(&self) -> AccountPatch {
        let mut merged = self.original.as_map().clone();
        for field in self.fields.iter().filter(|field| !field.read_only) {
            let value = match self.form.get(&field.id) {
                Some(FieldValue::Text(text)) => Value::String(text.clone()),
                Some(FieldValue::Flag(flag)) => Value::Bool(*flag),
                None => continue,
            };
            merged.insert(field.id.clone(), value);
        }
        AccountPatch(merged)
    }

    pub async fn save(&self, client: &ReelbrandClient) -> Notification {
        match client.update_account(&self.account_id, &self.to_patch()).await {
            Ok(_) => {
                info!(account_id = %self.account_id, "account settings saved");
                Notification::info(
                    "Account updated",
                    "Your account settings have been saved successfully.",
                )
            }
            Err(err) => {
                warn!(account_id = %self.account_id, error = %err, "account update failed");
                Notification::destructive("Error", "Failed to save account settings. Please try again.")
            }
        }
    }
}
