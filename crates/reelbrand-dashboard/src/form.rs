/*
[INPUT]:  Field definitions and user input events
[OUTPUT]: Sparse form state keyed by field id plus per-field secret visibility
[POS]:    Form engine - state container shared by onboarding and edit forms
[UPDATE]: When adding input kinds or changing how values are stored
*/

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use crate::schema::{FieldDefinition, FieldKind};

/// Value held for one field. An absent key means the field was never set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Empty after trimming for text, false for flags
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Flag(flag) => !flag,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        FieldValue::Flag(flag)
    }
}

/// A single edit coming from whichever front end is driving the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Char(char),
    Backspace,
    Clear,
    Toggle,
    NextOption,
    PrevOption,
    RevealSecret,
    Newline,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
    revealed: BTreeSet<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a backend object, keeping only keys the fields declare
    pub fn from_json(fields: &[FieldDefinition], object: &Map<String, Value>) -> Self {
        let mut state = Self::new();
        for field in fields {
            let value = match object.get(&field.id) {
                Some(Value::Bool(flag)) => FieldValue::Flag(*flag),
                Some(Value::String(text)) if field.kind == FieldKind::Toggle => {
                    FieldValue::Flag(text == "true")
                }
                Some(Value::String(text)) => FieldValue::Text(text.clone()),
                Some(Value::Number(n)) => FieldValue::Text(n.to_string()),
                _ => continue,
            };
            state.values.insert(field.id.clone(), value);
        }
        state
    }

    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.values.get(id).and_then(FieldValue::as_text)
    }

    pub fn flag(&self, id: &str) -> Option<bool> {
        self.values.get(id).and_then(FieldValue::as_flag)
    }

    pub fn is_set(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn set(&mut self, id: &str, value: FieldValue) {
        self.values.insert(id.to_string(), value);
    }

    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        self.set(id, FieldValue::Text(text.into()));
    }

    pub fn set_flag(&mut self, id: &str, flag: bool) {
        self.set(id, FieldValue::Flag(flag));
    }

    /// Flip a flag; an unset flag reads as unchecked
    pub fn toggle_flag(&mut self, id: &str) -> bool {
        let next = !self.flag(id).unwrap_or(false);
        self.set_flag(id, next);
        next
    }

    pub fn push_char(&mut self, id: &str, ch: char) {
        let mut text = self.text(id).unwrap_or_default().to_string();
        text.push(ch);
        self.set_text(id, text);
    }

    /// Removing the last character leaves an explicit empty string, not an unset key
    pub fn pop_char(&mut self, id: &str) {
        if let Some(text) = self.text(id) {
            let mut text = text.to_string();
            text.pop();
            self.set_text(id, text);
        }
    }

    pub fn unset(&mut self, id: &str) {
        self.values.remove(id);
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn toggle_reveal(&mut self, id: &str) -> bool {
        if self.revealed.remove(id) {
            false
        } else {
            self.revealed.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Route one input to the field by its kind. Returns whether anything changed.
pub fn apply_input(field: &FieldDefinition, state: &mut FormState, input: FormInput) -> bool {
    if field.read_only {
        return false;
    }
    match (field.kind, input) {
        (FieldKind::Toggle, FormInput::Toggle | FormInput::Char(' ')) => {
            state.toggle_flag(&field.id);
            true
        }
        (FieldKind::Toggle, _) => false,
        (FieldKind::Dropdown, FormInput::NextOption | FormInput::Toggle | FormInput::Char(' ')) => {
            cycle_option(field, state, 1)
        }
        (FieldKind::Dropdown, FormInput::PrevOption) => cycle_option(field, state, -1),
        (FieldKind::Dropdown, _) => false,
        (FieldKind::Password, FormInput::RevealSecret) => {
            state.toggle_reveal(&field.id);
            true
        }
        (FieldKind::Textarea, FormInput::Newline) => {
            state.push_char(&field.id, '\n');
            true
        }
        (_, FormInput::Newline) => false,
        (_, FormInput::Char(ch)) => {
            state.push_char(&field.id, ch);
            true
        }
        (_, FormInput::Backspace) => {
            let had_text = state.text(&field.id).is_some_and(|text| !text.is_empty());
            state.pop_char(&field.id);
            had_text
        }
        (_, FormInput::Clear) => {
            state.set_text(&field.id, "");
            true
        }
        _ => false,
    }
}

fn cycle_option(field: &FieldDefinition, state: &mut FormState, step: isize) -> bool {
    let count = field.options.len() as isize;
    if count == 0 {
        return false;
    }
    let current = field.option_index(state.text(&field.id)) as isize;
    let next = (current + step).rem_euclid(count) as usize;
    state.set_text(&field.id, field.options[next].value.clone());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DropdownOption;
    use serde_json::json;

    fn privacy_field() -> FieldDefinition {
        FieldDefinition::new("uploadPrivacy", "Privacy", FieldKind::Dropdown).options(vec![
            DropdownOption::new("private", "Private"),
            DropdownOption::new("public", "Public"),
            DropdownOption::new("unlisted", "Unlisted"),
        ])
    }

    #[test]
    fn test_unset_differs_from_empty() {
        let mut state = FormState::new();
        assert!(!state.is_set("appId"));
        state.push_char("appId", 'x');
        state.pop_char("appId");
        assert!(state.is_set("appId"));
        assert_eq!(state.text("appId"), Some(""));
    }

    #[test]
    fn test_toggle_starts_unchecked() {
        let mut state = FormState::new();
        assert!(state.toggle_flag("postAsReel"));
        assert!(!state.toggle_flag("postAsReel"));
        assert_eq!(state.flag("postAsReel"), Some(false));
    }

    #[test]
    fn test_reveal_does_not_touch_value() {
        let mut state = FormState::new();
        state.set_text("longLivedToken", "secret");
        let field = FieldDefinition::new("longLivedToken", "Token", FieldKind::Password);
        assert!(apply_input(&field, &mut state, FormInput::RevealSecret));
        assert!(state.is_revealed("longLivedToken"));
        assert_eq!(state.text("longLivedToken"), Some("secret"));
        assert!(!state.is_revealed("clientSecret"));
    }

    #[test]
    fn test_dropdown_cycles_from_first_option() {
        let field = privacy_field();
        let mut state = FormState::new();
        apply_input(&field, &mut state, FormInput::NextOption);
        assert_eq!(state.text("uploadPrivacy"), Some("public"));
        apply_input(&field, &mut state, FormInput::PrevOption);
        apply_input(&field, &mut state, FormInput::PrevOption);
        assert_eq!(state.text("uploadPrivacy"), Some("unlisted"));
    }

    #[test]
    fn test_read_only_field_ignores_input() {
        let field = FieldDefinition::new("instagram_id", "ID", FieldKind::Text).read_only();
        let mut state = FormState::new();
        state.set_text("instagram_id", "1784");
        assert!(!apply_input(&field, &mut state, FormInput::Char('9')));
        assert_eq!(state.text("instagram_id"), Some("1784"));
    }

    #[test]
    fn test_newline_only_in_textarea() {
        let caption = FieldDefinition::new("captionTemplate", "Caption", FieldKind::Textarea);
        let name = FieldDefinition::new("businessName", "Name", FieldKind::Text);
        let mut state = FormState::new();
        apply_input(&caption, &mut state, FormInput::Char('a'));
        assert!(apply_input(&caption, &mut state, FormInput::Newline));
        apply_input(&caption, &mut state, FormInput::Char('b'));
        assert_eq!(state.text("captionTemplate"), Some("a\nb"));

        assert!(!apply_input(&name, &mut state, FormInput::Newline));
        assert!(!state.is_set("businessName"));
    }

    #[test]
    fn test_unrecognized_kind_accepts_text() {
        let field = FieldDefinition::new("brandColor", "Brand", FieldKind::Unrecognized);
        let mut state = FormState::new();
        apply_input(&field, &mut state, FormInput::Char('#'));
        assert_eq!(state.text("brandColor"), Some("#"));
    }

    #[test]
    fn test_from_json_keeps_declared_keys() {
        let fields = vec![
            FieldDefinition::new("reminder_email", "Email", FieldKind::Email),
            FieldDefinition::new("post_as_reel", "Reel", FieldKind::Toggle),
            FieldDefinition::new("page_id", "Page", FieldKind::Text),
        ];
        let object = json!({
            "reminder_email": "a@b.co",
            "post_as_reel": "true",
            "page_id": 42,
            "followers": 10
        });
        let state = FormState::from_json(&fields, object.as_object().expect("object"));
        assert_eq!(state.text("reminder_email"), Some("a@b.co"));
        assert_eq!(state.flag("post_as_reel"), Some(true));
        assert_eq!(state.text("page_id"), Some("42"));
        assert!(!state.is_set("followers"));
    }
}
