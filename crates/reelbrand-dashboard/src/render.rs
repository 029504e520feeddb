/*
[INPUT]:  PlatformDefinition fields, FormState, highlighted field ids
[OUTPUT]: Front-end neutral description of every control to draw
[POS]:    Form engine - schema to control mapping
[UPDATE]: When a new FieldKind needs its own control
*/

use std::collections::BTreeSet;

use crate::form::FormState;
use crate::schema::{FieldDefinition, FieldKind};

const MASK_CHAR: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Date,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Input { input_type: InputType },
    Secret { revealed: bool },
    TextArea,
    Checkbox { checked: bool },
    Select { selected: usize, labels: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField<'a> {
    pub field: &'a FieldDefinition,
    pub control: Control,
    /// Text the control shows, masked for hidden secrets
    pub display: String,
    pub highlighted: bool,
}

impl RenderedField<'_> {
    pub fn label(&self) -> String {
        if self.field.required {
            format!("{} *", self.field.label)
        } else {
            self.field.label.clone()
        }
    }

    pub fn help(&self) -> Option<&str> {
        self.field.help.as_deref()
    }

    /// Placeholder to show in place of an empty value
    pub fn placeholder(&self) -> Option<&str> {
        if self.display.is_empty() {
            self.field.placeholder.as_deref()
        } else {
            None
        }
    }
}

pub fn render_fields<'a>(
    fields: &'a [FieldDefinition],
    state: &FormState,
    highlighted: &BTreeSet<String>,
) -> Vec<RenderedField<'a>> {
    fields
        .iter()
        .map(|field| render_field(field, state, highlighted.contains(&field.id)))
        .collect()
}

pub fn render_field<'a>(
    field: &'a FieldDefinition,
    state: &FormState,
    highlighted: bool,
) -> RenderedField<'a> {
    let text = state.text(&field.id).unwrap_or_default();
    let (control, display) = match field.kind {
        FieldKind::Toggle => {
            let checked = state.flag(&field.id).unwrap_or(false);
            let mark = if checked { "[x]" } else { "[ ]" };
            (Control::Checkbox { checked }, mark.to_string())
        }
        FieldKind::Password => {
            let revealed = state.is_revealed(&field.id);
            let display = if revealed {
                text.to_string()
            } else {
                MASK_CHAR.to_string().repeat(text.chars().count())
            };
            (Control::Secret { revealed }, display)
        }
        FieldKind::Dropdown => {
            let selected = field.option_index(state.text(&field.id));
            let labels: Vec<String> = field.options.iter().map(|opt| opt.label.clone()).collect();
            let display = labels.get(selected).cloned().unwrap_or_default();
            (Control::Select { selected, labels }, display)
        }
        FieldKind::Textarea => (Control::TextArea, text.to_string()),
        FieldKind::Date => (
            Control::Input {
                input_type: InputType::Date,
            },
            text.to_string(),
        ),
        FieldKind::Email => (
            Control::Input {
                input_type: InputType::Email,
            },
            text.to_string(),
        ),
        // Tags stay a raw string; no tokenization happens here
        FieldKind::Text | FieldKind::Multitag | FieldKind::Unrecognized => (
            Control::Input {
                input_type: InputType::Text,
            },
            text.to_string(),
        ),
    };

    RenderedField {
        field,
        control,
        display,
        highlighted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Platforms;
    use reelbrand_adapter::Platform;

    #[test]
    fn test_renders_exactly_the_platform_fields() {
        let platforms = Platforms::builtin();
        let youtube = platforms.get(Platform::Youtube).expect("youtube");
        let mut state = FormState::new();
        // a value left over from another platform is not rendered
        state.set_text("businessName", "Brand");
        let rendered = render_fields(&youtube.fields, &state, &BTreeSet::new());
        let ids: Vec<&str> = rendered.iter().map(|r| r.field.id.as_str()).collect();
        let expected: Vec<&str> = youtube.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_secret_masked_until_revealed() {
        let field = FieldDefinition::new("clientSecret", "Secret", FieldKind::Password);
        let mut state = FormState::new();
        state.set_text("clientSecret", "abc");
        assert_eq!(render_field(&field, &state, false).display, "•••");
        state.toggle_reveal("clientSecret");
        let rendered = render_field(&field, &state, false);
        assert_eq!(rendered.display, "abc");
        assert_eq!(rendered.control, Control::Secret { revealed: true });
    }

    #[test]
    fn test_dropdown_shows_first_option_when_unset() {
        let platforms = Platforms::builtin();
        let youtube = platforms.get(Platform::Youtube).expect("youtube");
        let field = youtube.field("uploadPrivacy").expect("privacy");
        let rendered = render_field(field, &FormState::new(), false);
        assert_eq!(rendered.display, "Private");
        assert!(matches!(rendered.control, Control::Select { selected: 0, .. }));
    }

    #[test]
    fn test_unrecognized_kind_renders_as_text_input() {
        let field = FieldDefinition::new("brandColor", "Brand", FieldKind::Unrecognized)
            .placeholder("#ff0066");
        let rendered = render_field(&field, &FormState::new(), true);
        assert_eq!(
            rendered.control,
            Control::Input {
                input_type: InputType::Text
            }
        );
        assert_eq!(rendered.placeholder(), Some("#ff0066"));
        assert!(rendered.highlighted);
    }

    #[test]
    fn test_required_label_marker() {
        let field = FieldDefinition::new("pageId", "Facebook Page ID", FieldKind::Text).required();
        let rendered = render_field(&field, &FormState::new(), false);
        assert_eq!(rendered.label(), "Facebook Page ID *");
    }
}
