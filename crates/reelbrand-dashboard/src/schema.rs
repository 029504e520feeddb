/*
[INPUT]:  Built-in platform tables or a YAML schema override file
[OUTPUT]: Validated PlatformDefinition set driving the onboarding form
[POS]:    Form engine - declarative field schema per platform
[UPDATE]: When adding a platform, a field, or a field kind
[UPDATE]: 2026-10-03 Allow YAML overrides; unknown kinds decode as Unrecognized
*/

use std::collections::HashSet;
use std::path::Path;

use reelbrand_adapter::Platform;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OAuth redirect URI offered in the setup guide's quick-copy block
pub const REDIRECT_URI: &str = "https://reelbrandpro.com/auth/callback";

/// Input control a field asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Password,
    Date,
    Email,
    Textarea,
    Dropdown,
    Multitag,
    Toggle,
    /// Any kind this build does not know; rendered as plain text
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

impl DropdownOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Key into the form state; unique within a platform
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<DropdownOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default)]
    pub read_only: bool,
}

impl FieldDefinition {
    pub fn new(id: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            placeholder: None,
            kind,
            required: false,
            options: Vec::new(),
            help: None,
            read_only: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn options(mut self, options: Vec<DropdownOption>) -> Self {
        self.options = options;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Index of the option holding `value`, or 0 when unset or unknown
    pub fn option_index(&self, value: Option<&str>) -> usize {
        value
            .and_then(|v| self.options.iter().position(|opt| opt.value == v))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupGuide {
    pub title: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub urls: Vec<GuideLink>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDefinition {
    pub platform: Platform,
    pub name: String,
    /// Accent color name understood by the terminal renderer
    #[serde(default = "default_accent")]
    pub accent: String,
    pub description: String,
    pub fields: Vec<FieldDefinition>,
    pub guide: SetupGuide,
}

fn default_accent() -> String {
    "cyan".to_string()
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{platform}: field id '{id}' is declared more than once")]
    DuplicateFieldId { platform: String, id: String },

    #[error("{platform}: dropdown field '{id}' has no options")]
    EmptyDropdown { platform: String, id: String },

    #[error("{platform}: no fields declared")]
    NoFields { platform: String },

    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse schema file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PlatformDefinition {
    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|field| field.required)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_fields(&self.name, &self.fields)
    }
}

/// Check the invariants every field list must hold
pub fn validate_fields(owner: &str, fields: &[FieldDefinition]) -> Result<(), SchemaError> {
    if fields.is_empty() {
        return Err(SchemaError::NoFields {
            platform: owner.to_string(),
        });
    }
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.id.as_str()) {
            return Err(SchemaError::DuplicateFieldId {
                platform: owner.to_string(),
                id: field.id.clone(),
            });
        }
        if field.kind == FieldKind::Dropdown && field.options.is_empty() {
            return Err(SchemaError::EmptyDropdown {
                platform: owner.to_string(),
                id: field.id.clone(),
            });
        }
    }
    Ok(())
}

/// The set of platforms the onboarding form can connect, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct Platforms {
    definitions: Vec<PlatformDefinition>,
}

impl Platforms {
    pub fn builtin() -> Self {
        Self {
            definitions: vec![instagram(), facebook(), youtube()],
        }
    }

    /// Built-in platforms with any definitions from the YAML text replacing theirs
    pub fn with_overrides_from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let overrides: Vec<PlatformDefinition> = serde_yaml::from_str(yaml)?;
        let mut platforms = Self::builtin();
        for definition in overrides {
            definition.validate()?;
            match platforms
                .definitions
                .iter_mut()
                .find(|existing| existing.platform == definition.platform)
            {
                Some(existing) => *existing = definition,
                None => platforms.definitions.push(definition),
            }
        }
        Ok(platforms)
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::with_overrides_from_yaml(&content)
    }

    pub fn get(&self, platform: Platform) -> Option<&PlatformDefinition> {
        self.definitions.iter().find(|def| def.platform == platform)
    }

    pub fn position(&self, platform: Platform) -> Option<usize> {
        self.definitions.iter().position(|def| def.platform == platform)
    }

    pub fn at(&self, index: usize) -> Option<&PlatformDefinition> {
        self.definitions.get(index)
    }

    /// Definition at `index`, clamped to the last one. Never empty: overrides only add or replace.
    pub fn nth_clamped(&self, index: usize) -> &PlatformDefinition {
        let last = self.definitions.len().saturating_sub(1);
        &self.definitions[index.min(last)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        self.definitions.iter().try_for_each(PlatformDefinition::validate)
    }
}

impl Default for Platforms {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn link(label: &str, url: &str) -> GuideLink {
    GuideLink {
        label: label.to_string(),
        url: url.to_string(),
    }
}

fn token_expiry_field() -> FieldDefinition {
    FieldDefinition::new("tokenExpiryDate", "Token Expiry Date", FieldKind::Date)
        .help("Set when your access token expires to receive renewal reminders")
}

fn reminder_email_field() -> FieldDefinition {
    FieldDefinition::new(
        "tokenRefreshReminderEmail",
        "Token Refresh Reminder Email",
        FieldKind::Email,
    )
    .placeholder("user@example.com")
}

fn caption_template_field() -> FieldDefinition {
    FieldDefinition::new("captionTemplate", "Caption Template", FieldKind::Textarea)
        .placeholder("Enter your default caption template...")
}

fn instagram() -> PlatformDefinition {
    PlatformDefinition {
        platform: Platform::Instagram,
        name: "Instagram".to_string(),
        accent: "magenta".to_string(),
        description: "Connect your Instagram Business account to publish reels and posts".to_string(),
        fields: vec![
            FieldDefinition::new("businessName", "Business Account Name", FieldKind::Text)
                .placeholder("Your business name for reference")
                .required(),
            FieldDefinition::new(
                "businessAccountId",
                "Instagram Business Account ID",
                FieldKind::Text,
            )
            .placeholder("Your Instagram business account ID")
            .required(),
            FieldDefinition::new("longLivedToken", "Long-Lived Access Token", FieldKind::Password)
                .placeholder("Your Instagram long-lived access token")
                .required()
                .help("Long-lived tokens expire every 60 days"),
            FieldDefinition::new("pageId", "Connected Facebook Page ID", FieldKind::Text)
                .placeholder("Facebook page ID (if connected)"),
            token_expiry_field(),
            reminder_email_field(),
            caption_template_field(),
            FieldDefinition::new("hashtagPresets", "Hashtag Presets", FieldKind::Multitag)
                .placeholder("#motivation #life #inspiration")
                .help("Kept exactly as typed"),
            FieldDefinition::new("postAsReel", "Post as Reel", FieldKind::Toggle),
            FieldDefinition::new("postToFeed", "Post to Feed", FieldKind::Toggle),
        ],
        guide: SetupGuide {
            title: "How to get Instagram Business credentials".to_string(),
            steps: strings(&[
                "Convert your Instagram account to a Business or Creator account",
                "Connect it to a Facebook Page in Instagram settings",
                "Go to Facebook Developers Console and create an app",
                "Add Instagram Basic Display and Instagram Graph API products",
                "Generate a long-lived access token (valid for ~60 days)",
                "Get your Instagram Business Account ID from Graph API",
            ]),
            urls: vec![
                link("Facebook Developers Console", "https://developers.facebook.com/"),
                link(
                    "Instagram Graph API Setup",
                    "https://developers.facebook.com/docs/instagram-api/getting-started",
                ),
                link(
                    "Access Token Generator",
                    "https://developers.facebook.com/tools/explorer/",
                ),
            ],
            notes: strings(&[
                "Your Instagram account must be a Business or Creator account",
                "Long-lived tokens expire every 60 days and need to be refreshed",
                "You need a connected Facebook Page to use Instagram Graph API",
            ]),
        },
    }
}

fn facebook() -> PlatformDefinition {
    PlatformDefinition {
        platform: Platform::Facebook,
        name: "Facebook".to_string(),
        accent: "blue".to_string(),
        description: "Connect your Facebook Page to publish posts and videos".to_string(),
        fields: vec![
            FieldDefinition::new("pageName", "Facebook Page Name", FieldKind::Text)
                .placeholder("Your page name for reference")
                .required(),
            FieldDefinition::new("pageId", "Facebook Page ID", FieldKind::Text)
                .placeholder("Your Facebook page ID")
                .required(),
            FieldDefinition::new(
                "longLivedToken",
                "Long-Lived Page Access Token",
                FieldKind::Password,
            )
            .placeholder("Your Facebook page access token")
            .required(),
            FieldDefinition::new("appId", "App ID", FieldKind::Text)
                .placeholder("Your Facebook app ID"),
            token_expiry_field(),
            reminder_email_field(),
            caption_template_field(),
            FieldDefinition::new("postAsReel", "Post as Reel", FieldKind::Toggle),
            FieldDefinition::new("postToFeed", "Post to Feed", FieldKind::Toggle),
            FieldDefinition::new(
                "autoUploadAfterProcessing",
                "Auto Upload After Processing",
                FieldKind::Toggle,
            )
            .help("Publish as soon as the branded video is ready"),
        ],
        guide: SetupGuide {
            title: "How to get Facebook Page credentials".to_string(),
            steps: strings(&[
                "Go to Facebook Developers Console",
                "Create a new app with 'Business' type",
                "Add Facebook Login and Pages API products",
                "Get your App ID from App Dashboard",
                "Use Graph API Explorer to generate Page Access Token",
                "Exchange for long-lived token (doesn't expire)",
                "Find your Page ID in your Facebook Page settings",
            ]),
            urls: vec![
                link("Facebook Developers Console", "https://developers.facebook.com/"),
                link("Graph API Explorer", "https://developers.facebook.com/tools/explorer/"),
                link(
                    "Pages API Documentation",
                    "https://developers.facebook.com/docs/pages-api/",
                ),
            ],
            notes: strings(&[
                "You need admin access to the Facebook Page",
                "Long-lived Page Access Tokens don't expire if generated correctly",
                "Make sure your app has 'pages_manage_posts' permission",
            ]),
        },
    }
}

fn youtube() -> PlatformDefinition {
    PlatformDefinition {
        platform: Platform::Youtube,
        name: "YouTube".to_string(),
        accent: "red".to_string(),
        description: "Connect your YouTube channel to upload videos and shorts".to_string(),
        fields: vec![
            FieldDefinition::new("channelName", "YouTube Channel Name", FieldKind::Text)
                .placeholder("Your channel name for reference")
                .required(),
            FieldDefinition::new("clientId", "OAuth Client ID", FieldKind::Text)
                .placeholder("Your YouTube OAuth client ID")
                .required(),
            FieldDefinition::new("clientSecret", "OAuth Client Secret", FieldKind::Password)
                .placeholder("Your YouTube OAuth client secret")
                .required(),
            FieldDefinition::new("refreshToken", "Refresh Token", FieldKind::Password)
                .placeholder("Your YouTube refresh token")
                .required(),
            FieldDefinition::new("uploadPrivacy", "Default Upload Privacy", FieldKind::Dropdown)
                .options(vec![
                    DropdownOption::new("private", "Private"),
                    DropdownOption::new("public", "Public"),
                    DropdownOption::new("unlisted", "Unlisted"),
                ]),
            FieldDefinition::new("defaultTags", "Default Tags", FieldKind::Multitag)
                .placeholder("shorts, motivation, daily"),
            FieldDefinition::new(
                "descriptionTemplate",
                "Description Template",
                FieldKind::Textarea,
            )
            .placeholder("Enter your default video description..."),
            reminder_email_field(),
            FieldDefinition::new(
                "autoUploadAfterProcessing",
                "Auto Upload After Processing",
                FieldKind::Toggle,
            ),
        ],
        guide: SetupGuide {
            title: "How to get YouTube OAuth credentials".to_string(),
            steps: strings(&[
                "Go to Google Cloud Console",
                "Create a new project or select existing one",
                "Enable YouTube Data API v3",
                "Create OAuth 2.0 credentials (Web application type)",
                "Configure authorized redirect URIs",
                "Use OAuth 2.0 Playground to get refresh token",
                "Copy Client ID, Client Secret, and Refresh Token",
            ]),
            urls: vec![
                link("Google Cloud Console", "https://console.cloud.google.com/"),
                link(
                    "YouTube Data API",
                    "https://console.cloud.google.com/apis/library/youtube.googleapis.com",
                ),
                link(
                    "OAuth 2.0 Playground",
                    "https://developers.google.com/oauthplayground/",
                ),
            ],
            notes: strings(&[
                "Your YouTube channel must be verified for uploads",
                "Refresh tokens don't expire unless revoked by user",
                "You need 'youtube.upload' scope for video uploads",
                "Set upload privacy: Public, Private, or Unlisted",
            ]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_platforms_are_valid() {
        let platforms = Platforms::builtin();
        assert_eq!(platforms.len(), 3);
        platforms.validate().expect("builtin schema must validate");
        for platform in Platform::ALL {
            assert!(platforms.get(platform).is_some(), "{platform} missing");
        }
    }

    #[test]
    fn test_every_platform_has_required_secret() {
        for def in Platforms::builtin().iter() {
            assert!(
                def.required_fields()
                    .any(|field| field.kind == FieldKind::Password),
                "{} has no required secret",
                def.name
            );
        }
    }

    #[test]
    fn test_duplicate_field_id_rejected() {
        let fields = vec![
            FieldDefinition::new("pageId", "Page", FieldKind::Text),
            FieldDefinition::new("pageId", "Page again", FieldKind::Text),
        ];
        let err = validate_fields("Facebook", &fields).expect_err("duplicate id");
        assert!(matches!(err, SchemaError::DuplicateFieldId { ref id, .. } if id == "pageId"));
    }

    #[test]
    fn test_dropdown_without_options_rejected() {
        let fields = vec![FieldDefinition::new("privacy", "Privacy", FieldKind::Dropdown)];
        let err = validate_fields("YouTube", &fields).expect_err("empty dropdown");
        assert!(matches!(err, SchemaError::EmptyDropdown { .. }));
    }

    #[test]
    fn test_yaml_override_replaces_platform_and_tolerates_unknown_kind() {
        let yaml = r#"
- platform: facebook
  name: Facebook
  description: Minimal page connection
  fields:
    - id: pageId
      label: Page ID
      type: text
      required: true
    - id: brandColor
      label: Brand Color
      type: colorpicker
  guide:
    title: Short guide
"#;
        let platforms = Platforms::with_overrides_from_yaml(yaml).expect("override parses");
        let facebook = platforms.get(Platform::Facebook).expect("facebook");
        assert_eq!(facebook.fields.len(), 2);
        assert_eq!(facebook.accent, "cyan");
        assert_eq!(
            facebook.field("brandColor").map(|f| f.kind),
            Some(FieldKind::Unrecognized)
        );
        // untouched platforms keep their built-in tables
        assert_eq!(
            platforms.get(Platform::Instagram),
            Platforms::builtin().get(Platform::Instagram)
        );
    }

    #[test]
    fn test_option_index_defaults_to_first() {
        let youtube = youtube();
        let privacy = youtube.field("uploadPrivacy").expect("privacy field");
        assert_eq!(privacy.option_index(None), 0);
        assert_eq!(privacy.option_index(Some("unlisted")), 2);
        assert_eq!(privacy.option_index(Some("friends-only")), 0);
    }
}
