/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Social network an account lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    #[serde(alias = "YouTube")]
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::Facebook, Platform::Youtube];

    /// Path segment used by the connect endpoints
    pub fn slug(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Youtube => "youtube",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Youtube => "YouTube",
        }
    }

    /// Case-insensitive lookup by slug or display name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|platform| {
            platform.slug().eq_ignore_ascii_case(name)
                || platform.display_name().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Connection health reported by the backend for an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Connected,
    Error,
    Syncing,
    Unknown,
}

impl AccountStatus {
    /// Accounts that carry no status are treated as connected
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("connected") => AccountStatus::Connected,
            Some("error") => AccountStatus::Error,
            Some("syncing") => AccountStatus::Syncing,
            Some(_) => AccountStatus::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccountStatus::Connected => "Connected",
            AccountStatus::Error => "Error",
            AccountStatus::Syncing => "Syncing",
            AccountStatus::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_serde_roundtrip_uses_slug() {
        let json = serde_json::to_string(&Platform::Youtube).expect("serialize");
        assert_eq!(json, "\"youtube\"");
        let parsed: Platform = serde_json::from_str("\"YouTube\"").expect("alias");
        assert_eq!(parsed, Platform::Youtube);
    }

    #[test]
    fn test_platform_from_name() {
        assert_eq!(Platform::from_name("Instagram"), Some(Platform::Instagram));
        assert_eq!(Platform::from_name(" facebook "), Some(Platform::Facebook));
        assert_eq!(Platform::from_name("YOUTUBE"), Some(Platform::Youtube));
        assert_eq!(Platform::from_name("YouTube"), Some(Platform::Youtube));
        assert_eq!(Platform::from_name("tiktok"), None);
    }

    #[test]
    fn test_account_status_defaults_to_connected() {
        assert_eq!(AccountStatus::from_raw(None), AccountStatus::Connected);
        assert_eq!(AccountStatus::from_raw(Some("syncing")), AccountStatus::Syncing);
        assert_eq!(AccountStatus::from_raw(Some("error")), AccountStatus::Error);
        assert_eq!(AccountStatus::from_raw(Some("paused")), AccountStatus::Unknown);
    }
}
