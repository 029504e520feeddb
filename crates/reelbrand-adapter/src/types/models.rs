/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-02 Keep Account opaque; the backend owns its schema
*/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{AccountStatus, Platform};

/// Account record owned by the backend.
///
/// The shape is not fixed on this side, so the raw JSON object is kept and
/// read through optional accessors only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(pub Map<String, Value>);

impl Account {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of a key; numbers are rendered, empty strings count as absent
    pub fn str_field(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Identifier used in `/accounts/{id}`; backends send either strings or numbers
    pub fn id(&self) -> Option<String> {
        self.str_field("id")
    }

    pub fn platform(&self) -> Option<Platform> {
        self.str_field("platform")
            .and_then(|raw| Platform::from_name(&raw))
    }

    /// Title shown in lists: username, then page name, then channel id, then platform
    pub fn display_name(&self) -> String {
        ["username", "page_name", "channel_id", "platform"]
            .iter()
            .find_map(|key| self.str_field(key))
            .unwrap_or_else(|| "Unnamed account".to_string())
    }

    pub fn status(&self) -> AccountStatus {
        AccountStatus::from_raw(self.0.get("status").and_then(Value::as_str))
    }

    /// Display value for a stats counter, `-` when missing
    pub fn stat(&self, key: &str) -> String {
        self.str_field(key).unwrap_or_else(|| "-".to_string())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account(value: Value) -> Account {
        serde_json::from_value(value).expect("account json")
    }

    #[test]
    fn test_display_name_fallback_order() {
        assert_eq!(
            account(json!({"username": "reels", "page_name": "Page"})).display_name(),
            "reels"
        );
        assert_eq!(
            account(json!({"username": "", "page_name": "Page"})).display_name(),
            "Page"
        );
        assert_eq!(
            account(json!({"channel_id": "UC123", "platform": "youtube"})).display_name(),
            "UC123"
        );
        assert_eq!(account(json!({"platform": "facebook"})).display_name(), "facebook");
        assert_eq!(account(json!({})).display_name(), "Unnamed account");
    }

    #[test]
    fn test_numeric_id_and_stats() {
        let acc = account(json!({"id": 7, "followers": 1200, "status": "error"}));
        assert_eq!(acc.id(), Some("7".to_string()));
        assert_eq!(acc.stat("followers"), "1200");
        assert_eq!(acc.stat("posts"), "-");
        assert_eq!(acc.status(), AccountStatus::Error);
    }

    #[test]
    fn test_platform_parsed_from_field() {
        let acc = account(json!({"platform": "Instagram"}));
        assert_eq!(acc.platform(), Some(Platform::Instagram));
        assert_eq!(account(json!({"platform": 3})).platform(), None);
    }
}
