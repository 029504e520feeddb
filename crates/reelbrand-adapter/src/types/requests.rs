/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::Platform;

// `None` fields are omitted from the body: the backend reads a missing key as
// "leave unchanged" and an empty string as "clear".

/// Body of `POST /accounts/instagram`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstagramAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtag_presets: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_as_reel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_to_feed: Option<bool>,
}

/// Body of `POST /accounts/facebook`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FacebookAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_as_reel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_to_feed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_upload_after_processing: Option<bool>,
}

/// Body of `POST /accounts/youtube`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct YoutubeAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_privacy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_upload_after_processing: Option<bool>,
}

/// One of the three connect payloads, serialized as the inner body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AccountRequest {
    Instagram(InstagramAccountRequest),
    Facebook(FacebookAccountRequest),
    Youtube(YoutubeAccountRequest),
}

impl AccountRequest {
    pub fn platform(&self) -> Platform {
        match self {
            AccountRequest::Instagram(_) => Platform::Instagram,
            AccountRequest::Facebook(_) => Platform::Facebook,
            AccountRequest::Youtube(_) => Platform::Youtube,
        }
    }
}

/// Body of `PATCH /accounts/{id}`: the whole local account object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountPatch(pub Map<String, Value>);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_omitted() {
        let request = FacebookAccountRequest {
            page_id: Some("123".to_string()),
            app_id: Some(String::new()),
            post_to_feed: Some(false),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({"page_id": "123", "app_id": "", "post_to_feed": false})
        );
    }

    #[test]
    fn test_account_request_serializes_inner_body() {
        let request = AccountRequest::Youtube(YoutubeAccountRequest {
            channel_name: Some("Daily Reels".to_string()),
            ..Default::default()
        });
        assert_eq!(request.platform(), Platform::Youtube);
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value, json!({"channel_name": "Daily Reels"}));
    }
}
