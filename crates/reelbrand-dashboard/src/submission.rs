/*
[INPUT]:  Selected platform and the onboarding FormState
[OUTPUT]: Typed connect payload for POST /accounts/{platform}
[POS]:    Onboarding - form id to wire key mapping
[UPDATE]: When platform fields or backend keys change
*/

use reelbrand_adapter::{
    AccountRequest, FacebookAccountRequest, InstagramAccountRequest, Platform,
    YoutubeAccountRequest,
};

use crate::form::{FieldValue, FormState};

/// Absent fields stay `None` and are omitted; an explicit empty string is sent as-is.
pub fn build_request(platform: Platform, form: &FormState) -> AccountRequest {
    match platform {
        Platform::Instagram => AccountRequest::Instagram(InstagramAccountRequest {
            instagram_username: text(form, "businessName"),
            instagram_id: text(form, "businessAccountId"),
            access_token: text(form, "longLivedToken"),
            page_id: text(form, "pageId"),
            token_expiry_date: text(form, "tokenExpiryDate"),
            reminder_email: text(form, "tokenRefreshReminderEmail"),
            caption_template: text(form, "captionTemplate"),
            hashtag_presets: text(form, "hashtagPresets"),
            post_as_reel: flag(form, "postAsReel"),
            post_to_feed: flag(form, "postToFeed"),
        }),
        Platform::Facebook => AccountRequest::Facebook(FacebookAccountRequest {
            page_name: text(form, "pageName"),
            page_id: text(form, "pageId"),
            access_token: text(form, "longLivedToken"),
            app_id: text(form, "appId"),
            token_expiry_date: text(form, "tokenExpiryDate"),
            reminder_email: text(form, "tokenRefreshReminderEmail"),
            caption_template: text(form, "captionTemplate"),
            post_as_reel: flag(form, "postAsReel"),
            post_to_feed: flag(form, "postToFeed"),
            auto_upload_after_processing: flag(form, "autoUploadAfterProcessing"),
        }),
        Platform::Youtube => AccountRequest::Youtube(YoutubeAccountRequest {
            channel_name: text(form, "channelName"),
            client_id: text(form, "clientId"),
            client_secret: text(form, "clientSecret"),
            refresh_token: text(form, "refreshToken"),
            upload_privacy: text(form, "uploadPrivacy"),
            default_tags: text(form, "defaultTags"),
            description_template: text(form, "descriptionTemplate"),
            reminder_email: text(form, "tokenRefreshReminderEmail"),
            auto_upload_after_processing: flag(form, "autoUploadAfterProcessing"),
        }),
    }
}

fn text(form: &FormState, id: &str) -> Option<String> {
    match form.get(id)? {
        FieldValue::Text(text) => Some(text.clone()),
        FieldValue::Flag(flag) => Some(flag.to_string()),
    }
}

fn flag(form: &FormState, id: &str) -> Option<bool> {
    match form.get(id)? {
        FieldValue::Flag(flag) => Some(*flag),
        FieldValue::Text(text) => Some(text.trim().eq_ignore_ascii_case("true")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_facebook_payload_keys() {
        let mut form = FormState::new();
        form.set_text("pageName", "ReelBrand Page");
        form.set_text("pageId", "1234567890");
        form.set_text("longLivedToken", "EAAG");
        form.set_flag("postAsReel", true);

        let body = serde_json::to_value(build_request(Platform::Facebook, &form)).expect("json");
        assert_eq!(
            body,
            json!({
                "page_name": "ReelBrand Page",
                "page_id": "1234567890",
                "access_token": "EAAG",
                "post_as_reel": true
            })
        );
    }

    #[test]
    fn test_instagram_renames_and_three_state_values() {
        let mut form = FormState::new();
        form.set_text("businessName", "brand");
        form.set_text("tokenRefreshReminderEmail", "ops@example.com");
        form.set_text("pageId", "");
        form.set_flag("postToFeed", false);
        form.set_text("hashtagPresets", "#a  #b");

        let body = serde_json::to_value(build_request(Platform::Instagram, &form)).expect("json");
        assert_eq!(
            body,
            json!({
                "instagram_username": "brand",
                "reminder_email": "ops@example.com",
                "page_id": "",
                "post_to_feed": false,
                "hashtag_presets": "#a  #b"
            })
        );
    }

    #[test]
    fn test_values_from_other_platforms_are_not_sent() {
        let mut form = FormState::new();
        form.set_text("businessName", "brand");
        form.set_text("channelName", "Daily Reels");

        let body = serde_json::to_value(build_request(Platform::Youtube, &form)).expect("json");
        assert_eq!(body, json!({"channel_name": "Daily Reels"}));
    }

    #[test]
    fn test_unset_dropdown_is_omitted() {
        let form = FormState::new();
        let body = serde_json::to_value(build_request(Platform::Youtube, &form)).expect("json");
        assert_eq!(body, json!({}));
    }
}
