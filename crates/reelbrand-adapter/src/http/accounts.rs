/*
[INPUT]:  Account ids, connect payloads, and edited account objects
[OUTPUT]: Account listings, account detail, and backend acknowledgements
[POS]:    HTTP layer - account endpoints
[UPDATE]: When adding new account endpoints or changing payload shapes
*/

use reqwest::Method;
use serde_json::Value;
use tracing::info;

use crate::http::{ReelbrandClient, Result};
use crate::types::{Account, AccountPatch, AccountRequest, Platform};

impl ReelbrandClient {
    /// List connected accounts
    ///
    /// GET /accounts
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let builder = self.request(Method::GET, "/accounts")?;
        self.send_json(builder).await
    }

    /// Fetch one account for editing
    ///
    /// GET /accounts/{id}
    pub async fn get_account(&self, id: &str) -> Result<Account> {
        let endpoint = format!("/accounts/{id}");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Partially update an account with the whole local object
    ///
    /// PATCH /accounts/{id}
    pub async fn update_account(&self, id: &str, patch: &AccountPatch) -> Result<Value> {
        let endpoint = format!("/accounts/{id}");
        let builder = self.request(Method::PATCH, &endpoint)?.json(patch);
        let response = self.send_json(builder).await?;
        info!(account_id = %id, "account updated");
        Ok(response)
    }

    /// Connect an account on the platform the payload belongs to
    ///
    /// POST /accounts/{platform}
    pub async fn create_account(&self, request: &AccountRequest) -> Result<Value> {
        let platform = request.platform();
        let endpoint = connect_endpoint(platform);
        let builder = self.request(Method::POST, &endpoint)?.json(request);
        let response = self.send_json(builder).await?;
        info!(%platform, "account connected");
        Ok(response)
    }
}

fn connect_endpoint(platform: Platform) -> String {
    format!("/accounts/{}", platform.slug())
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, ReelbrandClient, ReelbrandError};
    use crate::types::{AccountPatch, AccountRequest, FacebookAccountRequest, InstagramAccountRequest};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ReelbrandClient {
        ReelbrandClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
    }

    #[tokio::test]
    async fn test_list_accounts() {
        let server = MockServer::start().await;
        let mock_response = r#"[
            {"id": 1, "platform": "instagram", "username": "reelbrand", "followers": 361000},
            {"id": "fb-2", "platform": "facebook", "page_name": "ReelBrand Page", "status": "syncing"}
        ]"#;

        let _mock = Mock::given(method("GET"))
            .and(path("/accounts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let accounts = client_for(&server)
            .list_accounts()
            .await
            .expect("list_accounts failed");

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].display_name(), "reelbrand");
        assert_eq!(accounts[0].stat("followers"), "361000");
        assert_eq!(accounts[1].id(), Some("fb-2".to_string()));
        assert_eq!(accounts[1].display_name(), "ReelBrand Page");
    }

    #[tokio::test]
    async fn test_get_account() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/accounts/insta_1784"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "insta_1784",
                "platform": "instagram",
                "instagram_username": "myinsta",
                "post_as_reel": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let account = client_for(&server)
            .get_account("insta_1784")
            .await
            .expect("get_account failed");

        assert_eq!(account.str_field("instagram_username"), Some("myinsta".to_string()));
        assert_eq!(account.get("post_as_reel"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_update_account_sends_whole_object() {
        let server = MockServer::start().await;
        let body = json!({
            "id": "insta_1784",
            "reminder_email": "user@example.com",
            "post_to_feed": false
        });
        let _mock = Mock::given(method("PATCH"))
            .and(path("/accounts/insta_1784"))
            .and(body_json(body.clone()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let patch: AccountPatch = serde_json::from_value(body).expect("patch");
        let response = client_for(&server)
            .update_account("insta_1784", &patch)
            .await
            .expect("update_account failed");

        assert!(response.is_null());
    }

    #[tokio::test]
    async fn test_create_facebook_account_posts_platform_body() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/accounts/facebook"))
            .and(body_json(json!({
                "page_name": "ReelBrand Page",
                "page_id": "1234567890",
                "post_as_reel": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "fb_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .create_account(&AccountRequest::Facebook(FacebookAccountRequest {
                page_name: Some("ReelBrand Page".to_string()),
                page_id: Some("1234567890".to_string()),
                post_as_reel: Some(true),
                ..Default::default()
            }))
            .await
            .expect("create_account failed");

        assert_eq!(response, json!({"id": "fb_1"}));
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/accounts/instagram"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid token"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_account(&AccountRequest::Instagram(InstagramAccountRequest::default()))
            .await
            .expect_err("422 must fail");

        match err {
            ReelbrandError::Api { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "invalid token");
            }
            other => panic!("Expected Api error variant, got {other:?}"),
        }
    }
}
