//! Minimal Slack Web API client for pushing a contact into a direct message.

use crate::config::SlackConfig;
use crate::error::ServiceError;
use common::model::contact::Contact;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Separator closing every pushed contact, so consecutive pushes stay readable.
const MESSAGE_RULE: &str = "-----------------";

pub struct SlackClient {
    http: Client,
    config: SlackConfig,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("api_url", &self.config.api_url)
            .field("user_id", &self.config.user_id)
            .field("bot_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channel: Option<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    id: String,
}

impl ApiResponse {
    fn into_result(self, method: &str) -> Result<Self, ServiceError> {
        if self.ok {
            Ok(self)
        } else {
            Err(ServiceError::Slack(format!(
                "{} failed: {}",
                method,
                self.error.as_deref().unwrap_or("unknown error")
            )))
        }
    }
}

impl SlackClient {
    pub fn new(config: SlackConfig) -> Self {
        SlackClient {
            http: Client::new(),
            config,
        }
    }

    /// Opens the DM channel with the configured user and posts the contact card.
    pub async fn send_contact(&self, contact: &Contact) -> Result<(), ServiceError> {
        let channel = self.open_direct_message().await?;
        debug!("DM channel opened: {}", channel);
        self.post_message(&channel, &contact_message(contact)).await
    }

    async fn open_direct_message(&self) -> Result<String, ServiceError> {
        let response = self
            .call("conversations.open", json!({ "users": self.config.user_id }))
            .await?;
        response
            .channel
            .map(|c| c.id)
            .ok_or_else(|| ServiceError::Slack("conversations.open returned no channel".into()))
    }

    async fn post_message(&self, channel: &str, text: &str) -> Result<(), ServiceError> {
        self.call(
            "chat.postMessage",
            json!({
                "channel": channel,
                "text": text,
                "unfurl_links": false,
                "unfurl_media": false,
            }),
        )
        .await?;
        Ok(())
    }

    async fn call(&self, method: &str, body: serde_json::Value) -> Result<ApiResponse, ServiceError> {
        let response: ApiResponse = self
            .http
            .post(format!("{}/{}", self.config.api_url, method))
            .bearer_auth(&self.config.bot_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_result(method)
    }
}

/// The text pushed for one contact. Missing fields print as empty text.
pub fn contact_message(contact: &Contact) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_default();
    let phone = field(&contact.phone);
    let dial: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    format!(
        "🧑‍💻 {}\n🏢 {}\n🧻 {}\n☎️ <tel:{}|{}>\n{}",
        field(&contact.name),
        field(&contact.startup),
        field(&contact.persona),
        dial,
        phone,
        MESSAGE_RULE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn contact() -> Contact {
        Contact {
            name: Some("Ann Lee".into()),
            startup: Some("Acme".into()),
            persona: Some("CTO".into()),
            phone: Some("+1 (555) 010-2030".into()),
            ..Default::default()
        }
    }

    fn client(api_url: String) -> SlackClient {
        SlackClient::new(SlackConfig {
            bot_token: "xoxb-test".into(),
            user_id: "U123".into(),
            api_url,
        })
    }

    #[test]
    fn message_links_dialable_number() {
        assert_eq!(
            contact_message(&contact()),
            "🧑‍💻 Ann Lee\n🏢 Acme\n🧻 CTO\n☎️ <tel:+15550102030|+1 (555) 010-2030>\n-----------------"
        );
    }

    #[test]
    fn message_tolerates_missing_fields() {
        let message = contact_message(&Contact::default());
        assert!(message.starts_with("🧑‍💻 \n🏢 \n🧻 \n☎️ <tel:|>"));
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", client("http://localhost".into()));
        assert!(!rendered.contains("xoxb-test"));
    }

    #[actix_web::test]
    async fn opens_channel_then_posts() {
        let mut server = mockito::Server::new_async().await;
        let open = server
            .mock("POST", "/conversations.open")
            .match_header("authorization", "Bearer xoxb-test")
            .match_body(Matcher::Json(json!({ "users": "U123" })))
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "channel": {"id": "D42"}}"#)
            .create_async()
            .await;
        let post = server
            .mock("POST", "/chat.postMessage")
            .match_body(Matcher::PartialJson(json!({
                "channel": "D42",
                "unfurl_links": false,
                "unfurl_media": false,
            })))
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        client(server.url()).send_contact(&contact()).await.unwrap();
        open.assert_async().await;
        post.assert_async().await;
    }

    #[actix_web::test]
    async fn api_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _open = server
            .mock("POST", "/conversations.open")
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false, "error": "user_not_found"}"#)
            .create_async()
            .await;

        let err = client(server.url())
            .send_contact(&contact())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("user_not_found"));
    }

    #[actix_web::test]
    async fn http_failure_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _open = server
            .mock("POST", "/conversations.open")
            .with_status(500)
            .create_async()
            .await;

        let err = client(server.url())
            .send_contact(&contact())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Http(_)));
    }
}
