// push/fcm.rs
use serde_json::{json, Value};

/// FCM legacy HTTP client. Held by the notification service so tests can
/// build one against a local server instead of Google's endpoint.
#[derive(Debug, Clone)]
pub struct PushClient {
    client: reqwest::Client,
    api_url: String,
    server_key: String,
}

impl PushClient {
    pub fn new(api_url: String, server_key: String) -> Self {
        PushClient {
            client: reqwest::Client::new(),
            api_url,
            server_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.server_key.is_empty()
    }

    /// One request for the whole token list; FCM fans out to the devices.
    /// An unconfigured key or an empty token list is a logged no-op.
    pub async fn send_multicast(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
        data: Value,
    ) -> Result<(), String> {
        if tokens.is_empty() {
            return Ok(());
        }

        if !self.is_configured() {
            tracing::info!(
                "FCM server key not set; skipping push to {} device(s)",
                tokens.len()
            );
            return Ok(());
        }

        let payload = multicast_payload(tokens, title, body, data);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("key={}", self.server_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("✓ Push sent to {} device(s)", tokens.len());
            Ok(())
        } else {
            let response_text = response
                .text()
                .await
                .unwrap_or_else(|_| "No response body".to_string());
            Err(format!(
                "FCM API error ({}): {}",
                status.as_u16(),
                response_text
            ))
        }
    }
}

pub fn multicast_payload(tokens: &[String], title: &str, body: &str, data: Value) -> Value {
    json!({
        "registration_ids": tokens,
        "notification": {
            "title": title,
            "body": body,
        },
        "data": data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multicast_payload_shape() {
        let tokens = vec!["tok-a".to_string(), "tok-b".to_string()];
        let payload = multicast_payload(
            &tokens,
            "Nouveau ticket",
            "Plomberie - Building A",
            json!({"url": "/app/admin", "ticketId": "abc"}),
        );

        assert_eq!(payload["registration_ids"], json!(["tok-a", "tok-b"]));
        assert_eq!(payload["notification"]["title"], "Nouveau ticket");
        assert_eq!(payload["notification"]["body"], "Plomberie - Building A");
        assert_eq!(payload["data"]["url"], "/app/admin");
        assert_eq!(payload["data"]["ticketId"], "abc");
    }

    #[test]
    fn test_unconfigured_client() {
        let client = PushClient::new("http://localhost:1".to_string(), "".to_string());
        assert!(!client.is_configured());

        let configured = PushClient::new("http://localhost:1".to_string(), "key".to_string());
        assert!(configured.is_configured());
    }

    #[tokio::test]
    async fn test_send_without_key_is_noop() {
        let client = PushClient::new("http://localhost:1".to_string(), "".to_string());
        let result = client
            .send_multicast(
                &["tok".to_string()],
                "title",
                "body",
                json!({"url": "/app/artisan"}),
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_empty_tokens_is_noop() {
        // No tokens means no request, even with a key set.
        let client = PushClient::new("http://localhost:1".to_string(), "key".to_string());
        let result = client
            .send_multicast(&[], "title", "body", json!({}))
            .await;
        assert!(result.is_ok());
    }
}
