use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ContactForm, RelayError, SubmitRelay};

pub const DEFAULT_ENDPOINT: &str = "https://formspree.io/f/mqaypvbk";

/// Formspree-style form relay client
#[derive(Clone)]
pub struct FormspreeClient {
    client: Client,
    endpoint: String,
}

impl FormspreeClient {
    /// Create a client posting to `endpoint`
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post the form and report whether the relay acknowledged it
    pub async fn send_form(&self, form: &ContactForm) -> Result<bool, RelayError> {
        if self.endpoint.trim().is_empty() {
            return Err(RelayError::MissingEndpoint);
        }

        debug!(endpoint = %self.endpoint, subject = %form.subject, "posting contact form");
        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let data: Value = response.json().await.map_err(|err| {
            if err.is_decode() {
                RelayError::InvalidBody {
                    status: status.as_u16(),
                }
            } else {
                RelayError::Transport(err)
            }
        })?;

        let ok = data.get("ok").map(is_truthy).unwrap_or(false);
        if ok {
            return Ok(true);
        }

        let errors = data
            .get("errors")
            .map(|errors| errors.to_string())
            .unwrap_or_default();
        warn!(status = status.as_u16(), %errors, "relay did not acknowledge");

        if !status.is_success() {
            return Err(RelayError::Rejected(format!("{} {}", status, errors)));
        }
        Ok(false)
    }
}

#[async_trait]
impl SubmitRelay for FormspreeClient {
    async fn submit(&self, form: &ContactForm) -> Result<bool, RelayError> {
        self.send_form(form).await
    }
}

/// JavaScript-style truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Read;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    /// Local server answering every request with `status`/`body`.
    /// Received request bodies are forwarded on the returned channel.
    fn start_mock_relay(status: u16, body: &str) -> (mpsc::Receiver<String>, String) {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("Failed to start test server");
        let port = server.server_addr().to_ip().unwrap().port();
        let url = format!("http://127.0.0.1:{}/f/test", port);

        let (body_tx, body_rx) = mpsc::channel::<String>();
        let body = body.to_string();
        thread::spawn(move || {
            if let Ok(Some(mut request)) = server.recv_timeout(Duration::from_secs(5)) {
                let mut received = String::new();
                let _ = request.as_reader().read_to_string(&mut received);
                let _ = body_tx.send(received);

                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"application/json"[..],
                        )
                        .unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        (body_rx, url)
    }

    fn form() -> ContactForm {
        ContactForm {
            subject: "Fix bug".to_string(),
            message: "Hello there".to_string(),
            reply_to: "visitor@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_acknowledged_submission() {
        let (body_rx, url) = start_mock_relay(200, r#"{"next":"/thanks","ok":true}"#);
        let client = FormspreeClient::new(url);

        assert!(client.submit(&form()).await.unwrap());

        let posted = body_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(posted.contains("subject=Fix+bug"));
        assert!(posted.contains("message=Hello+there"));
        assert!(posted.contains("_replyto=visitor%40example.com"));
    }

    #[tokio::test]
    async fn test_falsy_ok_is_not_acknowledged() {
        let (_body_rx, url) = start_mock_relay(200, r#"{"ok":false}"#);
        let client = FormspreeClient::new(url);
        assert!(!client.submit(&form()).await.unwrap());
    }

    #[tokio::test]
    async fn test_error_status_is_rejected() {
        let (_body_rx, url) =
            start_mock_relay(422, r#"{"errors":[{"message":"Form not found"}]}"#);
        let client = FormspreeClient::new(url);
        let err = client.submit(&form()).await.unwrap_err();
        assert!(matches!(err, RelayError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let (_body_rx, url) = start_mock_relay(200, "<html>oops</html>");
        let client = FormspreeClient::new(url);
        let err = client.submit(&form()).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidBody { status: 200 }));
    }

    #[tokio::test]
    async fn test_empty_body_on_error_status() {
        let (_body_rx, url) = start_mock_relay(500, "");
        let client = FormspreeClient::new(url);
        let err = client.submit(&form()).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidBody { status: 500 }));
    }

    #[tokio::test]
    async fn test_unreachable_relay() {
        // Grab a free port, then close it so nothing is listening
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = FormspreeClient::new(format!("http://127.0.0.1:{}/f/test", port));
        let err = client.submit(&form()).await.unwrap_err();
        assert!(matches!(err, RelayError::Transport(_)));
    }

    #[tokio::test]
    async fn test_missing_endpoint() {
        let client = FormspreeClient::new(String::new());
        let err = client.submit(&form()).await.unwrap_err();
        assert!(matches!(err, RelayError::MissingEndpoint));
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }
}
