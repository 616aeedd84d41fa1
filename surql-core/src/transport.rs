//! Transport seam: submits a [`QueryPayload`] to a remote endpoint

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{Error, QueryPayload, Result};

/// Something that can deliver a query payload and return the decoded response
pub trait Transport: Send + Sync {
    /// Send the payload unchanged and return the parsed JSON response body
    fn send(&self, payload: &QueryPayload) -> impl Future<Output = Result<serde_json::Value>> + Send;
}

/// Endpoint settings for [`HttpTransport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// URL the payload is POSTed to
    pub endpoint: String,
    /// Bearer token; an empty token is sent when absent
    #[serde(default)]
    pub token: Option<String>,
}

impl TransportConfig {
    pub fn new(endpoint: &str) -> Result<Self> {
        if endpoint.trim().is_empty() {
            return Err(Error::empty_argument("endpoint"));
        }
        Ok(Self {
            endpoint: endpoint.to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token.as_deref().unwrap_or_default())
    }
}

#[cfg(feature = "http")]
mod http {
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use tracing::{debug, warn};

    use super::{Transport, TransportConfig};
    use crate::{Error, QueryPayload, Result};

    /// POSTs payloads as JSON with a bearer token
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: reqwest::Client,
        config: TransportConfig,
    }

    impl HttpTransport {
        pub fn new(config: TransportConfig) -> Self {
            Self::from_client(reqwest::Client::new(), config)
        }

        pub fn from_client(client: reqwest::Client, config: TransportConfig) -> Self {
            Self { client, config }
        }

        pub fn config(&self) -> &TransportConfig {
            &self.config
        }
    }

    impl Transport for HttpTransport {
        async fn send(&self, payload: &QueryPayload) -> Result<serde_json::Value> {
            debug!(
                endpoint = %self.config.endpoint,
                namespace = %payload.namespace,
                database = %payload.db_name,
                "posting query payload"
            );

            let response = self
                .client
                .post(&self.config.endpoint)
                .header(CONTENT_TYPE, "application/json")
                .header(AUTHORIZATION, self.config.authorization())
                .json(payload)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                warn!(endpoint = %self.config.endpoint, %status, "query payload rejected");
                return Err(Error::transport(status.to_string()));
            }

            Ok(response.json().await?)
        }
    }
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{op, table, Operation};
    use serde_json::json;
    use std::sync::Mutex;

    // Mock transport that records every payload it receives
    struct MockTransport {
        should_fail: bool,
        sent: Mutex<Vec<QueryPayload>>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                should_fail: false,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn with_failure() -> Self {
            Self {
                should_fail: true,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for MockTransport {
        async fn send(&self, payload: &QueryPayload) -> Result<serde_json::Value> {
            self.sent.lock().unwrap().push(payload.clone());
            if self.should_fail {
                return Err(Error::transport("500 Internal Server Error"));
            }
            Ok(json!([{"status": "OK", "result": []}]))
        }
    }

    #[test]
    fn test_config_authorization_header() {
        let config = TransportConfig::new("http://localhost:8000/sql").unwrap();
        assert_eq!(config.authorization(), "Bearer ");

        let config = config.with_token("secret");
        assert_eq!(config.authorization(), "Bearer secret");
    }

    #[test]
    fn test_config_rejects_empty_endpoint() {
        assert!(TransportConfig::new(" ").is_err());
    }

    #[test]
    fn test_config_deserializes_without_token() {
        let config: TransportConfig =
            serde_json::from_value(json!({"endpoint": "http://db/sql"})).unwrap();
        assert_eq!(config.token, None);
    }

    #[tokio::test]
    async fn test_execute_sends_payload_unchanged() {
        let transport = MockTransport::new();
        let query = table("person")
            .unwrap()
            .namespace_and_db("app", "main")
            .unwrap()
            .filter(("age", op::GT, 18))
            .unwrap();

        let response = query.execute(Operation::Select, &transport).await.unwrap();
        assert_eq!(response[0]["status"], "OK");

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], query.query_payload(Operation::Select).unwrap());
    }

    #[tokio::test]
    async fn test_execute_validates_before_sending() {
        let transport = MockTransport::new();
        let query = table("person").unwrap();

        let result = query.execute(Operation::Select, &transport).await;
        assert!(result.is_err());
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated() {
        let transport = MockTransport::with_failure();
        let query = table("person").unwrap().namespace_and_db("app", "main").unwrap();

        let err = query.execute(Operation::Delete, &transport).await.unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert!(err.to_string().contains("500"));
    }
}
