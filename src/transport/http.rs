use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, trace};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

use crate::app_config::HttpConfig;
use crate::errors::TransportError;
use crate::transport::Transport;

/// Longest error body kept in a `TransportError::Status`
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP transport backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client for making requests
    client: Client,
}

impl HttpTransport {
    /// Create a transport with default settings
    pub fn new() -> Result<Self, TransportError> {
        Self::from_config(&HttpConfig::default())
    }

    /// Create a transport from the HTTP section of the configuration
    ///
    /// The `Accept-Language` header pins the language of track names returned
    /// by the service.
    pub fn from_config(config: &HttpConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        let accept_language = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| TransportError::RequestFailed(format!("Invalid Accept-Language header: {}", e)))?;
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| TransportError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn map_send_error(locator: &str, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(format!("{}: {}", locator, error))
        } else if error.is_connect() {
            TransportError::ConnectionError(format!("{}: {}", locator, error))
        } else {
            TransportError::RequestFailed(format!("{}: {}", locator, error))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, locator: &str) -> Result<Bytes, TransportError> {
        debug!("GET {}", locator);

        let response = self.client.get(locator)
            .send()
            .await
            .map_err(|e| Self::map_send_error(locator, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            let message = if body.chars().count() > MAX_ERROR_BODY_CHARS {
                body.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>()
            } else {
                body
            };
            return Err(TransportError::Status {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await
            .map_err(|e| Self::map_send_error(locator, e))?;
        trace!("Received {} bytes from {}", body.len(), locator);

        Ok(body)
    }
}
