/*!
 * In-memory transport for tests and offline runs.
 *
 * Responses are registered per locator. Unregistered locators answer with a
 * 404 status, the same way the service does for unknown resources.
 */

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::TransportError;
use crate::transport::Transport;

/// Mock transport answering from a fixed locator table
#[derive(Debug, Default, Clone)]
pub struct MockTransport {
    /// Registered responses keyed by locator
    responses: HashMap<String, Result<Bytes, TransportError>>,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Locators requested so far, in order
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    /// Create an empty mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a successful response body for `locator`
    pub fn with_response(mut self, locator: impl Into<String>, body: impl Into<Bytes>) -> Self {
        self.responses.insert(locator.into(), Ok(body.into()));
        self
    }

    /// Register a failure for `locator`
    pub fn with_error(mut self, locator: impl Into<String>, error: TransportError) -> Self {
        self.responses.insert(locator.into(), Err(error));
        self
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Locators requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, locator: &str) -> Result<Bytes, TransportError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(locator.to_string());
        }

        match self.responses.get(locator) {
            Some(response) => response.clone(),
            None => Err(TransportError::Status {
                status_code: 404,
                message: format!("No mock response registered for {}", locator),
            }),
        }
    }
}
