/*!
 * Transport implementations for reaching the captions service.
 *
 * The library never talks to the network directly; every request goes
 * through a `Transport`, which turns a locator (a URL) into raw bytes:
 * - `http`: reqwest-backed transport used in production
 * - `mock`: in-memory transport for tests and offline runs
 */

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

use crate::errors::TransportError;

/// Request/response capability used by the lister and the fetcher
///
/// Implementations hold no per-request state, so one transport can serve
/// concurrent requests for different tracks.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Retrieve the resource behind `locator`
    ///
    /// # Arguments
    /// * `locator` - Absolute URL of the resource
    ///
    /// # Returns
    /// * `Result<Bytes, TransportError>` - The response body or an error
    async fn request(&self, locator: &str) -> Result<Bytes, TransportError>;
}

pub mod http;
pub mod mock;

pub use self::http::HttpTransport;
pub use self::mock::MockTransport;
