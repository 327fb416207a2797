/*!
 * Error types for the ytcap library and command line tool.
 *
 * This module contains custom error types for the different stages of caption
 * retrieval, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by a transport while requesting a locator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The request could not be built or sent
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The remote service answered with a non-success status
    #[error("Service responded with error: {status_code} - {message}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Body or reason returned by the service
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),
}

/// Errors surfaced by listing, selecting, fetching, translating and formatting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscriptError {
    /// The video identifier is empty
    #[error("Invalid video id: {0:?}")]
    InvalidVideoId(String),

    /// The video has no caption tracks at all
    #[error("No captions found for video {video_id}")]
    NotFound {
        /// Video that was queried
        video_id: String,
    },

    /// Transport failure while listing tracks
    #[error("Network error: {0}")]
    Network(TransportError),

    /// No track satisfies the selection criteria
    #[error("No track matches {requested:?} (available: {available:?})")]
    NoMatch {
        /// Requested language codes, in preference order
        requested: Vec<String>,
        /// Language codes of the tracks that were considered
        available: Vec<String>,
    },

    /// Transport failure while fetching fragment content
    #[error("Failed to fetch track content: {0}")]
    Fetch(TransportError),

    /// Payload is structurally invalid
    #[error("Failed to parse payload: {0}")]
    Parse(String),

    /// The track cannot be translated
    #[error("Track {language_code} is not translatable")]
    NotTranslatable {
        /// Language code of the track
        language_code: String,
    },

    /// The track cannot be translated into the requested language
    #[error("Translation to {requested} is not available (available: {available:?})")]
    UnsupportedLanguage {
        /// Requested target code
        requested: String,
        /// Codes the track can be translated into
        available: Vec<String>,
    },

    /// A fragment handed to a formatter violates its preconditions
    #[error("Invalid fragment at index {index}: {reason}")]
    InvalidFragment {
        /// Position of the fragment in the sequence
        index: usize,
        /// What is wrong with it
        reason: String,
    },
}

/// Main application error type used by the command line front end
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from caption retrieval
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
