/*!
 * # ytcap - YouTube caption track client
 *
 * A Rust library for retrieving the caption tracks of a video and rendering
 * them as text or subtitle files.
 *
 * ## Features
 *
 * - List the caption tracks of a video (manual and auto-generated)
 * - Select a track by preferred language codes, with or without a
 *   manual/generated filter
 * - Translate a track into any language the service offers for it
 * - Fetch timed text fragments, decoded to plain text
 * - Format fragments as plain text, JSON, SRT or WebVTT
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `transport`: The request/response capability (HTTP and mock)
 * - `lister`: Caption track listing from the watch page
 * - `tracks`: Track model and selection helpers
 * - `fetcher`: Timed text retrieval and decoding
 * - `translator`: Translated track derivation
 * - `formatters`: Output formats
 * - `client`: Facade tying the stages together
 * - `app_config`: Configuration management
 * - `language_utils`: ISO language code utilities
 * - `file_utils`: Output file handling
 * - `errors`: Custom error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod client;
pub mod errors;
pub mod fetcher;
pub mod file_utils;
pub mod formatters;
pub mod fragments;
pub mod language_utils;
pub mod lister;
pub mod tracks;
pub mod translator;
pub mod transport;

// Re-export main types for easier usage
pub use app_config::Config;
pub use client::TranscriptClient;
pub use errors::{AppError, TranscriptError, TransportError};
pub use formatters::Formatter;
pub use fragments::{Fragment, FragmentSequence};
pub use tracks::{CaptionTrack, TrackList, TranslationLanguage};
pub use transport::{HttpTransport, MockTransport, Transport};
