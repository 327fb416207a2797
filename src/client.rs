use anyhow::{Context, Result};
use futures::future::join_all;
use log::{debug, info};
use std::sync::Arc;
use url::Url;

use crate::app_config::Config;
use crate::errors::TranscriptError;
use crate::fetcher::TrackFetcher;
use crate::fragments::FragmentSequence;
use crate::lister::TrackLister;
use crate::tracks::{CaptionTrack, TrackList};
use crate::translator;
use crate::transport::{HttpTransport, Transport};

// @module: Client facade over listing, fetching and translation

/// Caption track client
///
/// Wires the lister, fetcher and translator over a single transport. The
/// client holds no per-request state and can be shared between tasks.
#[derive(Debug, Clone)]
pub struct TranscriptClient {
    lister: TrackLister,
    fetcher: TrackFetcher,
}

impl TranscriptClient {
    /// Create a client talking HTTP with the given configuration
    pub fn with_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::from_config(&config.http)
            .context("Failed to create HTTP transport")?;
        Self::with_transport(Arc::new(transport), &config.http.base_url)
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid base URL: {}", base_url))?;

        Ok(Self {
            lister: TrackLister::new(Arc::clone(&transport), base_url),
            fetcher: TrackFetcher::new(transport),
        })
    }

    /// List the caption tracks of a video
    pub async fn list_tracks(&self, video_id: &str) -> Result<TrackList, TranscriptError> {
        self.lister.list_tracks(video_id).await
    }

    /// Fetch the fragments of a track
    pub async fn fetch(&self, track: &CaptionTrack) -> Result<FragmentSequence, TranscriptError> {
        self.fetcher.fetch(track).await
    }

    /// Derive the translated variant of a track
    pub fn translate(&self, track: &CaptionTrack, target_code: &str) -> Result<CaptionTrack, TranscriptError> {
        translator::translate(track, target_code)
    }

    /// List, select by preferred codes and fetch in one call
    pub async fn get_transcript<S: AsRef<str>>(
        &self,
        video_id: &str,
        preferred_codes: &[S],
    ) -> Result<FragmentSequence, TranscriptError> {
        let tracks = self.list_tracks(video_id).await?;
        let track = tracks.select(preferred_codes)?;
        info!("Using {} track {} ({})", track.kind_label(), track.language_code(), track.language_name());
        self.fetch(track).await
    }

    /// Fetch several tracks concurrently
    ///
    /// Returns one result per track, in input order; a failing track does not
    /// affect the others.
    pub async fn fetch_all(&self, tracks: &[CaptionTrack]) -> Vec<Result<FragmentSequence, TranscriptError>> {
        debug!("Fetching {} tracks concurrently", tracks.len());
        join_all(tracks.iter().map(|track| self.fetcher.fetch(track))).await
    }
}
