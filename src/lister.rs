/*!
 * Caption track listing.
 *
 * The watch page of a video embeds a `"captions":` JSON object holding the
 * caption track renderer. The lister requests the page through the
 * transport, deserializes that object and turns it into a `TrackList`.
 */

use std::sync::Arc;

use log::debug;
use serde::Deserialize;
use url::Url;

use crate::errors::{TranscriptError, TransportError};
use crate::tracks::{CaptionTrack, TrackList, TranslationLanguage};
use crate::transport::Transport;

/// Marker preceding the captions object in a watch page
const CAPTIONS_MARKER: &str = "\"captions\":";

/// Present on the page served instead of the video when requests are throttled
const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";

/// Format parameter that switches the timedtext payload away from plain XML
const SRV3_FORMAT_PARAM: &str = "&fmt=srv3";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionsObject {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<RendererTrack>,
    #[serde(default)]
    translation_languages: Vec<RendererTranslationLanguage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RendererTrack {
    base_url: String,
    #[serde(default)]
    name: RendererText,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    is_translatable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RendererTranslationLanguage {
    language_code: String,
    #[serde(default)]
    language_name: RendererText,
}

/// Text as rendered by the service: either `simpleText` or a list of runs
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RendererText {
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<RendererRun>,
}

#[derive(Debug, Deserialize)]
struct RendererRun {
    text: String,
}

impl RendererText {
    fn resolve(&self, fallback: &str) -> String {
        if let Some(text) = &self.simple_text {
            return text.clone();
        }
        let joined: String = self.runs.iter().map(|r| r.text.as_str()).collect();
        if joined.is_empty() {
            fallback.to_string()
        } else {
            joined
        }
    }
}

/// Lists the caption tracks of a video
#[derive(Debug, Clone)]
pub struct TrackLister {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl TrackLister {
    pub fn new(transport: Arc<dyn Transport>, base_url: Url) -> Self {
        Self { transport, base_url }
    }

    /// Watch page URL for a video
    pub fn watch_url(&self, video_id: &str) -> Result<Url, TranscriptError> {
        let mut url = self.base_url.join("watch")
            .map_err(|e| TranscriptError::Parse(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        url.query_pairs_mut().append_pair("v", video_id);
        Ok(url)
    }

    /// List the caption tracks available for `video_id`
    pub async fn list_tracks(&self, video_id: &str) -> Result<TrackList, TranscriptError> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(TranscriptError::InvalidVideoId(video_id.to_string()));
        }

        let url = self.watch_url(video_id)?;
        debug!("Listing caption tracks for video {}", video_id);

        let page = self.transport
            .request(url.as_str())
            .await
            .map_err(TranscriptError::Network)?;
        let html = String::from_utf8_lossy(&page);

        let tracks = parse_watch_page(video_id, &html, &self.base_url)?;
        debug!("Found {} caption tracks for video {}", tracks.len(), video_id);

        Ok(tracks)
    }
}

/// Extract the caption tracks embedded in a watch page
pub fn parse_watch_page(video_id: &str, html: &str, base_url: &Url) -> Result<TrackList, TranscriptError> {
    let not_found = || TranscriptError::NotFound { video_id: video_id.to_string() };

    let Some(position) = html.find(CAPTIONS_MARKER) else {
        if html.contains(RECAPTCHA_MARKER) {
            return Err(TranscriptError::Network(TransportError::Status {
                status_code: 429,
                message: "Too many requests: the service answered with a captcha".to_string(),
            }));
        }
        debug!("Watch page of {} has no captions object", video_id);
        return Err(not_found());
    };

    let rest = &html[position + CAPTIONS_MARKER.len()..];
    let captions: CaptionsObject = serde_json::Deserializer::from_str(rest)
        .into_iter::<CaptionsObject>()
        .next()
        .ok_or_else(not_found)?
        .map_err(|e| TranscriptError::Parse(format!("Invalid captions object: {}", e)))?;

    let renderer = captions.player_captions_tracklist_renderer.ok_or_else(not_found)?;
    if renderer.caption_tracks.is_empty() {
        return Err(not_found());
    }

    let targets: Vec<TranslationLanguage> = renderer.translation_languages
        .iter()
        .map(|l| TranslationLanguage::new(l.language_code.clone(), l.language_name.resolve(&l.language_code)))
        .collect();

    let mut tracks = Vec::with_capacity(renderer.caption_tracks.len());
    for raw in &renderer.caption_tracks {
        let locator = resolve_locator(&raw.base_url, base_url)?;
        tracks.push(CaptionTrack::new(
            video_id,
            raw.name.resolve(&raw.language_code),
            raw.language_code.clone(),
            raw.kind.as_deref() == Some("asr"),
            raw.is_translatable,
            targets.clone(),
            locator,
        ));
    }

    Ok(TrackList::new(video_id, tracks))
}

/// Make a track URL absolute and request the plain XML payload
fn resolve_locator(raw: &str, base_url: &Url) -> Result<String, TranscriptError> {
    let raw = raw.replace(SRV3_FORMAT_PARAM, "");
    let url = base_url.join(&raw)
        .map_err(|e| TranscriptError::Parse(format!("Invalid track URL {:?}: {}", raw, e)))?;
    Ok(url.to_string())
}
