use std::sync::Arc;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TranscriptError;
use crate::fragments::{Fragment, FragmentSequence};
use crate::tracks::CaptionTrack;
use crate::transport::Transport;

// @module: Timed text retrieval and decoding

// @const: Opening tag of the transcript root element
static ROOT_OPEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<transcript\b[^>]*?(/?)>").unwrap()
});

// @const: Opening tag of a text element, self-closing or not
static TEXT_OPEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<text\b([^>]*?)(/?)>").unwrap()
});

// @const: Double-quoted attribute
static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_][\w.-]*)\s*=\s*"([^"]*)""#).unwrap()
});

// @const: Named or numeric character reference
static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[A-Za-z][A-Za-z0-9]*);").unwrap()
});

// @const: Inline markup tag
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^<>]*>").unwrap()
});

/// Payloads are entity-escaped once for XML and once more for HTML
const ENTITY_DECODE_PASSES: usize = 2;

/// Retrieves and decodes the fragments of a caption track
#[derive(Debug, Clone)]
pub struct TrackFetcher {
    transport: Arc<dyn Transport>,
}

impl TrackFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the fragments of `track`
    ///
    /// Transport failures surface as `TranscriptError::Fetch`, malformed
    /// payloads as `TranscriptError::Parse`.
    pub async fn fetch(&self, track: &CaptionTrack) -> Result<FragmentSequence, TranscriptError> {
        debug!(
            "Fetching {} track {} of video {}",
            track.kind_label(), track.language_code(), track.video_id()
        );

        let payload = self.transport
            .request(track.source_locator())
            .await
            .map_err(TranscriptError::Fetch)?;

        let fragments = parse_timedtext(&payload)?;
        debug!("Parsed {} fragments for track {}", fragments.len(), track.language_code());

        Ok(fragments)
    }
}

/// Parse a timedtext XML payload into a sorted fragment sequence
pub fn parse_timedtext(payload: &[u8]) -> Result<FragmentSequence, TranscriptError> {
    let content = std::str::from_utf8(payload)
        .map_err(|e| TranscriptError::Parse(format!("Payload is not valid UTF-8: {}", e)))?;

    let root = ROOT_OPEN_REGEX.captures(content)
        .ok_or_else(|| TranscriptError::Parse("Missing <transcript> root element".to_string()))?;
    let root_match = root.get(0).map(|m| m.end()).unwrap_or_default();

    // <transcript/> carries no fragments
    if root.get(1).is_some_and(|m| m.as_str() == "/") {
        return Ok(FragmentSequence::default());
    }

    let body_len = content[root_match..].find("</transcript>")
        .ok_or_else(|| TranscriptError::Parse("Unterminated <transcript> element".to_string()))?;
    let body = &content[root_match..root_match + body_len];

    let mut fragments = Vec::new();
    let mut cursor = 0;

    while let Some(open) = TEXT_OPEN_REGEX.captures(&body[cursor..]) {
        let whole = open.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
        let attributes = open.get(1).map_or("", |m| m.as_str());
        let self_closing = open.get(2).is_some_and(|m| m.as_str() == "/");
        let content_start = cursor + whole.1;
        let index = fragments.len();

        let (start, duration) = parse_timing(attributes, index)?;

        let raw_text = if self_closing {
            cursor = content_start;
            ""
        } else {
            let len = body[content_start..].find("</text>")
                .ok_or_else(|| TranscriptError::Parse(format!("Unterminated <text> element at fragment {}", index)))?;
            cursor = content_start + len + "</text>".len();
            &body[content_start..content_start + len]
        };

        fragments.push(Fragment {
            text: decode_text(raw_text),
            start,
            duration,
        });
    }

    Ok(FragmentSequence::new(fragments))
}

/// Read `start` (required) and `dur` (optional) from a text element
fn parse_timing(attributes: &str, index: usize) -> Result<(f64, Option<f64>), TranscriptError> {
    let mut start = None;
    let mut duration = None;

    for attr in ATTRIBUTE_REGEX.captures_iter(attributes) {
        let value = attr.get(2).map_or("", |m| m.as_str());
        match attr.get(1).map_or("", |m| m.as_str()) {
            "start" => start = Some(value),
            "dur" => duration = Some(value),
            _ => {}
        }
    }

    let start_text = start
        .ok_or_else(|| TranscriptError::Parse(format!("Fragment {} has no start attribute", index)))?;
    let start: f64 = start_text.trim().parse()
        .ok()
        .filter(|s: &f64| s.is_finite() && *s >= 0.0)
        .ok_or_else(|| TranscriptError::Parse(format!("Fragment {} has invalid start {:?}", index, start_text)))?;

    let duration = match duration {
        Some(text) => match text.trim().parse::<f64>() {
            Ok(d) if d.is_finite() && d >= 0.0 => Some(d),
            _ => {
                warn!("Ignoring invalid duration {:?} of fragment {}", text, index);
                None
            }
        },
        None => None,
    };

    Ok((start, duration))
}

/// Decode HTML character references (named and numeric), then drop inline markup
pub fn decode_text(raw: &str) -> String {
    let mut text = raw.to_string();
    for _ in 0..ENTITY_DECODE_PASSES {
        if !ENTITY_REGEX.is_match(&text) {
            break;
        }
        text = html_escape::decode_html_entities(&text).into_owned();
    }
    TAG_REGEX.replace_all(&text, "").into_owned()
}
