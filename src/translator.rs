use log::debug;
use url::Url;

use crate::errors::TranscriptError;
use crate::tracks::CaptionTrack;

// @module: Translated track derivation

/// Query parameter selecting the translation language of a timedtext payload
const TRANSLATION_PARAM: &str = "tlang";

/// Derive the translated variant of `track`.
///
/// The result is not translatable itself and carries no translation targets.
/// No request is made: the translated payload is fetched like any other track.
pub fn translate(track: &CaptionTrack, target_code: &str) -> Result<CaptionTrack, TranscriptError> {
    if !track.is_translatable() {
        return Err(TranscriptError::NotTranslatable {
            language_code: track.language_code().to_string(),
        });
    }

    let target = track.translation_targets()
        .iter()
        .find(|t| t.code == target_code)
        .ok_or_else(|| TranscriptError::UnsupportedLanguage {
            requested: target_code.to_string(),
            available: track.translation_targets().iter().map(|t| t.code.clone()).collect(),
        })?;

    let locator = translated_locator(track.source_locator(), target_code)?;
    debug!(
        "Translating track {} of video {} to {}",
        track.language_code(), track.video_id(), target_code
    );

    Ok(CaptionTrack::new(
        track.video_id(),
        target.name.clone(),
        target_code,
        track.is_generated(),
        false,
        Vec::new(),
        locator,
    ))
}

/// Locator with the translation parameter set to `target_code`, replacing any
/// existing value
fn translated_locator(locator: &str, target_code: &str) -> Result<String, TranscriptError> {
    let mut url = Url::parse(locator)
        .map_err(|e| TranscriptError::Parse(format!("Invalid track locator {:?}: {}", locator, e)))?;

    let kept: Vec<(String, String)> = url.query_pairs()
        .filter(|(key, _)| key != TRANSLATION_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(TRANSLATION_PARAM, target_code);

    Ok(url.to_string())
}
