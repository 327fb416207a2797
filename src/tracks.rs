/*!
 * Caption track model and track selection.
 *
 * A `TrackList` holds every caption track a video offers, in the order the
 * service returned them. Selection never substitutes: when no track satisfies
 * the requested codes the caller gets `TranscriptError::NoMatch`.
 */

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::TranscriptError;

/// A language a track can be translated into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationLanguage {
    /// Language code as used by the service (e.g. "ja", "zh-Hans")
    pub code: String,
    /// Human-readable language name
    pub name: String,
}

impl TranslationLanguage {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// One available transcript for a video
///
/// Only built through `CaptionTrack::new`, which keeps translation targets
/// empty for tracks that cannot be translated.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    video_id: String,
    language_name: String,
    language_code: String,
    is_generated: bool,
    is_translatable: bool,
    translation_targets: Vec<TranslationLanguage>,
    source_locator: String,
}

impl CaptionTrack {
    /// Create a caption track.
    ///
    /// Translation targets are only kept for translatable tracks.
    pub fn new(
        video_id: impl Into<String>,
        language_name: impl Into<String>,
        language_code: impl Into<String>,
        is_generated: bool,
        is_translatable: bool,
        translation_targets: Vec<TranslationLanguage>,
        source_locator: impl Into<String>,
    ) -> Self {
        let translation_targets = if is_translatable {
            translation_targets
        } else {
            Vec::new()
        };

        Self {
            video_id: video_id.into(),
            language_name: language_name.into(),
            language_code: language_code.into(),
            is_generated,
            is_translatable,
            translation_targets,
            source_locator: source_locator.into(),
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn language_name(&self) -> &str {
        &self.language_name
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn is_generated(&self) -> bool {
        self.is_generated
    }

    pub fn is_translatable(&self) -> bool {
        self.is_translatable
    }

    pub fn translation_targets(&self) -> &[TranslationLanguage] {
        &self.translation_targets
    }

    /// Whether the track can be translated into `code`
    pub fn can_translate_to(&self, code: &str) -> bool {
        self.translation_targets.iter().any(|t| t.code == code)
    }

    /// URL the fragment payload is fetched from
    pub fn source_locator(&self) -> &str {
        &self.source_locator
    }

    /// "Manual" or "Auto-generated"
    pub fn kind_label(&self) -> &'static str {
        if self.is_generated {
            "Auto-generated"
        } else {
            "Manual"
        }
    }
}

impl fmt::Display for CaptionTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.language_name, self.language_code, self.kind_label())?;
        if self.is_translatable {
            write!(f, " [TRANSLATABLE]")?;
        }
        Ok(())
    }
}

/// Ordered caption tracks of one video, unique by (language code, generated flag)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackList {
    video_id: String,
    tracks: Vec<CaptionTrack>,
}

impl TrackList {
    /// Build a track list, dropping later duplicates of a (code, generated) pair
    pub fn new(video_id: impl Into<String>, tracks: Vec<CaptionTrack>) -> Self {
        let video_id = video_id.into();
        let mut unique: Vec<CaptionTrack> = Vec::with_capacity(tracks.len());

        for track in tracks {
            let duplicate = unique.iter().any(|t| {
                t.language_code == track.language_code && t.is_generated == track.is_generated
            });
            if duplicate {
                debug!(
                    "Dropping duplicate {} track {} for video {}",
                    track.kind_label(), track.language_code, video_id
                );
                continue;
            }
            unique.push(track);
        }

        Self { video_id, tracks: unique }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaptionTrack> {
        self.tracks.iter()
    }

    pub fn tracks(&self) -> &[CaptionTrack] {
        &self.tracks
    }

    /// Human-authored tracks, in list order
    pub fn manual(&self) -> impl Iterator<Item = &CaptionTrack> + Clone {
        self.tracks.iter().filter(|t| !t.is_generated)
    }

    /// Machine-transcribed tracks, in list order
    pub fn generated(&self) -> impl Iterator<Item = &CaptionTrack> + Clone {
        self.tracks.iter().filter(|t| t.is_generated)
    }

    /// Select a track by preferred language codes.
    ///
    /// Codes are tried in order; the first exact match wins. An empty
    /// preference list selects the first track.
    pub fn select<S: AsRef<str>>(&self, preferred_codes: &[S]) -> Result<&CaptionTrack, TranscriptError> {
        self.select_from(self.tracks.iter(), preferred_codes)
    }

    /// Select a manual track for `code`
    pub fn select_manual(&self, code: &str) -> Result<&CaptionTrack, TranscriptError> {
        self.select_manual_any(&[code])
    }

    /// Select a generated track for `code`
    pub fn select_generated(&self, code: &str) -> Result<&CaptionTrack, TranscriptError> {
        self.select_generated_any(&[code])
    }

    /// Select a manual track by preferred language codes
    pub fn select_manual_any<S: AsRef<str>>(&self, preferred_codes: &[S]) -> Result<&CaptionTrack, TranscriptError> {
        self.select_from(self.manual(), preferred_codes)
    }

    /// Select a generated track by preferred language codes
    pub fn select_generated_any<S: AsRef<str>>(&self, preferred_codes: &[S]) -> Result<&CaptionTrack, TranscriptError> {
        self.select_from(self.generated(), preferred_codes)
    }

    fn select_from<'a, I, S>(&'a self, candidates: I, preferred_codes: &[S]) -> Result<&'a CaptionTrack, TranscriptError>
    where
        I: Iterator<Item = &'a CaptionTrack> + Clone,
        S: AsRef<str>,
    {
        let found = if preferred_codes.is_empty() {
            candidates.clone().next()
        } else {
            preferred_codes.iter().find_map(|code| {
                candidates
                    .clone()
                    .find(|t| t.language_code == code.as_ref())
            })
        };

        found.ok_or_else(|| TranscriptError::NoMatch {
            requested: preferred_codes.iter().map(|c| c.as_ref().to_string()).collect(),
            available: candidates.map(|t| t.language_code.clone()).collect(),
        })
    }
}

impl<'a> IntoIterator for &'a TrackList {
    type Item = &'a CaptionTrack;
    type IntoIter = std::slice::Iter<'a, CaptionTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

impl fmt::Display for TrackList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Caption tracks for video {}", self.video_id)?;

        writeln!(f, "(MANUALLY CREATED)")?;
        let mut any = false;
        for track in self.manual() {
            writeln!(f, " - {}", track)?;
            any = true;
        }
        if !any {
            writeln!(f, "None")?;
        }

        writeln!(f, "(GENERATED)")?;
        any = false;
        for track in self.generated() {
            writeln!(f, " - {}", track)?;
            any = true;
        }
        if !any {
            writeln!(f, "None")?;
        }

        Ok(())
    }
}
