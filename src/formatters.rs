/*!
 * Output formats for fetched fragment sequences.
 *
 * Every format is a variant of the closed `Formatter` enum. Formatting is a
 * pure function of the sequence: it validates the fragments first and then
 * renders them, so malformed timings are reported instead of producing
 * corrupt subtitle files.
 */

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TranscriptError;
use crate::fragments::{Fragment, FragmentSequence};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    /// Fragment texts, one per line
    #[default]
    #[serde(rename = "text")]
    PlainText,
    /// JSON array of {text, start, duration}
    Json,
    /// SubRip subtitle file
    Srt,
    /// WebVTT subtitle file
    #[serde(rename = "vtt")]
    WebVtt,
}

impl Formatter {
    /// All formats, in display order
    pub const ALL: [Formatter; 4] = [Formatter::PlainText, Formatter::Json, Formatter::Srt, Formatter::WebVtt];

    /// Render a fragment sequence in this format
    pub fn format(&self, fragments: &FragmentSequence) -> Result<String, TranscriptError> {
        validate(fragments)?;

        let output = match self {
            Formatter::PlainText => format_plain_text(fragments),
            Formatter::Json => format_json(fragments)?,
            Formatter::Srt => format_timed(fragments, TimedStyle::Srt),
            Formatter::WebVtt => format_timed(fragments, TimedStyle::WebVtt),
        };

        Ok(output)
    }

    /// File extension for files written in this format
    pub fn extension(&self) -> &'static str {
        match self {
            Formatter::PlainText => "txt",
            Formatter::Json => "json",
            Formatter::Srt => "srt",
            Formatter::WebVtt => "vtt",
        }
    }

    /// Short identifier, as accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            Formatter::PlainText => "text",
            Formatter::Json => "json",
            Formatter::Srt => "srt",
            Formatter::WebVtt => "vtt",
        }
    }
}

impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Formatter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(Formatter::PlainText),
            "json" => Ok(Formatter::Json),
            "srt" => Ok(Formatter::Srt),
            "vtt" | "webvtt" => Ok(Formatter::WebVtt),
            _ => Err(anyhow::anyhow!("Invalid output format: {}", s)),
        }
    }
}

/// Reject fragments whose timings cannot be rendered
fn validate(fragments: &FragmentSequence) -> Result<(), TranscriptError> {
    for (index, fragment) in fragments.iter().enumerate() {
        if !fragment.start.is_finite() {
            return Err(TranscriptError::InvalidFragment {
                index,
                reason: format!("start is not a finite number ({})", fragment.start),
            });
        }
        if let Some(duration) = fragment.duration {
            if !duration.is_finite() {
                return Err(TranscriptError::InvalidFragment {
                    index,
                    reason: format!("duration is not a finite number ({})", duration),
                });
            }
            if duration < 0.0 {
                return Err(TranscriptError::InvalidFragment {
                    index,
                    reason: format!("duration is negative ({})", duration),
                });
            }
        }
    }
    Ok(())
}

fn format_plain_text(fragments: &FragmentSequence) -> String {
    fragments
        .iter()
        .filter(|f| !f.text.is_empty())
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_json(fragments: &FragmentSequence) -> Result<String, TranscriptError> {
    serde_json::to_string(fragments.fragments())
        .map_err(|e| TranscriptError::Parse(format!("Failed to serialize fragments: {}", e)))
}

/// Parse the output of `Formatter::Json` back into a sequence
pub fn parse_json(json: &str) -> Result<FragmentSequence, TranscriptError> {
    let fragments: Vec<Fragment> = serde_json::from_str(json)
        .map_err(|e| TranscriptError::Parse(format!("Invalid fragment JSON: {}", e)))?;
    Ok(FragmentSequence::new(fragments))
}

#[derive(Clone, Copy)]
enum TimedStyle {
    Srt,
    WebVtt,
}

/// End time of fragment `index`: start + duration when known, the next
/// fragment's start otherwise, never before its own start
fn end_time(fragments: &[Fragment], index: usize) -> f64 {
    let fragment = &fragments[index];
    let end = match fragment.duration {
        Some(duration) => fragment.start + duration,
        None => fragments
            .get(index + 1)
            .map(|next| next.start)
            .unwrap_or(fragment.start),
    };
    end.max(fragment.start)
}

fn format_timed(sequence: &FragmentSequence, style: TimedStyle) -> String {
    let fragments = sequence.fragments();
    let mut output = String::new();

    if let TimedStyle::WebVtt = style {
        output.push_str("WEBVTT\n\n");
    }

    // Empty fragments produce no cue; cue numbers stay contiguous
    let cues = fragments.iter().enumerate().filter(|(_, f)| !f.text.is_empty());
    for (number, (i, fragment)) in (1..).zip(cues) {
        let start = format_timestamp(fragment.start, style);
        let end = format_timestamp(end_time(fragments, i), style);

        // Writing to a String cannot fail
        if let TimedStyle::Srt = style {
            let _ = writeln!(output, "{}", number);
        }
        let _ = writeln!(output, "{} --> {}", start, end);
        let _ = writeln!(output, "{}", fragment.text);
        output.push('\n');
    }

    output
}

/// Seconds to `HH:MM:SS,mmm` (SRT) or `HH:MM:SS.mmm` (WebVTT), clamping
/// negative values to zero
fn format_timestamp(seconds: f64, style: TimedStyle) -> String {
    let ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    let separator = match style {
        TimedStyle::Srt => ',',
        TimedStyle::WebVtt => '.',
    };
    format!("{:02}:{:02}:{:02}{}{:03}", hours, minutes, secs, separator, millis)
}
