use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

// @module: Timed text fragments

/// One timed unit of caption text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    // @field: Decoded plain text, may be empty
    pub text: String,

    // @field: Start offset in seconds
    pub start: f64,

    // @field: Duration in seconds, None when the source did not provide one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl Fragment {
    /// Create a fragment with a known duration
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration: Some(duration),
        }
    }

    /// Create a fragment whose duration is unknown
    pub fn without_duration(text: impl Into<String>, start: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration: None,
        }
    }

    /// End offset in seconds, when the duration is known
    pub fn end(&self) -> Option<f64> {
        self.duration.map(|d| self.start + d)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:.2}s] {}", self.start, self.text)
    }
}

/// Fragments of one fetched track, ordered by start time.
///
/// The sequence is immutable once built. Construction performs a stable sort,
/// so fragments sharing a start time keep their source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentSequence {
    fragments: Vec<Fragment>,
}

impl FragmentSequence {
    /// Build a sequence, sorting fragments by start time
    pub fn new(mut fragments: Vec<Fragment>) -> Self {
        fragments.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self { fragments }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Consume the sequence and return the owned fragments
    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }

    /// Total covered time in seconds (end of the last timed fragment)
    pub fn total_duration(&self) -> f64 {
        self.fragments
            .iter()
            .map(|f| f.end().unwrap_or(f.start))
            .fold(0.0, f64::max)
    }
}

impl Deref for FragmentSequence {
    type Target = [Fragment];

    fn deref(&self) -> &Self::Target {
        &self.fragments
    }
}

impl From<Vec<Fragment>> for FragmentSequence {
    fn from(fragments: Vec<Fragment>) -> Self {
        Self::new(fragments)
    }
}

impl FromIterator<Fragment> for FragmentSequence {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FragmentSequence {
    type Item = &'a Fragment;
    type IntoIter = std::slice::Iter<'a, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}
