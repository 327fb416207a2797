/*!
 * Tests for the track model and track selection
 */

use ytcap::errors::TranscriptError;
use ytcap::tracks::TrackList;
use crate::common;

/// Test that an empty preference list picks the first track
#[test]
fn test_select_withNoPreferences_shouldReturnFirstTrack() {
    let tracks = common::english_tracks();
    let empty: [&str; 0] = [];

    let selected = tracks.select(&empty).unwrap();

    assert_eq!(selected, &tracks.tracks()[0]);
}

/// Test that preferences are tried in order
#[test]
fn test_select_withSeveralPreferences_shouldHonorPreferenceOrder() {
    let tracks = TrackList::new(
        common::VIDEO_ID,
        vec![common::track("de", false, false), common::track("en", false, true)],
    );

    assert_eq!(tracks.select(&["fr", "en", "de"]).unwrap().language_code(), "en");
    assert_eq!(tracks.select(&["de", "en"]).unwrap().language_code(), "de");
}

/// Test that the first track in list order wins among same-code tracks
#[test]
fn test_select_withManualAndGeneratedSameCode_shouldReturnListOrder() {
    let tracks = common::english_tracks();

    let selected = tracks.select(&["en"]).unwrap();

    assert!(!selected.is_generated());
}

/// Test the manual and generated filters
#[test]
fn test_select_manual_and_generated_withEnglishTracks_shouldFilterByKind() {
    let tracks = common::english_tracks();

    let manual = tracks.select_manual("en").unwrap();
    let generated = tracks.select_generated("en").unwrap();

    assert!(!manual.is_generated());
    assert!(manual.is_translatable());
    assert!(generated.is_generated());
}

/// Test that a missing code reports what was requested and what exists
#[test]
fn test_select_withUnknownCode_shouldReturnNoMatch() {
    let tracks = common::english_tracks();

    let err = tracks.select(&["fr"]).unwrap_err();

    assert_eq!(
        err,
        TranscriptError::NoMatch {
            requested: vec!["fr".to_string()],
            available: vec!["en".to_string(), "en".to_string()],
        }
    );
}

/// Test that an empty list never yields a track
#[test]
fn test_select_withEmptyList_shouldReturnNoMatch() {
    let tracks = TrackList::new(common::VIDEO_ID, Vec::new());
    let empty: [&str; 0] = [];

    assert!(matches!(tracks.select(&empty), Err(TranscriptError::NoMatch { .. })));
    assert!(matches!(tracks.select_manual("en"), Err(TranscriptError::NoMatch { .. })));
}

/// Test that the kind filters only look at their own kind
#[test]
fn test_select_generated_any_withOnlyManualMatch_shouldReturnNoMatch() {
    let tracks = TrackList::new(
        common::VIDEO_ID,
        vec![common::track("de", false, false), common::track("en", true, false)],
    );

    let err = tracks.select_generated_any(&["de"]).unwrap_err();

    assert_eq!(
        err,
        TranscriptError::NoMatch {
            requested: vec!["de".to_string()],
            available: vec!["en".to_string()],
        }
    );
    assert_eq!(tracks.select_manual_any(&["en", "de"]).unwrap().language_code(), "de");
}

/// Test that duplicates of a (code, kind) pair keep the first occurrence
#[test]
fn test_track_list_withDuplicatePairs_shouldKeepFirst() {
    let first = common::track("en", false, true);
    let tracks = TrackList::new(
        common::VIDEO_ID,
        vec![first.clone(), common::track("en", false, false), common::track("en", true, false)],
    );

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks.tracks()[0], first);
    assert_eq!(tracks.manual().count(), 1);
    assert_eq!(tracks.generated().count(), 1);
}

/// Test that non-translatable tracks never carry targets
#[test]
fn test_caption_track_withoutTranslation_shouldDropTargets() {
    let track = common::track("de", false, false);

    assert!(track.translation_targets().is_empty());
    assert!(!track.can_translate_to("ja"));
}

/// Test the human readable listing
#[test]
fn test_track_list_display_withNoGeneratedTracks_shouldPrintNone() {
    let tracks = TrackList::new(common::VIDEO_ID, vec![common::track("en", false, true)]);

    let listing = tracks.to_string();

    assert!(listing.contains("(MANUALLY CREATED)"));
    assert!(listing.contains("Language en (en) - Manual [TRANSLATABLE]"));
    assert!(listing.contains("(GENERATED)\nNone"));
}
