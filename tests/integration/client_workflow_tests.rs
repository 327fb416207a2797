/*!
 * Integration tests for listing, fetching and translating through the client
 */

use std::str::FromStr;
use anyhow::Result;

use ytcap::file_utils::FileManager;
use ytcap::formatters::{parse_json, Formatter};
use crate::common;

/// Test listing the tracks of the sample watch page
#[tokio::test]
async fn test_list_tracks_withSampleWatchPage_shouldReturnAllTracks() {
    common::init_logging();
    let transport = common::sample_transport();
    let client = common::client_with(transport.clone());

    let tracks = client.list_tracks(common::VIDEO_ID).await.unwrap();

    assert_eq!(tracks.video_id(), common::VIDEO_ID);
    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks.manual().count(), 2);
    assert_eq!(tracks.generated().count(), 1);
    assert_eq!(transport.requested(), vec![common::watch_url(common::VIDEO_ID)]);

    let manual = tracks.select_manual("en").unwrap();
    assert_eq!(manual.language_name(), "English");
    assert_eq!(manual.source_locator(), common::EN_MANUAL_LOCATOR);
    assert!(manual.can_translate_to("ja"));

    let generated = tracks.select_generated("en").unwrap();
    assert_eq!(generated.language_name(), "English (auto-generated)");
    assert_eq!(generated.source_locator(), common::EN_GENERATED_LOCATOR);

    let german = tracks.select_manual("de").unwrap();
    assert!(!german.is_translatable());
    assert!(german.translation_targets().is_empty());
}

/// Test the complete list, select, fetch and format workflow
#[tokio::test]
async fn test_fetch_withManualTrack_shouldReturnDecodedFragments() {
    let client = common::client_with(common::sample_transport());

    let tracks = client.list_tracks(common::VIDEO_ID).await.unwrap();
    let track = tracks.select(&["de", "en"]).unwrap();
    let fragments = client.fetch(track).await.unwrap();

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text, "Hallo");
    assert_eq!(fragments[0].duration, Some(1.0));
}

/// Test fetching a translated track
#[tokio::test]
async fn test_translate_then_fetch_withListedTarget_shouldRequestTranslatedLocator() {
    let transport = common::sample_transport();
    let client = common::client_with(transport.clone());

    let tracks = client.list_tracks(common::VIDEO_ID).await.unwrap();
    let source = tracks.select_manual("en").unwrap();
    let translated = client.translate(source, "ja").unwrap();
    let fragments = client.fetch(&translated).await.unwrap();

    assert_eq!(translated.source_locator(), common::JA_TRANSLATED_LOCATOR);
    assert_eq!(translated.language_name(), "Japanese");
    assert_eq!(Formatter::PlainText.format(&fragments).unwrap(), "やあ\n元気ですか");
    assert_eq!(transport.request_count(), 2);
}

/// Test the one-call transcript helper
#[tokio::test]
async fn test_get_transcript_withPreferredCodes_shouldUseFirstAvailable() {
    let client = common::client_with(common::sample_transport());

    let fragments = client.get_transcript(common::VIDEO_ID, &["fr", "en"]).await.unwrap();

    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].text, "Hey there");
    assert_eq!(fragments.total_duration(), 3.5);
}

/// Test fetching several tracks at once
#[tokio::test]
async fn test_fetch_all_withOneMissingPayload_shouldKeepOtherResults() {
    let client = common::client_with(common::sample_transport());

    let tracks = client.list_tracks(common::VIDEO_ID).await.unwrap();
    let mut wanted = tracks.tracks().to_vec();
    wanted.push(common::track("fr", false, false));

    let results = client.fetch_all(&wanted).await;

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_ref().unwrap()[0].text, "Hey there");
    assert_eq!(results[1].as_ref().unwrap()[0].text, "hey there");
    assert_eq!(results[2].as_ref().unwrap()[0].text, "Hallo");
    assert!(results[3].is_err());
}

/// Test entity decoding and markup stripping on the fetched text
#[tokio::test]
async fn test_fetch_withEscapedPayload_shouldDecodeText() {
    let transport = common::sample_transport().with_response(
        common::EN_MANUAL_LOCATOR,
        common::timedtext(&[
            ("I&amp;#39;m here", 0.0, 1.0),
            ("&lt;i&gt;quietly&lt;/i&gt; &amp;amp; calmly", 1.0, 1.0),
        ]),
    );
    let client = common::client_with(transport);

    let fragments = client.get_transcript(common::VIDEO_ID, &["en"]).await.unwrap();

    assert_eq!(fragments[0].text, "I'm here");
    assert_eq!(fragments[1].text, "quietly & calmly");
}

/// Test that HTML named entities beyond the XML set are decoded
#[tokio::test]
async fn test_fetch_withHtmlNamedEntities_shouldDecodeToPlainText() {
    let transport = common::sample_transport().with_response(
        common::EN_MANUAL_LOCATOR,
        common::timedtext(&[("caf&amp;eacute; &amp;hellip; &amp;mdash; na&amp;iuml;ve", 0.0, 1.0)]),
    );
    let client = common::client_with(transport);

    let fragments = client.get_transcript(common::VIDEO_ID, &["en"]).await.unwrap();

    assert_eq!(fragments[0].text, "café … — naïve");
    assert!(!fragments[0].text.contains('&'));
}

/// Test fetching, formatting and writing a transcript file
#[test]
fn test_fetch_and_write_withJsonFormat_shouldRoundTripFromDisk() -> Result<()> {
    let client = common::client_with(common::sample_transport());
    let temp_dir = common::create_temp_dir()?;

    let fragments = tokio_test::block_on(client.get_transcript(common::VIDEO_ID, &["en"]))?;
    let format = Formatter::from_str("json")?;
    let path = FileManager::output_path(temp_dir.path(), common::VIDEO_ID, "en", format);
    FileManager::write_output(&path, &format.format(&fragments)?, false)?;

    let parsed = parse_json(&std::fs::read_to_string(&path)?)?;

    assert_eq!(parsed, fragments);
    assert!(path.ends_with("dQw4w9WgXcQ.en.json"));
    Ok(())
}
