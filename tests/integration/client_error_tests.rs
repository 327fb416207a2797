/*!
 * Integration tests for the failure paths surfaced by the client
 */

use ytcap::errors::{TranscriptError, TransportError};
use ytcap::MockTransport;
use crate::common;

/// Test a video whose page carries no captions
#[tokio::test]
async fn test_list_tracks_withoutCaptions_shouldReturnNotFound() {
    let transport = MockTransport::new()
        .with_response(&common::watch_url("nocaptions"), common::watch_page_without_captions());
    let client = common::client_with(transport);

    let err = client.list_tracks("nocaptions").await.unwrap_err();

    assert_eq!(err, TranscriptError::NotFound { video_id: "nocaptions".to_string() });
}

/// Test a captions object with an empty track list
#[tokio::test]
async fn test_list_tracks_withEmptyTrackList_shouldReturnNotFound() {
    let page = r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[],"translationLanguages":[]}},"videoDetails":{}}"#;
    let transport = MockTransport::new().with_response(&common::watch_url("empty"), page);
    let client = common::client_with(transport);

    let err = client.list_tracks("empty").await.unwrap_err();

    assert!(matches!(err, TranscriptError::NotFound { .. }));
}

/// Test a transport failure while listing
#[tokio::test]
async fn test_list_tracks_withTransportFailure_shouldReturnNetwork() {
    let cause = TransportError::ConnectionError("connection reset".to_string());
    let transport = MockTransport::new().with_error(&common::watch_url(common::VIDEO_ID), cause.clone());
    let client = common::client_with(transport);

    let err = client.list_tracks(common::VIDEO_ID).await.unwrap_err();

    assert_eq!(err, TranscriptError::Network(cause));
}

/// Test a captcha page instead of the watch page
#[tokio::test]
async fn test_list_tracks_withCaptchaPage_shouldReturnTooManyRequests() {
    let transport = MockTransport::new().with_response(
        &common::watch_url(common::VIDEO_ID),
        r#"<html><form><div class="g-recaptcha" data-sitekey="x"></div></form></html>"#,
    );
    let client = common::client_with(transport);

    let err = client.list_tracks(common::VIDEO_ID).await.unwrap_err();

    assert!(matches!(
        err,
        TranscriptError::Network(TransportError::Status { status_code: 429, .. })
    ));
}

/// Test a blank video id
#[tokio::test]
async fn test_list_tracks_withBlankVideoId_shouldNotRequest() {
    let transport = common::sample_transport();
    let client = common::client_with(transport.clone());

    let err = client.list_tracks("   ").await.unwrap_err();

    assert!(matches!(err, TranscriptError::InvalidVideoId(_)));
    assert_eq!(transport.request_count(), 0);
}

/// Test a transport failure while fetching fragments
#[tokio::test]
async fn test_fetch_withTransportFailure_shouldReturnFetch() {
    let cause = TransportError::Timeout("request took longer than 30s".to_string());
    let transport = common::sample_transport().with_error(common::EN_GENERATED_LOCATOR, cause.clone());
    let client = common::client_with(transport);

    let tracks = client.list_tracks(common::VIDEO_ID).await.unwrap();
    let err = client.fetch(tracks.select_generated("en").unwrap()).await.unwrap_err();

    assert_eq!(err, TranscriptError::Fetch(cause));
}

/// Test a payload that is not timed text
#[tokio::test]
async fn test_fetch_withMalformedPayload_shouldReturnParse() {
    let transport = common::sample_transport()
        .with_response(common::EN_MANUAL_LOCATOR, "<html>Service unavailable</html>");
    let client = common::client_with(transport);

    let err = client.get_transcript(common::VIDEO_ID, &["en"]).await.unwrap_err();

    assert!(matches!(err, TranscriptError::Parse(_)));
}

/// Test that selection failures are reported before any fetch
#[tokio::test]
async fn test_get_transcript_withUnavailableLanguage_shouldReturnNoMatch() {
    let transport = common::sample_transport();
    let client = common::client_with(transport.clone());

    let err = client.get_transcript(common::VIDEO_ID, &["fr", "es"]).await.unwrap_err();

    assert_eq!(
        err,
        TranscriptError::NoMatch {
            requested: vec!["fr".to_string(), "es".to_string()],
            available: vec!["en".to_string(), "en".to_string(), "de".to_string()],
        }
    );
    assert_eq!(transport.request_count(), 1);
}

/// Test translating a listed track that offers no translations
#[tokio::test]
async fn test_translate_withUntranslatableListedTrack_shouldFail() {
    let client = common::client_with(common::sample_transport());

    let tracks = client.list_tracks(common::VIDEO_ID).await.unwrap();
    let german = tracks.select_manual("de").unwrap();

    assert!(matches!(
        client.translate(german, "ja"),
        Err(TranscriptError::NotTranslatable { .. })
    ));
}

/// Test a payload with a negative start offset
#[tokio::test]
async fn test_fetch_withNegativeStart_shouldReturnParse() {
    let transport = common::sample_transport().with_response(
        common::EN_MANUAL_LOCATOR,
        common::timedtext(&[("too early", -3.0, 1.0), ("fine", 0.0, 1.0)]),
    );
    let client = common::client_with(transport);

    let err = client.get_transcript(common::VIDEO_ID, &["en"]).await.unwrap_err();

    assert!(matches!(err, TranscriptError::Parse(_)));
}
