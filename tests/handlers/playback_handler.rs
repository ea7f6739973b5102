//! Integration tests for SpotifyPlayback.

use crate::common::{args, dispatcher_with, fixtures, text, Call, StubClient};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_each_action_makes_exactly_one_call() {
    let cases = [
        (json!({ "action": "get" }), "get_currently_playing"),
        (json!({ "action": "start" }), "start_playback"),
        (json!({ "action": "pause" }), "pause_playback"),
        (json!({ "action": "skip", "num_skips": 2 }), "skip_tracks"),
    ];

    for (arguments, operation) in cases {
        let (dispatcher, stub) = dispatcher_with(StubClient::new());
        let envelope = dispatcher
            .dispatch("SpotifyPlayback", args(arguments))
            .await
            .unwrap();

        assert_eq!(envelope.items().len(), 1);
        assert!(!envelope.is_error());
        assert_eq!(stub.operations(), vec![operation]);
    }
}

#[tokio::test]
async fn test_get_with_nothing_playing() {
    let (dispatcher, _stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher
        .dispatch("SpotifyPlayback", args(json!({ "action": "get" })))
        .await
        .unwrap();
    assert_eq!(text(&envelope), "No track playing.");
}

#[tokio::test]
async fn test_get_returns_track_as_json() {
    let stub = StubClient {
        now_playing: Some(fixtures::track()),
        ..StubClient::new()
    };
    let (dispatcher, _stub) = dispatcher_with(stub);

    let envelope = dispatcher
        .dispatch("SpotifyPlayback", args(json!({ "action": "get" })))
        .await
        .unwrap();

    let rendered: serde_json::Value = serde_json::from_str(text(&envelope)).unwrap();
    assert_eq!(rendered, fixtures::track());
    assert!(text(&envelope).contains("\n  \"name\": \"Mama\""));
}

#[tokio::test]
async fn test_start_passes_optional_uri() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());

    let envelope = dispatcher
        .dispatch(
            "SpotifyPlayback",
            args(json!({ "action": "start", "spotify_uri": fixtures::ALBUM_URI })),
        )
        .await
        .unwrap();
    assert_eq!(text(&envelope), "Playback starting.");

    dispatcher
        .dispatch("SpotifyPlayback", args(json!({ "action": "start" })))
        .await
        .unwrap();

    assert_eq!(
        stub.calls(),
        vec![
            Call::StartPlayback(Some(fixtures::ALBUM_URI.into())),
            Call::StartPlayback(None),
        ]
    );
}

#[tokio::test]
async fn test_skip_defaults_to_one() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher
        .dispatch("SpotifyPlayback", args(json!({ "action": "skip" })))
        .await
        .unwrap();

    assert_eq!(text(&envelope), "Skipped to next track.");
    assert_eq!(stub.calls(), vec![Call::SkipTracks(1)]);
}

#[tokio::test]
async fn test_skip_count_is_a_single_call() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher
        .dispatch("SpotifyPlayback", args(json!({ "action": "skip", "num_skips": "3" })))
        .await
        .unwrap();

    assert_eq!(text(&envelope), "Skipped 3 tracks.");
    assert_eq!(stub.calls(), vec![Call::SkipTracks(3)]);
}

#[tokio::test]
async fn test_skip_with_invalid_count_makes_no_call() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());

    for bad in [json!("x"), json!(-2), json!(1.5), json!(0)] {
        let envelope = dispatcher
            .dispatch("SpotifyPlayback", args(json!({ "action": "skip", "num_skips": bad })))
            .await
            .unwrap();
        assert!(envelope.is_error(), "num_skips={bad} should be rejected");
        assert!(text(&envelope).starts_with("Invalid arguments for SpotifyPlayback"));
    }
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_action_is_reported() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher
        .dispatch("SpotifyPlayback", args(json!({ "action": "rewind" })))
        .await
        .unwrap();

    assert!(envelope.is_error());
    assert_eq!(
        text(&envelope),
        "Unknown playback action: rewind. Supported actions are: get, start, pause, skip."
    );
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_missing_action_is_reported() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher.dispatch("SpotifyPlayback", None).await.unwrap();

    assert_eq!(text(&envelope), "action is required");
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_repeated_pause_is_acknowledged() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());

    for _ in 0..2 {
        let envelope = dispatcher
            .dispatch("SpotifyPlayback", args(json!({ "action": "pause" })))
            .await
            .unwrap();
        assert_eq!(text(&envelope), "Playback paused.");
    }
    assert_eq!(stub.calls(), vec![Call::PausePlayback, Call::PausePlayback]);
}

#[tokio::test]
async fn test_skip_accepts_whole_float_count() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher
        .dispatch("SpotifyPlayback", args(json!({ "action": "skip", "num_skips": 3.0 })))
        .await
        .unwrap();

    assert!(!envelope.is_error());
    assert_eq!(text(&envelope), "Skipped 3 tracks.");
    assert_eq!(stub.calls(), vec![Call::SkipTracks(3)]);
}

#[tokio::test]
async fn test_fields_of_other_actions_are_ignored() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());

    let envelope = dispatcher
        .dispatch("SpotifyPlayback", args(json!({ "action": "pause", "num_skips": "x" })))
        .await
        .unwrap();
    assert_eq!(text(&envelope), "Playback paused.");

    let envelope = dispatcher
        .dispatch("SpotifyPlayback", args(json!({ "action": "skip", "spotify_uri": 42 })))
        .await
        .unwrap();
    assert_eq!(text(&envelope), "Skipped to next track.");

    assert_eq!(stub.calls(), vec![Call::PausePlayback, Call::SkipTracks(1)]);
}

#[tokio::test]
async fn test_start_with_malformed_uri_is_a_request_error() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher
        .dispatch(
            "SpotifyPlayback",
            args(json!({ "action": "start", "spotify_uri": "spotify:song:123" })),
        )
        .await
        .unwrap();

    assert!(envelope.is_error());
    assert_eq!(
        text(&envelope),
        "Invalid spotify_uri: unsupported item type 'song' in 'spotify:song:123'"
    );
    assert!(stub.calls().is_empty());
}
