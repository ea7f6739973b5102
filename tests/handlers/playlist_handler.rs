//! Integration tests for SpotifyPlaylistCreator.

use crate::common::{args, dispatcher_with, fixtures, text, Call, StubClient};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use spotify_mcp::client::PlaylistDetails;
use spotify_mcp::SpotifyError;

fn library_stub() -> StubClient {
    StubClient {
        playlists: vec![
            ("Road Trip".to_string(), fixtures::ROAD_TRIP_ID.to_string()),
            ("Focus".to_string(), "5xddIVAtLrZKtt4YGLM1SQ".to_string()),
        ],
        search_results: fixtures::search_hit(),
        ..StubClient::new()
    }
}

// ============================================================================
// CREATE
// ============================================================================

#[tokio::test]
async fn test_create_defaults_to_public_non_collaborative() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({ "action": "create", "playlist_details": { "name": "Road Trip" } })),
        )
        .await
        .unwrap();

    assert!(!envelope.is_error());
    assert_eq!(
        text(&envelope),
        format!("Playlist created successfully! ID: {}", fixtures::NEW_PLAYLIST_ID)
    );
    assert_eq!(
        stub.calls(),
        vec![Call::CreatePlaylist(PlaylistDetails {
            name: "Road Trip".into(),
            description: None,
            public: true,
            collaborative: false,
        })]
    );
}

#[tokio::test]
async fn test_create_accepts_encoded_details() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());
    dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({
                "action": "create",
                "playlist_details": r#"{"name": "Late Night", "description": "quiet", "public": false, "collaborative": true}"#
            })),
        )
        .await
        .unwrap();

    assert_eq!(
        stub.calls(),
        vec![Call::CreatePlaylist(PlaylistDetails {
            name: "Late Night".into(),
            description: Some("quiet".into()),
            public: false,
            collaborative: true,
        })]
    );
}

#[tokio::test]
async fn test_create_with_unparseable_details() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({ "action": "create", "playlist_details": "{\"name\": " })),
        )
        .await
        .unwrap();

    assert!(envelope.is_error());
    assert!(text(&envelope).starts_with("Invalid playlist_details: "));
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_create_requires_name() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());

    for details in [json!({ "description": "nameless" }), json!({ "name": "  " })] {
        let envelope = dispatcher
            .dispatch(
                "SpotifyPlaylistCreator",
                args(json!({ "action": "create", "playlist_details": details })),
            )
            .await
            .unwrap();
        assert_eq!(text(&envelope), "playlist_details.name is required");
    }

    let envelope = dispatcher
        .dispatch("SpotifyPlaylistCreator", args(json!({ "action": "create" })))
        .await
        .unwrap();
    assert_eq!(
        text(&envelope),
        "playlist_details is required for create action"
    );
    assert!(stub.calls().is_empty());
}

// ============================================================================
// SEARCH AND ADD
// ============================================================================

#[tokio::test]
async fn test_search_and_add_by_id() {
    let (dispatcher, stub) = dispatcher_with(library_stub());
    let envelope = dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({
                "action": "search_and_add",
                "playlist_id": fixtures::ROAD_TRIP_ID,
                "search_query": "genesis mama"
            })),
        )
        .await
        .unwrap();

    assert!(!envelope.is_error());
    let rendered: Value = serde_json::from_str(text(&envelope)).unwrap();
    assert_eq!(
        rendered,
        json!({
            "message": "Track added successfully!",
            "track": { "name": "Mama", "artist": "Genesis", "uri": fixtures::TRACK_URI }
        })
    );
    assert_eq!(
        stub.calls(),
        vec![
            Call::Search {
                query: "genesis mama".into(),
                types: "track".into(),
                limit: 1,
            },
            Call::AddTrackToPlaylist {
                playlist_id: fixtures::ROAD_TRIP_ID.into(),
                track_uri: fixtures::TRACK_URI.into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_search_and_add_with_playlist_uri_skips_resolution() {
    let (dispatcher, stub) = dispatcher_with(library_stub());
    dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({
                "action": "search_and_add",
                "playlist_id": fixtures::PLAYLIST_URI,
                "search_query": "mama"
            })),
        )
        .await
        .unwrap();

    assert_eq!(stub.operations(), vec!["search", "add_track_to_playlist"]);
}

#[tokio::test]
async fn test_search_and_add_resolves_playlist_by_name() {
    let (dispatcher, stub) = dispatcher_with(library_stub());
    let envelope = dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({
                "action": "search_and_add",
                "playlist_id": "Road Trip",
                "search_query": "mama"
            })),
        )
        .await
        .unwrap();

    assert!(!envelope.is_error());
    let calls = stub.calls();
    assert_eq!(calls[0], Call::ResolvePlaylistByName("Road Trip".into()));
    assert_eq!(
        calls.last(),
        Some(&Call::AddTrackToPlaylist {
            playlist_id: fixtures::ROAD_TRIP_ID.into(),
            track_uri: fixtures::TRACK_URI.into(),
        })
    );
}

#[tokio::test]
async fn test_search_and_add_unknown_playlist_never_searches() {
    let (dispatcher, stub) = dispatcher_with(library_stub());
    let envelope = dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({
                "action": "search_and_add",
                "playlist_id": "Gym Mix",
                "search_query": "mama"
            })),
        )
        .await
        .unwrap();

    assert!(envelope.is_error());
    assert_eq!(
        text(&envelope),
        "Playlist operation failed: Playlist not found: Gym Mix"
    );
    assert_eq!(stub.operations(), vec!["resolve_playlist_by_name"]);
}

#[tokio::test]
async fn test_search_and_add_without_hits_never_adds() {
    let stub = StubClient {
        search_results: json!({ "tracks": [] }),
        ..library_stub()
    };
    let (dispatcher, stub) = dispatcher_with(stub);
    let envelope = dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({
                "action": "search_and_add",
                "playlist_id": fixtures::ROAD_TRIP_ID,
                "search_query": "zzzz no such song"
            })),
        )
        .await
        .unwrap();

    assert!(envelope.is_error());
    assert!(text(&envelope).contains("zzzz no such song"));
    assert_eq!(stub.operations(), vec!["search"]);
}

#[tokio::test]
async fn test_search_and_add_contains_upstream_failures() {
    let stub = library_stub().failing("add_track_to_playlist", || SpotifyError::Api {
        status: 403,
        message: "You cannot add tracks to a playlist you don't own.".into(),
    });
    let (dispatcher, _stub) = dispatcher_with(stub);

    let envelope = dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({
                "action": "search_and_add",
                "playlist_id": fixtures::ROAD_TRIP_ID,
                "search_query": "mama"
            })),
        )
        .await
        .unwrap();

    assert!(envelope.is_error());
    assert_eq!(
        text(&envelope),
        "Playlist operation failed: HTTP 403: You cannot add tracks to a playlist you don't own."
    );
}

#[tokio::test]
async fn test_search_and_add_requires_fields() {
    let (dispatcher, stub) = dispatcher_with(library_stub());

    let envelope = dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({ "action": "search_and_add", "search_query": "mama" })),
        )
        .await
        .unwrap();
    assert_eq!(
        text(&envelope),
        "playlist_id is required for search_and_add action"
    );

    let envelope = dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({ "action": "search_and_add", "playlist_id": "Road Trip" })),
        )
        .await
        .unwrap();
    assert_eq!(
        text(&envelope),
        "search_query is required for search_and_add action"
    );
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_playlist_action() {
    let (dispatcher, _stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher
        .dispatch("SpotifyPlaylistCreator", args(json!({ "action": "delete" })))
        .await
        .unwrap();
    assert_eq!(
        text(&envelope),
        "Unknown playlist action: delete. Supported actions are: create, search_and_add."
    );
}

#[tokio::test]
async fn test_create_ignores_search_and_add_fields() {
    let (dispatcher, stub) = dispatcher_with(StubClient::new());
    let envelope = dispatcher
        .dispatch(
            "SpotifyPlaylistCreator",
            args(json!({
                "action": "create",
                "playlist_details": { "name": "Road Trip" },
                "playlist_id": 12,
                "search_query": ["not", "a", "string"]
            })),
        )
        .await
        .unwrap();

    assert!(!envelope.is_error(), "{}", text(&envelope));
    assert_eq!(stub.operations(), vec!["create_playlist"]);
}
