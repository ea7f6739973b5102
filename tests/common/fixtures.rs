//! Canned catalog data, one fixture per item type.

use serde_json::{json, Value};
use std::collections::HashMap;

pub const TRACK_URI: &str = "spotify:track:4uLU6hMCjMI75M1A2tKUQC";
pub const ALBUM_URI: &str = "spotify:album:4aawyAB9vmqN3uQ7FjRGTy";
pub const ARTIST_URI: &str = "spotify:artist:3CkvROUTQ6nRi9yQOcsB50";
pub const PLAYLIST_URI: &str = "spotify:playlist:37i9dQZF1DXcBWIGoYBM5M";
pub const EPISODE_URI: &str = "spotify:episode:512ojhOuo1ktJprKbVcKyQ";

/// 22 characters, so it is used as an ID without name resolution.
pub const ROAD_TRIP_ID: &str = "1BxfuPKGuaTgP7aM0Bbdwr";
pub const NEW_PLAYLIST_ID: &str = "7d2D2S200NyUE5KYs80PwO";

pub fn track() -> Value {
    json!({
        "name": "Mama",
        "id": "4uLU6hMCjMI75M1A2tKUQC",
        "uri": TRACK_URI,
        "artists": ["Genesis"],
        "album": "Genesis",
        "duration_ms": 407_000
    })
}

pub fn search_hit() -> Value {
    json!({ "tracks": [track()] })
}

pub fn item_info() -> HashMap<String, Value> {
    HashMap::from([
        (TRACK_URI.to_string(), track()),
        (
            ALBUM_URI.to_string(),
            json!({
                "name": "Genesis",
                "uri": ALBUM_URI,
                "artists": ["Genesis"],
                "tracks": [track()]
            }),
        ),
        (
            ARTIST_URI.to_string(),
            json!({
                "name": "Genesis",
                "uri": ARTIST_URI,
                "top_tracks": [track()],
                "albums": [{ "name": "Genesis", "uri": ALBUM_URI }]
            }),
        ),
        (
            PLAYLIST_URI.to_string(),
            json!({
                "name": "Today's Top Hits",
                "uri": PLAYLIST_URI,
                "owner": "spotify",
                "tracks": [track()]
            }),
        ),
        (
            EPISODE_URI.to_string(),
            json!({
                "name": "Episode 1",
                "uri": EPISODE_URI,
                "show": "Some Podcast",
                "duration_ms": 1_800_000
            }),
        ),
    ])
}
