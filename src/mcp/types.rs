//! Tool argument types.
//!
//! Each struct is both the advertised parameter schema (via `schemars`) and
//! the validator for incoming arguments (via `serde`). Defaults are declared
//! once here and show up as `"default"` in the schema.

use schemars::JsonSchema;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::PlaylistDetails;
use crate::error::SpotifyError;
use crate::mcp::error::RequestError;

fn default_num_skips() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

fn default_qtype() -> String {
    "track".to_string()
}

fn default_item_type() -> String {
    "artists".to_string()
}

fn default_time_range() -> String {
    "long_term".to_string()
}

/// Accepts anything numeric-looking: `3`, `3.0`, `"3"`, `" 3 "`, `"3.0"`.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole_number)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
        _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            de::Error::custom(format!("expected a non-negative integer, got {}", value))
        })
}

fn whole_number(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64).then_some(f as u64)
}

/// A closed set of values for a tool's `action` field.
pub trait ActionSet: DeserializeOwned + Copy {
    /// Short label used in "unknown action" messages.
    const LABEL: &'static str;
    const SUPPORTED: &'static [&'static str];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackAction {
    Get,
    Start,
    Pause,
    Skip,
}

impl ActionSet for PlaybackAction {
    const LABEL: &'static str = "playback";
    const SUPPORTED: &'static [&'static str] = &["get", "start", "pause", "skip"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueueAction {
    Add,
    Get,
}

impl ActionSet for QueueAction {
    const LABEL: &'static str = "queue";
    const SUPPORTED: &'static [&'static str] = &["add", "get"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistAction {
    Create,
    SearchAndAdd,
}

impl ActionSet for PlaylistAction {
    const LABEL: &'static str = "playlist";
    const SUPPORTED: &'static [&'static str] = &["create", "search_and_add"];
}

/// Manages the current playback: get the playing track, start or resume
/// playback, pause, or skip ahead.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlaybackArgs {
    /// Action to perform: 'get', 'start', 'pause' or 'skip'.
    pub action: PlaybackAction,
    /// Spotify URI of item to play for 'start' action. If omitted, resumes current playback.
    #[serde(default)]
    pub spotify_uri: Option<String>,
    /// Number of tracks to skip for 'skip' action.
    #[serde(default = "default_num_skips", deserialize_with = "lenient_u32")]
    #[schemars(with = "u32")]
    pub num_skips: u32,
}

/// Search for tracks, albums, artists, or playlists on Spotify.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// Query term
    pub query: String,
    /// Type of items to search for (track, album, artist, playlist, or comma-separated combination)
    #[serde(default = "default_qtype")]
    pub qtype: String,
    /// Maximum number of items to return
    #[serde(default = "default_limit", deserialize_with = "lenient_u32")]
    #[schemars(with = "u32")]
    pub limit: u32,
}

/// Manage the playback queue: get the queue or add tracks.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueueArgs {
    /// Action to perform: 'add' or 'get'.
    pub action: QueueAction,
    /// Track ID to add to queue (required for add action)
    #[serde(default)]
    pub track_id: Option<String>,
}

/// Get information about an item (track, album, artist, or playlist).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetInfoArgs {
    /// URI of the item to get information about. If 'playlist' or 'album',
    /// returns its tracks. If 'artist', returns albums and top tracks.
    pub item_uri: String,
}

/// Get the user's top artists or tracks based on calculated affinity.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TopItemsArgs {
    /// Type of items to retrieve ('artists' or 'tracks')
    #[serde(default = "default_item_type")]
    pub item_type: String,
    /// Time period over which to retrieve top items: 'long_term' (~ 1 year),
    /// 'medium_term' (~ 6 months), or 'short_term' (~ 4 weeks)
    #[serde(default = "default_time_range")]
    pub time_range: String,
    /// Number of items to retrieve (max 50)
    #[serde(default = "default_limit", deserialize_with = "lenient_u32")]
    #[schemars(with = "u32")]
    pub limit: u32,
}

/// Nested object that callers sometimes send as a JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaybeEncoded {
    Structured(Map<String, Value>),
    Encoded(String),
}

impl MaybeEncoded {
    /// Decode into an object, parsing the text form if needed.
    pub fn into_object(self) -> Result<Map<String, Value>, String> {
        match self {
            MaybeEncoded::Structured(object) => Ok(object),
            MaybeEncoded::Encoded(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(object)) => Ok(object),
                Ok(other) => Err(format!("expected a JSON object, got {}", other)),
                Err(e) => Err(e.to_string()),
            },
        }
    }
}

/// Create playlists and add tracks to them.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlaylistCreatorArgs {
    /// Action to perform: 'create' or 'search_and_add'.
    pub action: PlaylistAction,
    /// Playlist attributes for 'create': name (required), description,
    /// public (default true), collaborative (default false). May be sent as
    /// a JSON object or as a JSON-encoded string.
    #[serde(default)]
    #[schemars(with = "Option<PlaylistDetails>")]
    pub playlist_details: Option<MaybeEncoded>,
    /// Playlist ID, URI, or exact playlist name (required for 'search_and_add')
    #[serde(default)]
    pub playlist_id: Option<String>,
    /// Search query for the track to add (required for 'search_and_add')
    #[serde(default)]
    pub search_query: Option<String>,
}

/// Decode and validate a `playlist_details` value.
pub fn decode_playlist_details(raw: MaybeEncoded) -> Result<PlaylistDetails, RequestError> {
    let object = raw
        .into_object()
        .map_err(RequestError::InvalidPlaylistDetails)?;
    let has_name = object
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name {
        return Err(RequestError::MissingField("playlist_details.name"));
    }
    serde_json::from_value(Value::Object(object))
        .map_err(|e| RequestError::InvalidPlaylistDetails(e.to_string()))
}

/// Turn a rejected item reference into a request error for `field`.
pub fn check_reference<T>(
    field: &'static str,
    parsed: Result<T, SpotifyError>,
) -> Result<T, RequestError> {
    parsed.map_err(|e| RequestError::InvalidReference {
        field,
        message: match e {
            SpotifyError::InvalidId(message) => message,
            other => other.to_string(),
        },
    })
}

/// Read the `action` field against a closed action set.
pub fn decode_action<A: ActionSet>(args: &Map<String, Value>) -> Result<A, RequestError> {
    let raw = match args.get("action") {
        None | Some(Value::Null) => return Err(RequestError::MissingField("action")),
        Some(raw) => raw,
    };
    serde_json::from_value::<A>(raw.clone()).map_err(|_| RequestError::UnknownAction {
        label: A::LABEL,
        action: raw.as_str().map_or_else(|| raw.to_string(), str::to_string),
        supported: A::SUPPORTED,
    })
}

/// Deserialize a tool's argument bag. Unknown keys are ignored.
pub fn decode_args<T: DeserializeOwned>(
    tool: &str,
    args: &Map<String, Value>,
) -> Result<T, RequestError> {
    serde_json::from_value(Value::Object(args.clone())).map_err(|e| {
        RequestError::InvalidArguments {
            tool: tool.to_string(),
            message: e.to_string(),
        }
    })
}

/// Like [`decode_args`], but only `action` and the listed `fields` are read.
///
/// Parameters that belong to other actions are ignored, however malformed.
pub fn decode_action_args<T: DeserializeOwned>(
    tool: &str,
    args: &Map<String, Value>,
    fields: &[&str],
) -> Result<T, RequestError> {
    let relevant: Map<String, Value> = args
        .iter()
        .filter(|(key, _)| key.as_str() == "action" || fields.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    decode_args(tool, &relevant)
}
