//! Spotify account client.
//!
//! [`SpotifyClient`] is the seam between the tool layer and the remote
//! service. The tool layer only ever sees plain data (`serde_json::Value`)
//! or a [`SpotifyError`]; session lifetime and credentials are the
//! implementation's concern.

pub mod uri;
pub mod web;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SpotifyError;

pub use uri::{ItemKind, SpotifyUri};
pub use web::WebApiClient;

fn default_true() -> bool {
    true
}

/// Attributes of a playlist to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlaylistDetails {
    /// Playlist name
    pub name: String,
    /// Playlist description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the playlist is visible on the user's profile (default: true)
    #[serde(default = "default_true")]
    pub public: bool,
    /// Whether other users may edit the playlist (default: false)
    #[serde(default)]
    pub collaborative: bool,
}

/// Operations the tool layer needs from a Spotify account.
///
/// Catalog results come back condensed: search returns an object keyed by
/// plural category (`"tracks"`, `"albums"`, ...) holding arrays of item
/// summaries, and a track summary carries at least `name`, `uri` and
/// `artists` (a list of artist names).
#[async_trait]
pub trait SpotifyClient: Send + Sync {
    /// Currently playing item, or `None` when playback is idle.
    async fn get_currently_playing(&self) -> Result<Option<Value>, SpotifyError>;

    /// Start playback of `uri`, or resume the current context when `None`.
    async fn start_playback(&self, uri: Option<&str>) -> Result<(), SpotifyError>;

    async fn pause_playback(&self) -> Result<(), SpotifyError>;

    /// Skip forward `count` tracks.
    async fn skip_tracks(&self, count: u32) -> Result<(), SpotifyError>;

    /// Catalog search. `types` is a comma-joined category list passed through
    /// to the service untouched.
    async fn search(&self, query: &str, types: &str, limit: u32) -> Result<Value, SpotifyError>;

    async fn add_to_queue(&self, track_id: &str) -> Result<(), SpotifyError>;

    async fn get_queue(&self) -> Result<Value, SpotifyError>;

    /// Details for any item URI. Playlists and albums include their tracks,
    /// artists include top tracks and albums.
    async fn get_item_info(&self, item_uri: &str) -> Result<Value, SpotifyError>;

    async fn get_top_items(
        &self,
        item_type: &str,
        time_range: &str,
        limit: u32,
    ) -> Result<Value, SpotifyError>;

    /// Create a playlist for the current user and return it (including `id`).
    async fn create_playlist(&self, details: &PlaylistDetails) -> Result<Value, SpotifyError>;

    /// ID of the caller's playlist whose name equals `name` exactly.
    async fn resolve_playlist_by_name(&self, name: &str) -> Result<Option<String>, SpotifyError>;

    async fn add_track_to_playlist(
        &self,
        playlist_id: &str,
        track_uri: &str,
    ) -> Result<Value, SpotifyError>;
}
