//! `SpotifyPlaylistCreator`: create playlists and append searched tracks.
//!
//! `search_and_add` is the only handler that contains its own failures:
//! anything that goes wrong after its arguments validate is logged in
//! full and returned as a request error carrying just the message.

use anyhow::anyhow;
use serde_json::{json, Map, Value};

use crate::client::uri::looks_like_playlist_id;
use crate::mcp::dispatch::Dispatcher;
use crate::mcp::envelope::Reply;
use crate::mcp::error::{HandlerError, RequestError};
use crate::mcp::registry::ToolKind;
use crate::mcp::types::{
    decode_action, decode_action_args, decode_playlist_details, PlaylistAction, PlaylistCreatorArgs,
};

/// Best search hit for a `search_and_add` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMatch {
    pub name: String,
    pub uri: String,
    pub artists: Vec<String>,
}

impl TrackMatch {
    /// First track of a condensed search result, if any.
    pub fn first_in(results: &Value) -> Option<Self> {
        let track = results["tracks"].as_array()?.first()?;
        Some(Self {
            name: track["name"].as_str().unwrap_or_default().to_string(),
            uri: track["uri"].as_str()?.to_string(),
            artists: track["artists"]
                .as_array()
                .map(|artists| {
                    artists
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(String::as_str).unwrap_or("Unknown")
    }
}

impl Dispatcher {
    pub(crate) async fn handle_playlist_creator(
        &self,
        args: &Map<String, Value>,
    ) -> Result<Reply, HandlerError> {
        let tool = ToolKind::PlaylistCreator.tool_name();

        match decode_action::<PlaylistAction>(args)? {
            PlaylistAction::Create => {
                let PlaylistCreatorArgs {
                    playlist_details, ..
                } = decode_action_args(&tool, args, &["playlist_details"])?;
                let raw = playlist_details.ok_or(RequestError::MissingFieldFor {
                    field: "playlist_details",
                    action: "create",
                })?;
                let details = decode_playlist_details(raw)?;
                tracing::info!("Creating playlist {:?}", details.name);
                let created = self.client.create_playlist(&details).await?;
                let id = created["id"]
                    .as_str()
                    .ok_or_else(|| anyhow!("created playlist has no id: {}", created))?;
                Ok(Reply::Message(format!(
                    "Playlist created successfully! ID: {}",
                    id
                )))
            }
            PlaylistAction::SearchAndAdd => {
                let PlaylistCreatorArgs {
                    playlist_id,
                    search_query,
                    ..
                } = decode_action_args(&tool, args, &["playlist_id", "search_query"])?;
                let playlist = non_blank(playlist_id).ok_or(RequestError::MissingFieldFor {
                    field: "playlist_id",
                    action: "search_and_add",
                })?;
                let query = non_blank(search_query).ok_or(RequestError::MissingFieldFor {
                    field: "search_query",
                    action: "search_and_add",
                })?;

                self.search_and_add(&playlist, &query).await.map_err(|e| {
                    tracing::error!("search_and_add failed: {:?}", e);
                    HandlerError::from(RequestError::PlaylistOperation(e.to_string()))
                })
            }
        }
    }

    async fn search_and_add(&self, playlist: &str, query: &str) -> Result<Reply, HandlerError> {
        let playlist_id = if looks_like_playlist_id(playlist) {
            playlist.to_string()
        } else {
            tracing::info!("Resolving playlist by name {:?}", playlist);
            let id = self
                .client
                .resolve_playlist_by_name(playlist)
                .await?
                .ok_or_else(|| RequestError::PlaylistNotFound(playlist.to_string()))?;
            tracing::info!("Playlist {:?} resolved to {}", playlist, id);
            id
        };

        tracing::info!("Searching track for {:?}", query);
        let results = self.client.search(query, "track", 1).await?;
        tracing::debug!("Search results: {}", results);
        let track = TrackMatch::first_in(&results)
            .ok_or_else(|| RequestError::NoTrackFound(query.to_string()))?;
        tracing::info!("Matched {} ({})", track.name, track.uri);

        let added = self
            .client
            .add_track_to_playlist(&playlist_id, &track.uri)
            .await?;
        tracing::info!("Added to playlist {}: {}", playlist_id, added);

        Ok(Reply::Data(json!({
            "message": "Track added successfully!",
            "track": {
                "name": track.name,
                "artist": track.primary_artist(),
                "uri": track.uri,
            }
        })))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
