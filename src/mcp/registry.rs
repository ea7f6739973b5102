//! Tool catalog.
//!
//! Every tool is named `Spotify<Key>`. Parameter schemas are generated from
//! the argument types in [`crate::mcp::types`], the same types used to
//! validate incoming calls.

use std::sync::{Arc, OnceLock};

use rmcp::model::Tool;
use schemars::JsonSchema;
use serde_json::{Map, Value};

use crate::mcp::types::{
    GetInfoArgs, PlaybackArgs, PlaylistCreatorArgs, QueueArgs, SearchArgs, TopItemsArgs,
};

/// Prefix shared by every advertised tool name.
pub const TOOL_PREFIX: &str = "Spotify";

/// Routing key of a tool (its name without [`TOOL_PREFIX`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Playback,
    Search,
    Queue,
    GetInfo,
    TopItems,
    PlaylistCreator,
}

impl ToolKind {
    /// Advertisement order.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Playback,
        ToolKind::Search,
        ToolKind::Queue,
        ToolKind::GetInfo,
        ToolKind::TopItems,
        ToolKind::PlaylistCreator,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ToolKind::Playback => "Playback",
            ToolKind::Search => "Search",
            ToolKind::Queue => "Queue",
            ToolKind::GetInfo => "GetInfo",
            ToolKind::TopItems => "TopItems",
            ToolKind::PlaylistCreator => "PlaylistCreator",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn tool_name(&self) -> String {
        format!("{}{}", TOOL_PREFIX, self.key())
    }

    fn description(&self) -> &'static str {
        match self {
            ToolKind::Playback => {
                "Manages the current playback with the following actions:\n\
                 - get: Get information about user's current track.\n\
                 - start: Starts playing new item or resumes current playback if called with no uri.\n\
                 - pause: Pauses current playback.\n\
                 - skip: Skips current track (num_skips times)."
            }
            ToolKind::Search => "Search for tracks, albums, artists, or playlists on Spotify.",
            ToolKind::Queue => "Manage the playback queue - get the queue or add tracks.",
            ToolKind::GetInfo => {
                "Get detailed information about a Spotify item (track, album, artist, or playlist). \
                 Playlists and albums include their tracks; artists include top tracks and albums."
            }
            ToolKind::TopItems => {
                "Get the user's top artists or tracks based on calculated affinity."
            }
            ToolKind::PlaylistCreator => {
                "Create Spotify playlists and add tracks to them:\n\
                 - create: Create a playlist from playlist_details.\n\
                 - search_and_add: Search for a track and append the best match to a playlist \
                 (given by ID, URI, or exact name)."
            }
        }
    }

    fn parameter_schema(&self) -> Map<String, Value> {
        match self {
            ToolKind::Playback => schema_object::<PlaybackArgs>(),
            ToolKind::Search => schema_object::<SearchArgs>(),
            ToolKind::Queue => schema_object::<QueueArgs>(),
            ToolKind::GetInfo => schema_object::<GetInfoArgs>(),
            ToolKind::TopItems => schema_object::<TopItemsArgs>(),
            ToolKind::PlaylistCreator => schema_object::<PlaylistCreatorArgs>(),
        }
    }
}

fn schema_object<T: JsonSchema>() -> Map<String, Value> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(mut object)) => {
            object.remove("$schema");
            object
        }
        _ => Map::new(),
    }
}

/// A callable tool as advertised to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub kind: ToolKind,
    pub name: String,
    pub description: &'static str,
    pub parameter_schema: Map<String, Value>,
}

impl ToolDefinition {
    fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            name: kind.tool_name(),
            description: kind.description(),
            parameter_schema: kind.parameter_schema(),
        }
    }

    /// Names of the parameters the schema marks as required.
    pub fn required(&self) -> Vec<&str> {
        self.parameter_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn to_tool(&self) -> Tool {
        Tool::new(
            self.name.clone(),
            self.description,
            Arc::new(self.parameter_schema.clone()),
        )
    }
}

/// The tool catalog, built on first use.
pub fn catalog() -> &'static [ToolDefinition] {
    static CATALOG: OnceLock<Vec<ToolDefinition>> = OnceLock::new();
    CATALOG.get_or_init(|| ToolKind::ALL.into_iter().map(ToolDefinition::new).collect())
}
