//! Error taxonomy for tool calls.
//!
//! - [`RequestError`]: caller arguments failed a precondition. Rendered as a
//!   text envelope; the call still counts as handled.
//! - [`SpotifyError`]: the service reported a failure. Rendered as a text
//!   envelope at the dispatch boundary.
//! - [`DispatchError`]: protocol violations and unexpected internal failures.
//!   These leave the core as `Err` and the transport turns them into
//!   protocol-level errors.

use rmcp::model::{ErrorCode, ErrorData};
use std::borrow::Cow;
use thiserror::Error;

use crate::error::SpotifyError;

/// Caller-supplied arguments that cannot be acted on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is required for {action} action")]
    MissingFieldFor {
        field: &'static str,
        action: &'static str,
    },

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error(
        "Unknown {label} action: {action}. Supported actions are: {}.",
        supported.join(", ")
    )]
    UnknownAction {
        label: &'static str,
        action: String,
        supported: &'static [&'static str],
    },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// An item reference that is neither a URI, a share link nor a bare ID.
    #[error("Invalid {field}: {message}")]
    InvalidReference {
        field: &'static str,
        message: String,
    },

    #[error("Invalid playlist_details: {0}")]
    InvalidPlaylistDetails(String),

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("No track found for: {0}")]
    NoTrackFound(String),

    /// Any failure inside the search-and-add flow, reduced to its message.
    #[error("Playlist operation failed: {0}")]
    PlaylistOperation(String),
}

/// Failure of a single action handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Upstream(#[from] SpotifyError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Failures that escape the core and must be reported by the transport.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Tool name lacks the mandatory prefix.
    #[error("Unknown tool: {0} (tool names must start with 'Spotify')")]
    Protocol(String),

    #[error("Unexpected error occurred: {0:#}")]
    Internal(anyhow::Error),
}

impl From<DispatchError> for ErrorData {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Protocol(name) => ErrorData {
                code: ErrorCode::INVALID_REQUEST,
                message: Cow::Owned(DispatchError::Protocol(name.clone()).to_string()),
                data: Some(serde_json::json!({
                    "tool": name,
                    "suggestion": "List the available tools and call one of the advertised names"
                })),
            },
            DispatchError::Internal(source) => ErrorData {
                code: ErrorCode::INTERNAL_ERROR,
                message: Cow::Owned(format!("Unexpected error occurred: {:#}", source)),
                data: None,
            },
        }
    }
}
