//! Tool-call routing.
//!
//! [`Dispatcher::dispatch`] owns the error policy for a call:
//! request and upstream failures become error envelopes, a missing
//! `Spotify` prefix and internal failures propagate as [`DispatchError`].

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::client::SpotifyClient;
use crate::mcp::envelope::{ResponseFormatter, ResultEnvelope};
use crate::mcp::error::{DispatchError, HandlerError, RequestError};
use crate::mcp::registry::{ToolKind, TOOL_PREFIX};

/// Routes tool calls to their action handlers.
///
/// Holds no per-call state; the client is the only shared resource.
#[derive(Clone)]
pub struct Dispatcher {
    pub(crate) client: Arc<dyn SpotifyClient + Send + Sync>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn SpotifyClient + Send + Sync>) -> Self {
        Self { client }
    }

    /// Handle one tool call. A missing argument bag is treated as empty.
    pub async fn dispatch(
        &self,
        tool_name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<ResultEnvelope, DispatchError> {
        let args = arguments.unwrap_or_default();
        tracing::info!(
            "Tool call {} with arguments {}",
            tool_name,
            serde_json::to_string(&args).unwrap_or_default()
        );

        let Some(key) = tool_name.strip_prefix(TOOL_PREFIX) else {
            tracing::error!("Rejected tool {}: name lacks the '{}' prefix", tool_name, TOOL_PREFIX);
            return Err(DispatchError::Protocol(tool_name.to_string()));
        };

        let Some(kind) = ToolKind::from_key(key) else {
            let err = RequestError::UnknownTool(tool_name.to_string());
            tracing::error!("{}", err);
            return Ok(ResultEnvelope::error(err.to_string()));
        };

        let outcome = match kind {
            ToolKind::Playback => self.handle_playback(&args).await,
            ToolKind::Search => self.handle_search(&args).await,
            ToolKind::Queue => self.handle_queue(&args).await,
            ToolKind::GetInfo => self.handle_get_info(&args).await,
            ToolKind::TopItems => self.handle_top_items(&args).await,
            ToolKind::PlaylistCreator => self.handle_playlist_creator(&args).await,
        };

        match outcome {
            Ok(reply) => {
                tracing::debug!("{} completed", tool_name);
                Ok(ResponseFormatter::render(reply))
            }
            Err(HandlerError::Request(e)) => {
                tracing::warn!("{} rejected: {}", tool_name, e);
                Ok(ResultEnvelope::error(e.to_string()))
            }
            Err(HandlerError::Upstream(e)) => {
                tracing::error!("{} failed upstream: {}", tool_name, e);
                Ok(ResultEnvelope::error(format!(
                    "An error occurred with the Spotify Client: {}",
                    e
                )))
            }
            Err(HandlerError::Internal(e)) => {
                tracing::error!("{} failed unexpectedly: {:?}", tool_name, e);
                Err(DispatchError::Internal(e))
            }
        }
    }
}
