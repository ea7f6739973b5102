//! `SpotifyPlayback`: get, start, pause and skip.

use serde_json::{Map, Value};

use crate::client::SpotifyUri;
use crate::mcp::dispatch::Dispatcher;
use crate::mcp::envelope::Reply;
use crate::mcp::error::{HandlerError, RequestError};
use crate::mcp::registry::ToolKind;
use crate::mcp::types::{
    check_reference, decode_action, decode_action_args, PlaybackAction, PlaybackArgs,
};

/// A validated playback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackCommand {
    Get,
    /// `None` resumes the current context.
    Start { uri: Option<String> },
    Pause,
    Skip { count: u32 },
}

impl PlaybackCommand {
    pub fn from_args(args: &Map<String, Value>) -> Result<Self, RequestError> {
        let action = decode_action::<PlaybackAction>(args)?;
        let tool = ToolKind::Playback.tool_name();

        Ok(match action {
            PlaybackAction::Get => PlaybackCommand::Get,
            PlaybackAction::Start => {
                let PlaybackArgs { spotify_uri, .. } =
                    decode_action_args(&tool, args, &["spotify_uri"])?;
                let uri = spotify_uri.filter(|uri| !uri.trim().is_empty());
                if let Some(uri) = &uri {
                    check_reference("spotify_uri", uri.parse::<SpotifyUri>())?;
                }
                PlaybackCommand::Start { uri }
            }
            PlaybackAction::Pause => PlaybackCommand::Pause,
            PlaybackAction::Skip => {
                let PlaybackArgs { num_skips, .. } =
                    decode_action_args(&tool, args, &["num_skips"])?;
                if num_skips == 0 {
                    return Err(RequestError::InvalidArguments {
                        tool,
                        message: "num_skips must be at least 1".to_string(),
                    });
                }
                PlaybackCommand::Skip { count: num_skips }
            }
        })
    }
}

impl Dispatcher {
    pub(crate) async fn handle_playback(
        &self,
        args: &Map<String, Value>,
    ) -> Result<Reply, HandlerError> {
        match PlaybackCommand::from_args(args)? {
            PlaybackCommand::Get => {
                tracing::info!("Fetching current track");
                match self.client.get_currently_playing().await? {
                    Some(track) => Ok(Reply::Data(track)),
                    None => {
                        tracing::info!("No track currently playing");
                        Ok(Reply::message("No track playing."))
                    }
                }
            }
            PlaybackCommand::Start { uri } => {
                let target = uri.as_deref().unwrap_or("current context");
                tracing::info!("Starting playback of {}", target);
                self.client.start_playback(uri.as_deref()).await?;
                Ok(Reply::message("Playback starting."))
            }
            PlaybackCommand::Pause => {
                self.client.pause_playback().await?;
                Ok(Reply::message("Playback paused."))
            }
            PlaybackCommand::Skip { count } => {
                tracing::info!("Skipping {} track(s)", count);
                self.client.skip_tracks(count).await?;
                if count == 1 {
                    Ok(Reply::message("Skipped to next track."))
                } else {
                    Ok(Reply::Message(format!("Skipped {} tracks.", count)))
                }
            }
        }
    }
}
