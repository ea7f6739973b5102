//! `SpotifyQueue`: add a track or read the queue.

use serde_json::{Map, Value};

use crate::client::uri::{to_uri, ItemKind};
use crate::mcp::dispatch::Dispatcher;
use crate::mcp::envelope::Reply;
use crate::mcp::error::{HandlerError, RequestError};
use crate::mcp::registry::ToolKind;
use crate::mcp::types::{
    check_reference, decode_action, decode_action_args, QueueAction, QueueArgs,
};

impl Dispatcher {
    pub(crate) async fn handle_queue(
        &self,
        args: &Map<String, Value>,
    ) -> Result<Reply, HandlerError> {
        match decode_action::<QueueAction>(args)? {
            QueueAction::Add => {
                let QueueArgs { track_id, .. } =
                    decode_action_args(&ToolKind::Queue.tool_name(), args, &["track_id"])?;
                let track_id = track_id
                    .filter(|id| !id.trim().is_empty())
                    .ok_or(RequestError::MissingFieldFor {
                        field: "track_id",
                        action: "add",
                    })?;
                check_reference("track_id", to_uri(ItemKind::Track, &track_id))?;
                tracing::info!("Adding {} to queue", track_id);
                self.client.add_to_queue(&track_id).await?;
                Ok(Reply::message("Track added to queue."))
            }
            QueueAction::Get => {
                let queue = self.client.get_queue().await?;
                Ok(Reply::Data(queue))
            }
        }
    }
}
