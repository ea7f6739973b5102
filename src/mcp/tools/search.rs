//! `SpotifySearch`, `SpotifyGetInfo` and `SpotifyTopItems`: single-call
//! catalog reads that return the client's data unchanged.

use serde_json::{Map, Value};

use crate::client::SpotifyUri;
use crate::mcp::dispatch::Dispatcher;
use crate::mcp::envelope::Reply;
use crate::mcp::error::HandlerError;
use crate::mcp::registry::ToolKind;
use crate::mcp::types::{check_reference, decode_args, GetInfoArgs, SearchArgs, TopItemsArgs};

impl Dispatcher {
    /// `qtype` is passed through untouched; the service validates it.
    pub(crate) async fn handle_search(
        &self,
        args: &Map<String, Value>,
    ) -> Result<Reply, HandlerError> {
        let SearchArgs {
            query,
            qtype,
            limit,
        } = decode_args(&ToolKind::Search.tool_name(), args)?;
        tracing::info!("Searching {} for {:?} (limit {})", qtype, query, limit);
        let results = self.client.search(&query, &qtype, limit).await?;
        Ok(Reply::Data(results))
    }

    /// The item type is resolved by the client; this handler never branches on it.
    pub(crate) async fn handle_get_info(
        &self,
        args: &Map<String, Value>,
    ) -> Result<Reply, HandlerError> {
        let GetInfoArgs { item_uri } = decode_args(&ToolKind::GetInfo.tool_name(), args)?;
        check_reference("item_uri", item_uri.parse::<SpotifyUri>())?;
        tracing::info!("Getting info for {}", item_uri);
        let info = self.client.get_item_info(&item_uri).await?;
        Ok(Reply::Data(info))
    }

    /// Limits above the service maximum are left for the service to reject.
    pub(crate) async fn handle_top_items(
        &self,
        args: &Map<String, Value>,
    ) -> Result<Reply, HandlerError> {
        let TopItemsArgs {
            item_type,
            time_range,
            limit,
        } = decode_args(&ToolKind::TopItems.tool_name(), args)?;
        tracing::info!(
            "Getting top {} over {} (limit {})",
            item_type,
            time_range,
            limit
        );
        let items = self
            .client
            .get_top_items(&item_type, &time_range, limit)
            .await?;
        Ok(Reply::Data(items))
    }
}
