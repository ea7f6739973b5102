use rmcp::{
    model::*, service::RequestContext, ErrorData as McpError, RoleServer, ServerHandler,
    ServiceExt,
};
use std::sync::Arc;
use tracing::instrument;

use crate::client::SpotifyClient;
use crate::mcp::dispatch::Dispatcher;
use crate::mcp::registry::catalog;

/// MCP server exposing a Spotify account as tools.
///
/// Tool listing comes from the static catalog; every call goes through the
/// [`Dispatcher`].
#[derive(Clone)]
pub struct SpotifyServer {
    dispatcher: Arc<Dispatcher>,
}

impl SpotifyServer {
    pub fn new(client: Arc<dyn SpotifyClient + Send + Sync>) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(client)),
        }
    }

    /// Create server from shared AppContext.
    pub fn from_context(ctx: &crate::init::AppContext) -> Self {
        Self::new(ctx.client.clone())
    }
}

impl ServerHandler for SpotifyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "spotify-mcp".to_string(),
                title: Some("Spotify MCP".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"# Spotify MCP

Control the user's Spotify account.

## Tools
- SpotifyPlayback(action): get, start (optional spotify_uri), pause, skip (num_skips)
- SpotifySearch: search the catalog (qtype: track, album, artist, playlist, or comma-separated)
- SpotifyQueue(action): get the queue, add a track by ID
- SpotifyGetInfo: details for a URI; playlists and albums include tracks, artists include top tracks and albums
- SpotifyTopItems: the user's top artists or tracks (short_term, medium_term, long_term)
- SpotifyPlaylistCreator(action): create a playlist, or search_and_add a track to a playlist by ID, URI or name

## Key Patterns
- Search first, then pass the returned uri to SpotifyPlayback or SpotifyGetInfo
- SpotifyQueue add takes a track ID or track URI
- Playback commands need an active Spotify device
"#.to_string()),
        }
    }

    #[instrument(name = "mcp.list_tools", skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: catalog().iter().map(|def| def.to_tool()).collect(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(name = "mcp.call_tool", skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatcher
            .dispatch(&request.name, request.arguments)
            .await
            .map(|envelope| envelope.into_call_result())
            .map_err(McpError::from)
    }
}

/// Run MCP server on stdio transport.
pub async fn run_mcp_server(ctx: crate::init::AppContext) -> anyhow::Result<()> {
    let server = SpotifyServer::from_context(&ctx);

    tracing::info!("Starting Spotify MCP server v{}", env!("CARGO_PKG_VERSION"));

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;
    tracing::info!("MCP server listening on stdio ({} tools)", catalog().len());

    service.waiting().await?;

    tracing::info!("MCP server shutting down");
    Ok(())
}

