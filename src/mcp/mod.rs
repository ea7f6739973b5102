pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod server;
pub mod tools;
pub mod types;

pub use dispatch::Dispatcher;
pub use envelope::{ContentItem, Reply, ResponseFormatter, ResultEnvelope};
pub use registry::{catalog, ToolDefinition, ToolKind, TOOL_PREFIX};
pub use server::SpotifyServer;
pub use types::*;
