pub mod client;
pub mod config;
pub mod error;
pub mod init;
pub mod mcp;

pub use error::SpotifyError;
