use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod mcp;

use config::Config;
use domain::registry::{ToolDescriptor, ToolRegistry};
use mcp::server::Server;

pub use domain::content::ContentBlock;
pub use errors::{AppError, ToolError, TransportError};

/// Registers `tools` in order and wraps the registry in a server. The
/// registry is frozen from here on.
pub fn build_server<I>(config: &Config, tools: I) -> Server
where
    I: IntoIterator<Item = ToolDescriptor>,
{
    let mut registry = ToolRegistry::new();
    for tool in tools {
        registry.register(tool);
    }
    Server::new(config, Arc::new(registry))
}
