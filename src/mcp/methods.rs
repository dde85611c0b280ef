//! Method handlers and the routing table
//!
//! Each supported JSON-RPC method is one [`MethodHandler`] keyed by name in a
//! [`MethodTable`]; names missing from the table answer `-32601`.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::domain::{invoke::invoke_tool, registry::ToolRegistry};
use crate::errors::AppError;
use crate::mcp::rpc::display_value;

#[async_trait]
pub trait MethodHandler: Send + Sync {
    async fn handle(&self, params: Map<String, Value>) -> Result<Value, AppError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResult<'a> {
    protocol_version: &'a str,
    server_info: ServerInfo<'a>,
    capabilities: ServerCapabilities,
}

#[derive(Debug, Serialize)]
struct ServerInfo<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct ServerCapabilities {}

#[derive(Debug, Serialize)]
struct ListToolsResult<'a> {
    tools: Vec<ToolInfo<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolInfo<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a Map<String, Value>,
}

fn to_result_value<T: Serialize>(value: T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|err| AppError::internal(err.to_string()))
}

/// Static capability and version announcement.
pub struct Initialize {
    config: Config,
}

#[async_trait]
impl MethodHandler for Initialize {
    async fn handle(&self, _params: Map<String, Value>) -> Result<Value, AppError> {
        to_result_value(InitializeResult {
            protocol_version: &self.config.protocol_version,
            server_info: ServerInfo {
                name: &self.config.server_name,
                version: &self.config.server_version,
            },
            capabilities: ServerCapabilities {},
        })
    }
}

pub struct ListTools {
    registry: Arc<ToolRegistry>,
}

#[async_trait]
impl MethodHandler for ListTools {
    async fn handle(&self, _params: Map<String, Value>) -> Result<Value, AppError> {
        let tools = self
            .registry
            .list_all()
            .iter()
            .map(|tool| ToolInfo {
                name: &tool.name,
                description: &tool.description,
                input_schema: &tool.input_schema,
            })
            .collect();
        to_result_value(ListToolsResult { tools })
    }
}

pub struct CallTool {
    registry: Arc<ToolRegistry>,
}

#[async_trait]
impl MethodHandler for CallTool {
    async fn handle(&self, mut params: Map<String, Value>) -> Result<Value, AppError> {
        let name = params.remove("name").unwrap_or(Value::Null);
        let tool = match name.as_str() {
            Some(name) => self.registry.lookup(name),
            None => None,
        }
        .ok_or_else(|| AppError::ToolNotFound(display_value(&name)))?;

        let arguments = params.remove("arguments").unwrap_or(Value::Null);
        let result = invoke_tool(tool, arguments).await?;
        to_result_value(result)
    }
}

pub struct MethodTable {
    handlers: HashMap<String, Box<dyn MethodHandler>>,
}

impl MethodTable {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The standard table: `initialize`, `tools/list` and `tools/call`.
    pub fn new(config: &Config, registry: Arc<ToolRegistry>) -> Self {
        let mut table = Self::empty();
        table.insert(
            "initialize",
            Initialize {
                config: config.clone(),
            },
        );
        table.insert(
            "tools/list",
            ListTools {
                registry: Arc::clone(&registry),
            },
        );
        table.insert("tools/call", CallTool { registry });
        table
    }

    pub fn insert(&mut self, method: impl Into<String>, handler: impl MethodHandler + 'static) {
        self.handlers.insert(method.into(), Box::new(handler));
    }

    pub fn get(&self, method: &str) -> Option<&dyn MethodHandler> {
        self.handlers.get(method).map(|handler| handler.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{content::ContentBlock, registry::ToolDescriptor};

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("params must be an object"),
        }
    }

    fn table() -> MethodTable {
        let mut registry = ToolRegistry::new();
        registry.register(ToolDescriptor::from_fn("echo", "says hi", |_| {
            Ok(vec![ContentBlock::text("hi")])
        }));
        MethodTable::new(&Config::default(), Arc::new(registry))
    }

    #[tokio::test]
    async fn initialize_announces_fixed_shape() {
        let handler = table();
        let result = handler
            .get("initialize")
            .expect("initialize registered")
            .handle(Map::new())
            .await
            .expect("initialize");

        assert_eq!(
            result,
            json!({
                "protocolVersion": "2025-06-18",
                "serverInfo": {"name": "custom_tools", "version": "0.1.0"},
                "capabilities": {}
            })
        );
    }

    #[tokio::test]
    async fn list_tools_exposes_public_descriptor() {
        let handler = table();
        let result = handler
            .get("tools/list")
            .expect("tools/list registered")
            .handle(Map::new())
            .await
            .expect("tools/list");

        assert_eq!(
            result,
            json!({"tools": [{
                "name": "echo",
                "description": "says hi",
                "inputSchema": {"type": "object", "properties": {}}
            }]})
        );
    }

    #[tokio::test]
    async fn call_without_name_is_tool_not_found() {
        let handler = table();
        let err = handler
            .get("tools/call")
            .expect("tools/call registered")
            .handle(params(json!({"arguments": {}})))
            .await
            .expect_err("no name");

        assert_eq!(err.code(), -32601);
        assert_eq!(err.to_string(), "Tool 'null' not found.");
    }

    #[tokio::test]
    async fn call_routes_to_registered_tool() {
        let handler = table();
        let result = handler
            .get("tools/call")
            .expect("tools/call registered")
            .handle(params(json!({"name": "echo"})))
            .await
            .expect("tools/call");

        assert_eq!(result, json!({"content": [{"type": "text", "text": "hi"}]}));
    }

    #[test]
    fn unknown_method_is_absent() {
        assert!(table().get("resources/list").is_none());
        assert!(table().get("Initialize").is_none());
    }
}
