//! Named, schema-described tools and the registry that holds them.

use std::{collections::HashMap, fmt, sync::Arc};

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::domain::content::ContentBlock;
use crate::errors::ToolError;

pub type ToolResult = Result<Vec<ContentBlock>, ToolError>;

/// Body of a tool. Receives the call's `arguments` object and picks out
/// the fields it needs.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: Map<String, Value>) -> ToolResult;
}

/// Adapts a synchronous closure into a [`ToolHandler`].
pub struct FnTool<F>(F);

#[async_trait]
impl<F> ToolHandler for FnTool<F>
where
    F: Fn(Map<String, Value>) -> ToolResult + Send + Sync,
{
    async fn call(&self, arguments: Map<String, Value>) -> ToolResult {
        (self.0)(arguments)
    }
}

#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Map<String, Value>,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: empty_object_schema(),
            handler,
        }
    }

    pub fn from_fn<F>(name: impl Into<String>, description: impl Into<String>, func: F) -> Self
    where
        F: Fn(Map<String, Value>) -> ToolResult + Send + Sync + 'static,
    {
        Self::new(name, description, Arc::new(FnTool(func)))
    }

    /// Replaces the advertised schema. It is documentation for callers and
    /// is not enforced before invocation.
    pub fn with_input_schema(mut self, schema: Map<String, Value>) -> Self {
        self.input_schema = schema;
        self
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish_non_exhaustive()
    }
}

fn empty_object_schema() -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), json!({}));
    schema
}

/// Tools keyed by case-sensitive name, listed in registration order.
///
/// Filled once at startup and only read afterwards, so the server shares it
/// behind an `Arc` without locking.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tool. A second registration under the same name replaces
    /// the first in place and keeps its listing position.
    pub fn register(&mut self, tool: ToolDescriptor) {
        info!(tool = %tool.name, "tool registered");
        match self.index.get(&tool.name) {
            Some(&slot) => self.tools[slot] = tool,
            None => {
                self.index.insert(tool.name.clone(), self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&slot| &self.tools[slot])
    }

    pub fn list_all(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
