//! Tools shipped with the binary.

use serde_json::{json, Map, Value};

use crate::domain::{
    content::ContentBlock,
    registry::{ToolDescriptor, ToolResult},
};

pub fn builtin_tools() -> Vec<ToolDescriptor> {
    vec![echo_tool()]
}

pub fn echo_tool() -> ToolDescriptor {
    let schema = json!({
        "type": "object",
        "properties": {
            "text": {"type": "string", "description": "Text to send back unchanged."}
        },
        "required": ["text"]
    });
    let Value::Object(schema) = schema else {
        unreachable!("schema literal is an object");
    };

    ToolDescriptor::from_fn("echo", "Returns the given text unchanged.", echo)
        .with_input_schema(schema)
}

fn echo(arguments: Map<String, Value>) -> ToolResult {
    let text = arguments
        .get("text")
        .and_then(Value::as_str)
        .ok_or("argument 'text' must be a string")?;
    Ok(vec![ContentBlock::text(text)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_returns_text() {
        let mut arguments = Map::new();
        arguments.insert("text".to_string(), json!("hi"));

        let content = echo(arguments).expect("echo succeeds");
        assert_eq!(content, vec![ContentBlock::text("hi")]);
    }

    #[test]
    fn echo_rejects_missing_text() {
        let err = echo(Map::new()).expect_err("missing text");
        assert_eq!(err.to_string(), "argument 'text' must be a string");
    }

    #[test]
    fn echo_advertises_required_text() {
        let tools = builtin_tools();

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "echo");
        assert_eq!(tools[0].input_schema["required"], json!(["text"]));
    }
}
