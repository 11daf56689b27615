use serde::{Deserialize, Serialize};

/// Result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

/// Description of a tool for a function-calling model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_result_round_trips() {
        let raw = json!({
            "success": true,
            "output": "ok",
            "error": null
        });
        let parsed: ToolResult = serde_json::from_value(raw).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.output, "ok");
        assert!(parsed.error.is_none());
    }

    #[test]
    fn tool_spec_serializes_parameters_verbatim() {
        let spec = ToolSpec {
            name: "pulse".into(),
            description: "mint the session".into(),
            parameters: json!({"type": "object"}),
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["parameters"]["type"], "object");
    }
}
