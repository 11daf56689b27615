use super::types::ToolResult;

pub(crate) fn failed_tool_result(message: impl Into<String>) -> ToolResult {
    ToolResult {
        success: false,
        output: String::new(),
        error: Some(message.into()),
    }
}

pub(crate) fn ok_tool_result(output: impl Into<String>) -> ToolResult {
    ToolResult {
        success: true,
        output: output.into(),
        error: None,
    }
}
