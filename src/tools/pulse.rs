use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::common::{failed_tool_result, ok_tool_result};
use super::traits::Tool;
use super::types::ToolResult;
use crate::mint::ContractEmitter;
use crate::session::ConversationLog;

/// The pulse button as a callable tool: snapshot the shared conversation log
/// and mint it into the contract/metadata artifact pair.
pub struct PulseTool {
    emitter: ContractEmitter,
    log: Arc<Mutex<ConversationLog>>,
    raw_owner: String,
    default_description: String,
}

impl PulseTool {
    pub fn new(
        emitter: ContractEmitter,
        log: Arc<Mutex<ConversationLog>>,
        raw_owner: impl Into<String>,
        default_description: impl Into<String>,
    ) -> Self {
        Self {
            emitter,
            log,
            raw_owner: raw_owner.into(),
            default_description: default_description.into(),
        }
    }
}

impl Tool for PulseTool {
    fn name(&self) -> &str {
        "pulse"
    }

    fn description(&self) -> &str {
        "Generate a payable ERC721 contract in Yul with the chat history as metadata"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "description": {
                    "type": "string",
                    "description": "Optional description for the minted artifact"
                }
            },
            "required": []
        })
    }

    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let description = args
                .get("description")
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(&self.default_description)
                .to_string();

            // Clone the snapshot out so the lock is not held across the write.
            let log = {
                let guard = self
                    .log
                    .lock()
                    .map_err(|_| anyhow::anyhow!("conversation log lock poisoned"))?;
                guard.clone()
            };

            match self
                .emitter
                .emit(&log, &description, &self.raw_owner, chrono::Utc::now())
                .await
            {
                Ok(report) => Ok(ok_tool_result(report.to_string())),
                Err(err) => Ok(failed_tool_result(err.to_string())),
            }
        })
    }
}
