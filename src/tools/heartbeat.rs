use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::common::ok_tool_result;
use super::traits::Tool;
use super::types::ToolResult;
use crate::heartbeat::HeartbeatMonitor;

/// Liveness signal as a callable tool. Each invocation records one signal on
/// the shared monitor and reports its classification.
pub struct HeartbeatTool {
    name: String,
    monitor: Arc<Mutex<HeartbeatMonitor>>,
}

impl HeartbeatTool {
    /// `name` comes from the persona record (`heartbeat_pulse`,
    /// `spice_sync_pulse`, ...).
    pub fn new(name: impl Into<String>, monitor: Arc<Mutex<HeartbeatMonitor>>) -> Self {
        Self {
            name: name.into(),
            monitor,
        }
    }
}

impl Tool for HeartbeatTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Record a periodic liveness signal and report on-time/late/critical drift"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    fn execute<'a>(
        &'a self,
        _args: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let status = {
                let mut guard = self
                    .monitor
                    .lock()
                    .map_err(|_| anyhow::anyhow!("heartbeat monitor lock poisoned"))?;
                guard.signal()
            };

            if !status.is_healthy() {
                tracing::warn!(tool = %self.name, %status, "heartbeat drift detected");
            }
            Ok(ok_tool_result(status.to_string()))
        })
    }
}
