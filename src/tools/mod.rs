pub mod common;
pub mod heartbeat;
pub mod pulse;
pub mod traits;
pub mod types;

pub use heartbeat::HeartbeatTool;
pub use pulse::PulseTool;
pub use traits::Tool;
pub use types::{ToolResult, ToolSpec};
