pub mod chat;
pub mod dispatch;
pub mod heartbeat;

pub use dispatch::dispatch;
