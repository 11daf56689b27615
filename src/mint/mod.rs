pub mod emitter;
pub mod metadata;
pub mod template;

pub use emitter::{ContractEmitter, PulseReport};
pub use metadata::{ConversationSummary, MintMetadata, compose, DEFAULT_DESCRIPTION};
pub use template::render_contract;
