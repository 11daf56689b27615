use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EmissionError;
use crate::identity::OwnerAddress;
use crate::session::{ConversationEntry, SpeakerRole};

/// Display name carried by every minted metadata document.
pub const ARTIFACT_NAME: &str = "Chat History NFT";

/// Description used when the caller supplies an empty one.
pub const DEFAULT_DESCRIPTION: &str = "Minted chat history with agent";

/// Aggregate message counts for one conversation snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub total: usize,
    pub user: usize,
    pub assistant: usize,
    /// One user entry matched with one assistant entry:
    /// `min(user, assistant)`.
    pub pairs: usize,
}

/// The structured document written alongside every emitted contract.
/// Immutable once composed; a pure function of its inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintMetadata {
    pub name: String,
    pub description: String,
    pub chat_history: Vec<ConversationEntry>,
    pub user_messages: Vec<ConversationEntry>,
    pub assistant_messages: Vec<ConversationEntry>,
    pub summary: ConversationSummary,
    pub mint_timestamp: DateTime<Utc>,
    pub owner: OwnerAddress,
}

impl MintMetadata {
    /// Canonical serialized form: JSON with 2-space indentation.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Derive a metadata document from a conversation snapshot.
///
/// The role subsets preserve the original relative order of entries. The
/// emitter rejects empty logs before calling this, but the same check is
/// repeated here so the composer stands on its own.
pub fn compose(
    entries: &[ConversationEntry],
    description: &str,
    owner: &OwnerAddress,
    now: DateTime<Utc>,
) -> Result<MintMetadata, EmissionError> {
    if entries.is_empty() {
        return Err(EmissionError::EmptyConversation);
    }

    let user_messages: Vec<ConversationEntry> = entries
        .iter()
        .filter(|e| e.role == SpeakerRole::User)
        .cloned()
        .collect();
    let assistant_messages: Vec<ConversationEntry> = entries
        .iter()
        .filter(|e| e.role == SpeakerRole::Assistant)
        .cloned()
        .collect();

    let summary = ConversationSummary {
        total: entries.len(),
        user: user_messages.len(),
        assistant: assistant_messages.len(),
        pairs: user_messages.len().min(assistant_messages.len()),
    };

    let description = if description.trim().is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        description.to_string()
    };

    Ok(MintMetadata {
        name: ARTIFACT_NAME.to_string(),
        description,
        chat_history: entries.to_vec(),
        user_messages,
        assistant_messages,
        summary,
        mint_timestamp: now,
        owner: owner.clone(),
    })
}
