use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::types::{ConversationEntry, SpeakerRole};

/// Append-only, order-preserving record of a single session's conversation.
///
/// Insertion order is the only order. Entries are never reordered,
/// deduplicated, or partially deleted; `clear` is the only way to remove
/// anything. The log is owned by its session; one logical writer at a time.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current time. Never fails.
    pub fn append(&mut self, role: SpeakerRole, content: impl Into<String>) {
        self.append_at(role, content, Utc::now());
    }

    /// Append an entry stamped with an explicit time. Timestamps are kept
    /// monotonic non-decreasing: a clock that runs backwards is clamped to
    /// the previous entry's stamp.
    pub fn append_at(
        &mut self,
        role: SpeakerRole,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        let timestamp = match self.entries.last() {
            Some(last) if now < last.timestamp => last.timestamp,
            _ => now,
        };

        self.entries.push(ConversationEntry {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp,
        });
    }

    /// A defensive copy of the full log. Mutating the result never affects
    /// the log itself.
    pub fn snapshot(&self) -> Vec<ConversationEntry> {
        self.entries.clone()
    }

    /// Reset to empty. Irreversible.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationEntry> {
        self.entries.iter()
    }
}
