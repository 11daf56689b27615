use crate::session::ConversationEntry;

/// Seam to the external chat-completion service.
///
/// The crate performs no inference itself: the hosting application supplies
/// an implementation and the conversation driver calls it once per user
/// message. The driver is responsible for appending both the user prompt and
/// the returned reply to the conversation log.
pub trait CompletionProvider: Send {
    fn name(&self) -> &str;

    /// Produce the assistant reply for the conversation so far. The last
    /// entry of `history` is the pending user message.
    fn reply(&mut self, history: &[ConversationEntry]) -> anyhow::Result<String>;
}

const DEFAULT_LINES: [&str; 3] = [
    "Noted. I've added that to our session; press pulse whenever you want to mint it.",
    "Got it. Anything else before you mint this conversation?",
    "Understood. The chat history is growing; pulse when ready.",
];

/// Offline provider that cycles through canned acknowledgements.
///
/// Lets the REPL run with no API key or network; real deployments swap in
/// their own `CompletionProvider`.
pub struct ScriptedProvider {
    lines: Vec<String>,
    cursor: usize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            lines: DEFAULT_LINES.iter().map(|s| (*s).to_string()).collect(),
            cursor: 0,
        }
    }

    pub fn with_lines(lines: Vec<String>) -> Self {
        Self { lines, cursor: 0 }
    }
}

impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn reply(&mut self, _history: &[ConversationEntry]) -> anyhow::Result<String> {
        if self.lines.is_empty() {
            anyhow::bail!("scripted provider has no lines configured");
        }
        let line = self.lines[self.cursor % self.lines.len()].clone();
        self.cursor += 1;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_provider_cycles_through_lines() {
        let mut provider =
            ScriptedProvider::with_lines(vec!["one".into(), "two".into()]);
        assert_eq!(provider.reply(&[]).unwrap(), "one");
        assert_eq!(provider.reply(&[]).unwrap(), "two");
        assert_eq!(provider.reply(&[]).unwrap(), "one");
    }

    #[test]
    fn scripted_provider_with_no_lines_errors() {
        let mut provider = ScriptedProvider::with_lines(Vec::new());
        assert!(provider.reply(&[]).is_err());
    }

    #[test]
    fn default_provider_always_replies() {
        let mut provider = ScriptedProvider::new();
        for _ in 0..5 {
            assert!(!provider.reply(&[]).unwrap().is_empty());
        }
    }
}
