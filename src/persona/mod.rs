use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

use crate::heartbeat::HeartbeatPolicy;

/// Name of the generic built-in persona.
pub const TEMPLATE_PERSONA: &str = "template";

/// Name of the Persian-cuisine built-in persona.
pub const MASHCOOK_PERSONA: &str = "mashcook";

const TEMPLATE_INSTRUCTIONS: &str = "\
You are {{ display_name }}, {{ tagline }}.

You chat with users and help with their requests while keeping the full
conversation history. When the user presses the pulse button, the session is
minted: an ERC721 contract in Yul is generated with the chat history attached
as metadata, hard-coded to owner address {{ owner_address }}.

Be helpful, clear, and concise. When users ask about minting or NFTs, point
them at the pulse button.";

const MASHCOOK_INSTRUCTIONS: &str = "\
You are {{ display_name }}, {{ tagline }}.

You guide users through traditional Persian cuisine: authentic recipes,
regional variations, and the stories behind each dish. Keep historical
accuracy; avoid modern shortcuts. The conversation can be minted at any time
via the pulse button into an ERC721 contract owned by {{ owner_address }}.

Maintain your spice synchronization pulse on its {{ heartbeat_target_secs }}s
cycle; missed pulses accumulate culinary drift.";

/// A chat persona expressed as data rather than code.
///
/// The original system shipped personas as near-duplicate modules of
/// templated text; here each one is a configuration record feeding the same
/// driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Stable lookup key (`template`, `mashcook`, ...).
    pub name: String,
    pub display_name: String,
    pub tagline: String,
    /// Tera template body for the system prompt.
    pub instructions: String,
    /// Stem of emitted contract file names.
    pub artifact_prefix: String,
    /// Mint description used when the caller supplies none.
    pub default_description: String,
    /// Name the heartbeat capability is registered under.
    pub heartbeat_tool_name: String,
    pub heartbeat_target_ms: u32,
    pub heartbeat_tolerance_ms: u32,
}

impl PersonaProfile {
    /// Render the system prompt for this persona with the configured owner
    /// address substituted in.
    pub fn system_prompt(&self, owner_address: &str) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("display_name", &self.display_name);
        ctx.insert("tagline", &self.tagline);
        ctx.insert("owner_address", owner_address);
        ctx.insert(
            "heartbeat_target_secs",
            &format!("{:.1}", f64::from(self.heartbeat_target_ms) / 1000.0),
        );

        let rendered = Tera::one_off(&self.instructions, &ctx, false)?;
        Ok(rendered)
    }

    pub fn heartbeat_policy(&self) -> HeartbeatPolicy {
        HeartbeatPolicy {
            target_interval: chrono::Duration::milliseconds(i64::from(self.heartbeat_target_ms)),
            tolerance: chrono::Duration::milliseconds(i64::from(self.heartbeat_tolerance_ms)),
        }
    }
}

/// The generic built-in persona.
pub fn template() -> PersonaProfile {
    PersonaProfile {
        name: TEMPLATE_PERSONA.into(),
        display_name: "Agent Template".into(),
        tagline: "a customizable AI agent that mints chat history".into(),
        instructions: TEMPLATE_INSTRUCTIONS.into(),
        artifact_prefix: "ERC721_ChatHistory".into(),
        default_description: String::new(),
        heartbeat_tool_name: "heartbeat_pulse".into(),
        heartbeat_target_ms: 9_900,
        heartbeat_tolerance_ms: 10_000,
    }
}

/// The Persian-cuisine built-in persona.
pub fn mashcook() -> PersonaProfile {
    PersonaProfile {
        name: MASHCOOK_PERSONA.into(),
        display_name: "MashCook".into(),
        tagline: "a master of traditional Persian cuisine".into(),
        instructions: MASHCOOK_INSTRUCTIONS.into(),
        artifact_prefix: "ERC721_MashCook".into(),
        default_description: "Minted Persian cooking session".into(),
        heartbeat_tool_name: "spice_sync_pulse".into(),
        heartbeat_target_ms: 9_900,
        heartbeat_tolerance_ms: 10_000,
    }
}

/// Look up a built-in persona by name.
pub fn builtin(name: &str) -> Option<PersonaProfile> {
    match name {
        TEMPLATE_PERSONA => Some(template()),
        MASHCOOK_PERSONA => Some(mashcook()),
        _ => None,
    }
}
