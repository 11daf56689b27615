use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Config;
use crate::error::Result;
use crate::heartbeat::{HeartbeatMonitor, HeartbeatStatus};
use crate::mint::{ContractEmitter, PulseReport};
use crate::persona::PersonaProfile;
use crate::providers::CompletionProvider;
use crate::session::{ConversationEntry, ConversationLog, SpeakerRole};
use crate::tools::{HeartbeatTool, PulseTool, Tool};

/// The conversation driver: owns one session's log and heartbeat state,
/// relays messages through the completion provider, and triggers emission.
///
/// All mutable state lives behind handles owned by this struct; nothing is
/// process-global. Callers drive it from a single logical thread; the
/// internal mutexes serialize the tool surface against the driver.
pub struct Agent {
    persona: PersonaProfile,
    provider: Box<dyn CompletionProvider>,
    log: Arc<Mutex<ConversationLog>>,
    monitor: Arc<Mutex<HeartbeatMonitor>>,
    emitter: ContractEmitter,
    raw_owner: String,
}

impl Agent {
    /// Build an agent for the resolved persona from configuration.
    pub fn from_config(config: &Config, provider: Box<dyn CompletionProvider>) -> Self {
        let persona = config.resolve_persona();
        let emitter = ContractEmitter::new(&config.workspace_dir, &persona.artifact_prefix);
        let monitor = HeartbeatMonitor::new(persona.heartbeat_policy());

        Self {
            provider,
            log: Arc::new(Mutex::new(ConversationLog::new())),
            monitor: Arc::new(Mutex::new(monitor)),
            emitter,
            raw_owner: config.raw_owner().to_string(),
            persona,
        }
    }

    pub fn persona(&self) -> &PersonaProfile {
        &self.persona
    }

    /// Render the persona system prompt with the configured owner.
    pub fn system_prompt(&self) -> anyhow::Result<String> {
        self.persona.system_prompt(&self.raw_owner)
    }

    /// Relay one user message: append it, obtain the provider reply, append
    /// that too, and return it.
    pub fn handle_message(&mut self, text: &str) -> Result<String> {
        let history = {
            let mut log = lock_log(&self.log)?;
            log.append(SpeakerRole::User, text);
            log.snapshot()
        };

        let reply = self.provider.reply(&history)?;

        let mut log = lock_log(&self.log)?;
        log.append(SpeakerRole::Assistant, reply.clone());
        Ok(reply)
    }

    /// Press the pulse button: mint the current conversation into the
    /// contract/metadata artifact pair.
    pub async fn pulse(&self, description: Option<&str>) -> Result<PulseReport> {
        let description = description
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.persona.default_description);

        let log = lock_log(&self.log)?.clone();
        let report = self
            .emitter
            .emit(&log, description, &self.raw_owner, chrono::Utc::now())
            .await?;
        Ok(report)
    }

    /// Record one liveness signal.
    pub fn heartbeat(&self) -> Result<HeartbeatStatus> {
        let mut monitor = self
            .monitor
            .lock()
            .map_err(|_| anyhow::anyhow!("heartbeat monitor lock poisoned"))?;
        Ok(monitor.signal())
    }

    pub fn history(&self) -> Result<Vec<ConversationEntry>> {
        Ok(lock_log(&self.log)?.snapshot())
    }

    pub fn clear_history(&self) -> Result<()> {
        lock_log(&self.log)?.clear();
        Ok(())
    }

    /// Handle to the shared heartbeat monitor, for callers that drive
    /// signals on their own schedule.
    pub fn monitor_handle(&self) -> Arc<Mutex<HeartbeatMonitor>> {
        Arc::clone(&self.monitor)
    }

    /// The function-calling surface for a hosting agent loop: the pulse
    /// button plus the persona-named liveness signal.
    pub fn tools(&self) -> Vec<Box<dyn Tool>> {
        vec![
            Box::new(PulseTool::new(
                self.emitter.clone(),
                Arc::clone(&self.log),
                self.raw_owner.clone(),
                self.persona.default_description.clone(),
            )),
            Box::new(HeartbeatTool::new(
                self.persona.heartbeat_tool_name.clone(),
                Arc::clone(&self.monitor),
            )),
        ]
    }
}

fn lock_log(log: &Arc<Mutex<ConversationLog>>) -> Result<MutexGuard<'_, ConversationLog>> {
    log.lock()
        .map_err(|_| anyhow::anyhow!("conversation log lock poisoned").into())
}
