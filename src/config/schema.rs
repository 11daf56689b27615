use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};

use crate::heartbeat::HeartbeatPolicy;
use crate::persona::{self, PersonaProfile, TEMPLATE_PERSONA};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory for emitted artifacts - computed from home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Owner account address embedded into every emitted contract.
    pub owner_address: Option<String>,

    /// Active persona name (`template`, `mashcook`).
    #[serde(default = "default_persona")]
    pub persona: String,

    /// Overrides the persona's default mint description.
    #[serde(default)]
    pub default_description: Option<String>,

    /// Overrides the persona's contract file name stem.
    #[serde(default)]
    pub artifact_prefix: Option<String>,

    #[serde(default)]
    pub heartbeat: HeartbeatConfig,
}

fn default_persona() -> String {
    TEMPLATE_PERSONA.into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatConfig {
    /// When true, the chat session drives a background liveness signal.
    pub enabled: bool,
    pub interval_secs: f64,
    pub tolerance_secs: f64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 9.9,
            tolerance_secs: 10.0,
        }
    }
}

impl HeartbeatConfig {
    pub fn policy(&self) -> HeartbeatPolicy {
        HeartbeatPolicy::from_secs(self.interval_secs, self.tolerance_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
        let pulsemint_dir = home.join(".pulsemint");

        Self {
            workspace_dir: pulsemint_dir.join("workspace"),
            config_path: pulsemint_dir.join("config.toml"),
            owner_address: None,
            persona: default_persona(),
            default_description: None,
            artifact_prefix: None,
            heartbeat: HeartbeatConfig::default(),
        }
    }
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let pulsemint_dir = home.join(".pulsemint");
        let config_path = pulsemint_dir.join("config.toml");

        if !pulsemint_dir.exists() {
            fs::create_dir_all(&pulsemint_dir).context("Failed to create .pulsemint directory")?;
            fs::create_dir_all(pulsemint_dir.join("workspace"))
                .context("Failed to create workspace directory")?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path.clone_from(&config_path);
            config.workspace_dir = pulsemint_dir.join("workspace");
            Ok(config)
        } else {
            let config = Self {
                config_path: config_path.clone(),
                workspace_dir: pulsemint_dir.join("workspace"),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(owner) = std::env::var("PULSEMINT_OWNER_ADDRESS") {
            if !owner.is_empty() {
                self.owner_address = Some(owner);
            }
        }

        if let Ok(persona) = std::env::var("PULSEMINT_PERSONA") {
            if !persona.is_empty() {
                self.persona = persona;
            }
        }

        if let Ok(workspace) = std::env::var("PULSEMINT_WORKSPACE") {
            if !workspace.is_empty() {
                self.workspace_dir = PathBuf::from(workspace);
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    /// Resolve the active persona record, applying config-level overrides.
    /// Unknown names fall back to the generic template persona.
    pub fn resolve_persona(&self) -> PersonaProfile {
        let mut profile = persona::builtin(&self.persona).unwrap_or_else(|| {
            tracing::warn!(persona = %self.persona, "unknown persona, using template");
            persona::template()
        });

        if let Some(prefix) = &self.artifact_prefix {
            profile.artifact_prefix.clone_from(prefix);
        }
        if let Some(description) = &self.default_description {
            profile.default_description.clone_from(description);
        }

        profile
    }

    /// The raw owner address string, or empty when unconfigured. Validation
    /// happens at emission time, not here.
    pub fn raw_owner(&self) -> &str {
        self.owner_address.as_deref().unwrap_or("")
    }
}
