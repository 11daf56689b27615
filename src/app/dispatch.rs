use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::config::Config;

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    match cli.command {
        Commands::Chat { persona, owner } => {
            if let Some(persona) = persona {
                config.persona = persona;
            }
            if let Some(owner) = owner {
                config.owner_address = Some(owner);
            }
            super::chat::run(config).await
        }
        Commands::Heartbeat {
            beats,
            interval_secs,
        } => super::heartbeat::run(&config, beats, interval_secs).await,
        Commands::Status => {
            let persona = config.resolve_persona();
            println!("workspace:  {}", config.workspace_dir.display());
            println!("config:     {}", config.config_path.display());
            println!(
                "owner:      {}",
                config.owner_address.as_deref().unwrap_or("(not configured)")
            );
            println!("persona:    {} ({})", persona.name, persona.display_name);
            println!("prefix:     {}", persona.artifact_prefix);
            println!(
                "heartbeat:  every {:.1}s, tolerance {:.1}s{}",
                config.heartbeat.interval_secs,
                config.heartbeat.tolerance_secs,
                if config.heartbeat.enabled {
                    " (enabled in chat)"
                } else {
                    ""
                }
            );
            Ok(())
        }
    }
}
