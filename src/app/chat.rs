use anyhow::Result;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::agent::Agent;
use crate::config::Config;
use crate::error::{EmissionError, PulseError};
use crate::providers::ScriptedProvider;
use crate::session::SpeakerRole;

/// Interactive chat session: plain lines go to the provider, `pulse` mints
/// the conversation, `history`/`clear`/`quit` manage the session.
pub async fn run(config: Config) -> Result<()> {
    let mut agent = Agent::from_config(&config, Box::new(ScriptedProvider::new()));
    let persona = agent.persona().clone();

    println!("{}: {}", persona.display_name, persona.tagline);
    println!("Commands: pulse [description] | history | clear | quit");
    println!();

    // Optional background liveness signal at the configured cadence.
    let ticker = config.heartbeat.enabled.then(|| {
        let monitor = agent.monitor_handle();
        let interval_secs = config.heartbeat.interval_secs;
        tokio::spawn(async move {
            let period = std::time::Duration::from_secs_f64(interval_secs.max(0.1));
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if let Ok(mut guard) = monitor.lock() {
                    let status = guard.signal();
                    tracing::debug!(%status, "background heartbeat");
                }
            }
        })
    });

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();
    let mut stdout = io::stdout();

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        match line.split_once(' ').unwrap_or((line.as_str(), "")) {
            ("quit" | "exit" | "q", _) => break,
            ("pulse", rest) => {
                let description = (!rest.trim().is_empty()).then(|| rest.trim());
                match agent.pulse(description).await {
                    Ok(report) => println!("\n{report}\n"),
                    Err(err) => println!("{}\n", emission_guidance(&err)),
                }
            }
            ("history", _) => {
                let history = agent.history()?;
                if history.is_empty() {
                    println!("(no messages yet)\n");
                }
                for entry in history {
                    let tag = match entry.role {
                        SpeakerRole::User => "you",
                        SpeakerRole::Assistant => persona.display_name.as_str(),
                    };
                    println!("[{}] {tag}: {}", entry.timestamp.format("%H:%M:%S"), entry.content);
                }
                println!();
            }
            ("clear", _) => {
                agent.clear_history()?;
                println!("History cleared.\n");
            }
            _ => match agent.handle_message(&line) {
                Ok(reply) => println!("{}> {reply}\n", persona.display_name),
                Err(err) => {
                    tracing::error!(%err, "provider failed");
                    println!("The provider could not reply: {err}\n");
                }
            },
        }
    }

    if let Some(handle) = ticker {
        handle.abort();
    }
    println!("Session ended.");
    Ok(())
}

/// One distinct, user-facing line per failure category, so "set your owner
/// address" is never confused with "fix its format".
fn emission_guidance(err: &PulseError) -> String {
    match err {
        PulseError::Emission(EmissionError::EmptyConversation) => {
            "Nothing to mint yet. Chat with the agent first, then press pulse.".into()
        }
        PulseError::Emission(EmissionError::OwnerNotConfigured) => {
            "No owner address configured. Set `owner_address` in config.toml or \
             PULSEMINT_OWNER_ADDRESS, then pulse again."
                .into()
        }
        PulseError::Emission(EmissionError::InvalidIdentifier(source)) => {
            format!("The configured owner address is malformed: {source}")
        }
        PulseError::Emission(EmissionError::ArtifactWrite { .. }) => {
            format!("Minting failed while writing output files: {err}")
        }
        other => format!("Minting failed: {other}"),
    }
}
