use clap::{Parser, Subcommand};

/// `pulsemint` - Chatbot agent template that mints chat history as ERC721 Yul artifacts.
#[derive(Parser, Debug)]
#[command(name = "pulsemint")]
#[command(version = "0.1.0")]
#[command(about = "Chat, then press pulse to mint the session.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive chat session
    Chat {
        /// Persona to chat with (template, mashcook)
        #[arg(short, long)]
        persona: Option<String>,

        /// Owner address embedded into minted contracts
        #[arg(long)]
        owner: Option<String>,
    },

    /// Drive the liveness monitor for a fixed number of beats
    Heartbeat {
        /// Number of signals to send
        #[arg(short, long, default_value = "5")]
        beats: u32,

        /// Seconds between signals (default: persona cadence)
        #[arg(long)]
        interval_secs: Option<f64>,
    },

    /// Show resolved configuration
    Status,
}
