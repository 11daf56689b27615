#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod agent;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod heartbeat;
pub mod identity;
pub mod mint;
pub mod persona;
pub mod providers;
pub mod session;
pub mod tools;

pub use agent::Agent;
pub use config::Config;
pub use error::{PulseError, Result};
