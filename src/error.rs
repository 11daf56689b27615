use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `pulsemint`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide what guidance to show; internal glue continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum PulseError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Owner identity ──────────────────────────────────────────────────
    #[error("identity: {0}")]
    Identity(#[from] IdentityError),

    // ── Artifact emission ───────────────────────────────────────────────
    #[error("emission: {0}")]
    Emission(#[from] EmissionError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Owner identity errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error(
        "invalid owner address: expected 0x followed by 40 hex characters, \
         got {length} characters after normalization"
    )]
    InvalidFormat { length: usize },
}

// ─── Emission errors ────────────────────────────────────────────────────────

/// Which of the two output artifacts an emission step was producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Contract,
    Metadata,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contract => write!(f, "contract listing"),
            Self::Metadata => write!(f, "metadata document"),
        }
    }
}

/// Failures of a single pulse emission attempt. All are terminal for the
/// attempt; nothing is retried internally.
#[derive(Debug, Error)]
pub enum EmissionError {
    #[error("conversation log is empty; nothing to mint")]
    EmptyConversation,

    #[error("no owner address configured")]
    OwnerNotConfigured,

    #[error(transparent)]
    InvalidIdentifier(#[from] IdentityError),

    #[error("failed to encode metadata document: {0}")]
    MetadataEncode(#[from] serde_json::Error),

    #[error("failed to write {artifact} at {}: {source}", .path.display())]
    ArtifactWrite {
        artifact: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, PulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = PulseError::Config(ConfigError::Validation("unknown persona".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn invalid_format_reports_length() {
        let err = PulseError::Identity(IdentityError::InvalidFormat { length: 12 });
        assert!(err.to_string().contains("12 characters"));
    }

    #[test]
    fn artifact_write_names_the_artifact() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = EmissionError::ArtifactWrite {
            artifact: ArtifactKind::Metadata,
            path: PathBuf::from("/out/metadata_20250101_000000.json"),
            source: io,
        };
        let text = err.to_string();
        assert!(text.contains("metadata document"));
        assert!(text.contains("metadata_20250101_000000.json"));
    }

    #[test]
    fn emission_variants_are_distinguishable() {
        let empty = EmissionError::EmptyConversation;
        let unconfigured = EmissionError::OwnerNotConfigured;
        assert_ne!(empty.to_string(), unconfigured.to_string());
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let pulse_err: PulseError = anyhow_err.into();
        assert!(pulse_err.to_string().contains("something went wrong"));
    }
}
