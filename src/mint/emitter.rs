use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{ArtifactKind, EmissionError};
use crate::identity::OwnerAddress;
use crate::mint::{metadata, template};
use crate::session::ConversationLog;

/// Stem of the metadata file name; the contract stem comes from the persona.
const METADATA_STEM: &str = "metadata";
const CONTRACT_EXT: &str = "yul";
const METADATA_EXT: &str = "json";

/// Structured summary of one successful emission.
#[derive(Debug, Clone)]
pub struct PulseReport {
    pub contract_path: PathBuf,
    pub metadata_path: PathBuf,
    pub owner: OwnerAddress,
    pub total_messages: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
}

impl fmt::Display for PulseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pulse complete. ERC721 contract generated.")?;
        writeln!(f)?;
        writeln!(f, "  Contract: {}", self.contract_path.display())?;
        writeln!(f, "  Metadata: {}", self.metadata_path.display())?;
        writeln!(f, "  Owner:    {}", self.owner)?;
        write!(
            f,
            "  Messages: {} total ({} user / {} assistant)",
            self.total_messages, self.user_messages, self.assistant_messages
        )
    }
}

/// Renders the contract listing and metadata document for a conversation
/// snapshot and writes both to uniquely named files.
///
/// One emission in flight at a time per log; failures are terminal for the
/// attempt and nothing is retried.
#[derive(Debug, Clone)]
pub struct ContractEmitter {
    output_dir: PathBuf,
    artifact_prefix: String,
}

impl ContractEmitter {
    pub fn new(output_dir: impl Into<PathBuf>, artifact_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            artifact_prefix: artifact_prefix.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Emit the artifact pair for the given log.
    ///
    /// Steps, each a distinct failure point: snapshot (empty log rejected
    /// before anything touches disk), owner normalization (unconfigured and
    /// malformed are reported separately), metadata composition, template
    /// rendering, then two independent file writes. The contract file is not
    /// removed if the metadata write fails afterwards.
    pub async fn emit(
        &self,
        log: &ConversationLog,
        description: &str,
        raw_owner: &str,
        now: DateTime<Utc>,
    ) -> Result<PulseReport, EmissionError> {
        let entries = log.snapshot();
        if entries.is_empty() {
            return Err(EmissionError::EmptyConversation);
        }

        let raw_owner = raw_owner.trim();
        if raw_owner.is_empty() {
            return Err(EmissionError::OwnerNotConfigured);
        }
        let owner = OwnerAddress::normalize(raw_owner)?;

        let doc = metadata::compose(&entries, description, &owner, now)?;
        let metadata_json = doc.to_pretty_json()?;
        let listing = template::render_contract(&owner, now, &metadata_json);

        let stamp = now.format("%Y%m%d_%H%M%S").to_string();
        let contract_path = self
            .available_path(&format!("{}_{stamp}", self.artifact_prefix), CONTRACT_EXT)
            .await;
        let metadata_path = self
            .available_path(&format!("{METADATA_STEM}_{stamp}"), METADATA_EXT)
            .await;

        write_artifact(ArtifactKind::Contract, &contract_path, &listing).await?;
        write_artifact(ArtifactKind::Metadata, &metadata_path, &metadata_json).await?;

        tracing::info!(
            contract = %contract_path.display(),
            metadata = %metadata_path.display(),
            messages = doc.summary.total,
            "pulse emission complete"
        );

        Ok(PulseReport {
            contract_path,
            metadata_path,
            owner,
            total_messages: doc.summary.total,
            user_messages: doc.summary.user,
            assistant_messages: doc.summary.assistant,
        })
    }

    /// First free path for `<stem>.<ext>`. File names carry second-resolution
    /// timestamps, so a re-emission within the same second would collide;
    /// occupied names get a numeric suffix (`<stem>_2.<ext>`, `_3`, ...)
    /// instead of being overwritten.
    async fn available_path(&self, stem: &str, ext: &str) -> PathBuf {
        let candidate = self.output_dir.join(format!("{stem}.{ext}"));
        if !path_exists(&candidate).await {
            return candidate;
        }

        let mut n: u32 = 2;
        loop {
            let candidate = self.output_dir.join(format!("{stem}_{n}.{ext}"));
            if !path_exists(&candidate).await {
                return candidate;
            }
            n += 1;
        }
    }
}

async fn path_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

async fn write_artifact(
    artifact: ArtifactKind,
    path: &Path,
    contents: &str,
) -> Result<(), EmissionError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| EmissionError::ArtifactWrite {
                artifact,
                path: path.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, contents)
        .await
        .map_err(|source| EmissionError::ArtifactWrite {
            artifact,
            path: path.to_path_buf(),
            source,
        })
}
