use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Prefix every normalized owner address carries.
pub const ADDRESS_PREFIX: &str = "0x";

/// Length of the hex payload after the prefix (20 bytes).
pub const HEX_PAYLOAD_LEN: usize = 40;

/// Width of an EVM storage word in hex characters (32 bytes).
pub const STORAGE_WORD_LEN: usize = 64;

const NORMALIZED_LEN: usize = ADDRESS_PREFIX.len() + HEX_PAYLOAD_LEN;

/// A validated owner account address.
///
/// Only length is checked: the payload must be exactly 40 characters after
/// the `0x` prefix, but non-hex characters of the right length pass. Once an
/// address has been embedded into an emitted contract it is never
/// re-validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerAddress(String);

impl OwnerAddress {
    /// Normalize a raw address string: prepend the `0x` prefix when missing,
    /// then require the exact normalized length. Idempotent: normalizing an
    /// already-normalized address returns the same value.
    pub fn normalize(raw: &str) -> Result<Self, IdentityError> {
        let trimmed = raw.trim();
        let candidate = if trimmed.starts_with(ADDRESS_PREFIX) {
            trimmed.to_string()
        } else {
            format!("{ADDRESS_PREFIX}{trimmed}")
        };

        if candidate.len() != NORMALIZED_LEN {
            return Err(IdentityError::InvalidFormat {
                length: candidate.len(),
            });
        }

        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 40-character payload without the prefix.
    pub fn hex_payload(&self) -> &str {
        &self.0[ADDRESS_PREFIX.len()..]
    }

    /// The address as a full 32-byte storage word literal: the payload
    /// left-padded with zeros to 64 hex characters, prefixed with `0x`.
    /// Addresses occupy the low 20 bytes of the word.
    pub fn storage_word(&self) -> String {
        format!(
            "{ADDRESS_PREFIX}{:0>width$}",
            self.hex_payload(),
            width = STORAGE_WORD_LEN
        )
    }
}

impl fmt::Display for OwnerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
