use chrono::{DateTime, SecondsFormat, Utc};

use crate::identity::OwnerAddress;

/// Marker replaced with the owner storage word when rendering.
const OWNER_WORD_SLOT: &str = "__OWNER_WORD__";

/// The static ERC721 runtime in Yul. A textual artifact only: it is never
/// compiled, executed, or semantically validated by this crate.
///
/// Storage layout:
///   slot 0: owner address
///   slot 1: next token id
///   slot 2+: token owners (tokenId + 2 => owner)
const YUL_BODY: &str = r#"object "ERC721ChatHistory" {
    code {
        // Deploy the contract
        datacopy(0, dataoffset("Runtime"), datasize("Runtime"))
        return(0, datasize("Runtime"))
    }

    object "Runtime" {
        code {
            // Initialize owner and first token id
            sstore(0, __OWNER_WORD__)
            sstore(1, 1)

            // Copy runtime code
            datacopy(0, dataoffset("RuntimeCode"), datasize("RuntimeCode"))
            return(0, datasize("RuntimeCode"))
        }

        object "RuntimeCode" {
            code {
                // Function selectors:
                // mint() = 0x1249c58b
                // tokenURI(uint256) = 0xc87b56dd
                // owner() = 0x8da5cb5b
                // balanceOf(address) = 0x70a08231

                // Fallback: receive ETH
                if iszero(calldatasize()) {
                    stop()
                }

                let selector := shr(224, calldataload(0))

                switch selector
                // mint() - payable, requires a nonzero payment
                case 0x1249c58b {
                    let payment := callvalue()
                    if iszero(payment) {
                        revert(0, 0)
                    }

                    let tokenId := sload(1)
                    sstore(1, add(tokenId, 1))
                    sstore(add(2, tokenId), caller())

                    mstore(0, tokenId)
                    return(0, 32)
                }

                // tokenURI(uint256 tokenId) - metadata URI placeholder
                case 0xc87b56dd {
                    let tokenId := calldataload(4)

                    let holder := sload(add(2, tokenId))
                    if iszero(holder) {
                        revert(0, 0)
                    }

                    mstore(0, 0x20)
                    mstore(0x20, 0x20)
                    mstore(0x40, "data:application/json;base64,")
                    return(0, 0x60)
                }

                // owner() - contract owner address
                case 0x8da5cb5b {
                    let holder := sload(0)
                    mstore(0, holder)
                    return(0, 32)
                }

                // balanceOf(address) - simplified, always 0
                case 0x70a08231 {
                    mstore(0, 0)
                    return(0, 32)
                }

                default {
                    revert(0, 0)
                }
            }
        }
    }
}"#;

/// Render the full contract listing for one emission.
///
/// Pure text rendering over a fixed template and a parameter record: the
/// validated owner as a 64-hex-char zero-padded storage word, a comment
/// header with owner and generation timestamp, and the metadata document
/// appended as a trailing block.
pub fn render_contract(
    owner: &OwnerAddress,
    generated_at: DateTime<Utc>,
    metadata_json: &str,
) -> String {
    let header = format!(
        "// SPDX-License-Identifier: MIT\n\
         // ERC721 Payable Contract in Yul\n\
         // Owner: {owner}\n\
         // Generated: {}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    let body = YUL_BODY.replace(OWNER_WORD_SLOT, &owner.storage_word());

    format!("{header}\n{body}\n\n// Metadata JSON (stored separately):\n{metadata_json}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn owner() -> OwnerAddress {
        OwnerAddress::normalize("43Ef2Cd47716f7f833B2f90875C594530133e0eB").unwrap()
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn starts_with_spdx_line() {
        let listing = render_contract(&owner(), generated_at(), "{}");
        assert!(listing.starts_with("// SPDX-License-Identifier: MIT"));
    }

    #[test]
    fn embeds_owner_as_padded_storage_word() {
        let listing = render_contract(&owner(), generated_at(), "{}");
        assert!(listing.contains(
            "sstore(0, 0x00000000000000000000000043Ef2Cd47716f7f833B2f90875C594530133e0eB)"
        ));
        assert!(!listing.contains(OWNER_WORD_SLOT));
    }

    #[test]
    fn header_carries_owner_and_timestamp() {
        let listing = render_contract(&owner(), generated_at(), "{}");
        assert!(listing.contains("// Owner: 0x43Ef2Cd47716f7f833B2f90875C594530133e0eB"));
        assert!(listing.contains("// Generated: 2025-06-01T12:00:00Z"));
    }

    #[test]
    fn appends_metadata_as_trailing_block() {
        let listing = render_contract(&owner(), generated_at(), "{\n  \"name\": \"x\"\n}");
        let marker = listing.find("// Metadata JSON (stored separately):").unwrap();
        let body_end = listing.find("\"name\": \"x\"").unwrap();
        assert!(marker < body_end);
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render_contract(&owner(), generated_at(), "{}");
        let b = render_contract(&owner(), generated_at(), "{}");
        assert_eq!(a, b);
    }

    #[test]
    fn lists_all_four_selectors() {
        let listing = render_contract(&owner(), generated_at(), "{}");
        for selector in ["0x1249c58b", "0xc87b56dd", "0x8da5cb5b", "0x70a08231"] {
            assert!(listing.contains(selector), "missing selector {selector}");
        }
    }
}
