//! End-to-end tests for the pulse emission pipeline: conversation snapshot
//! through owner validation, metadata composition, template rendering, and
//! the two artifact writes.

use chrono::{TimeZone, Utc};
use pulsemint::error::EmissionError;
use pulsemint::mint::{ContractEmitter, DEFAULT_DESCRIPTION};
use pulsemint::session::{ConversationLog, SpeakerRole};

const RAW_OWNER: &str = "43Ef2Cd47716f7f833B2f90875C594530133e0eB";
const NORMALIZED_OWNER: &str = "0x43Ef2Cd47716f7f833B2f90875C594530133e0eB";

fn emission_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 45).unwrap()
}

fn greeting_log() -> ConversationLog {
    let mut log = ConversationLog::new();
    log.append(SpeakerRole::User, "Hi");
    log.append(SpeakerRole::Assistant, "Hello");
    log
}

#[tokio::test]
async fn emit_produces_both_artifacts_with_expected_contents() {
    let dir = tempfile::tempdir().unwrap();
    let emitter = ContractEmitter::new(dir.path(), "ERC721_ChatHistory");

    let report = emitter
        .emit(&greeting_log(), "", RAW_OWNER, emission_time())
        .await
        .unwrap();

    // Validated owner carries the prefix; summary counts match the log.
    assert_eq!(report.owner.as_str(), NORMALIZED_OWNER);
    assert_eq!(report.total_messages, 2);
    assert_eq!(report.user_messages, 1);
    assert_eq!(report.assistant_messages, 1);

    let listing = std::fs::read_to_string(&report.contract_path).unwrap();
    assert!(listing.starts_with("// SPDX-License-Identifier: MIT"));
    assert!(listing.contains(&format!("// Owner: {NORMALIZED_OWNER}")));
    assert!(listing.contains(
        "sstore(0, 0x00000000000000000000000043Ef2Cd47716f7f833B2f90875C594530133e0eB)"
    ));
    assert!(listing.contains("// Metadata JSON (stored separately):"));

    let metadata: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report.metadata_path).unwrap()).unwrap();
    assert_eq!(metadata["name"], "Chat History NFT");
    assert_eq!(metadata["description"], DEFAULT_DESCRIPTION);
    assert_eq!(metadata["owner"], NORMALIZED_OWNER);
    assert_eq!(metadata["summary"]["total"], 2);
    assert_eq!(metadata["summary"]["user"], 1);
    assert_eq!(metadata["summary"]["assistant"], 1);
    assert_eq!(metadata["summary"]["pairs"], 1);
    assert_eq!(metadata["chat_history"].as_array().unwrap().len(), 2);
    assert_eq!(metadata["chat_history"][0]["content"], "Hi");
}

#[tokio::test]
async fn pairs_is_always_min_of_role_counts() {
    let dir = tempfile::tempdir().unwrap();
    let emitter = ContractEmitter::new(dir.path(), "ERC721_ChatHistory");

    let mut log = ConversationLog::new();
    for i in 0..5 {
        log.append(SpeakerRole::User, format!("question {i}"));
    }
    log.append(SpeakerRole::Assistant, "only answer");

    let report = emitter
        .emit(&log, "lopsided", RAW_OWNER, emission_time())
        .await
        .unwrap();
    let metadata: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report.metadata_path).unwrap()).unwrap();

    assert_eq!(metadata["summary"]["user"], 5);
    assert_eq!(metadata["summary"]["assistant"], 1);
    assert_eq!(metadata["summary"]["pairs"], 1);
}

#[tokio::test]
async fn empty_log_fails_and_writes_zero_files() {
    let dir = tempfile::tempdir().unwrap();
    let emitter = ContractEmitter::new(dir.path(), "ERC721_ChatHistory");

    let result = emitter
        .emit(&ConversationLog::new(), "desc", RAW_OWNER, emission_time())
        .await;

    assert!(matches!(result, Err(EmissionError::EmptyConversation)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn unconfigured_owner_fails_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let emitter = ContractEmitter::new(dir.path(), "ERC721_ChatHistory");

    let result = emitter.emit(&greeting_log(), "", "", emission_time()).await;

    assert!(matches!(result, Err(EmissionError::OwnerNotConfigured)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn malformed_owner_is_a_distinct_failure() {
    let dir = tempfile::tempdir().unwrap();
    let emitter = ContractEmitter::new(dir.path(), "ERC721_ChatHistory");

    let result = emitter
        .emit(&greeting_log(), "", "0x1234", emission_time())
        .await;

    assert!(matches!(result, Err(EmissionError::InvalidIdentifier(_))));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn correct_length_non_hex_owner_is_accepted() {
    // Validation is length-only: a 40-character payload of Z characters
    // passes and ends up embedded in the artifacts unchanged.
    let dir = tempfile::tempdir().unwrap();
    let emitter = ContractEmitter::new(dir.path(), "ERC721_ChatHistory");
    let zz_owner = "Z".repeat(40);

    let report = emitter
        .emit(&greeting_log(), "", &zz_owner, emission_time())
        .await
        .unwrap();

    assert_eq!(report.owner.as_str(), format!("0x{zz_owner}"));
    let listing = std::fs::read_to_string(&report.contract_path).unwrap();
    assert!(listing.contains(&zz_owner));
}

#[tokio::test]
async fn same_second_emissions_never_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let emitter = ContractEmitter::new(dir.path(), "ERC721_ChatHistory");
    let log = greeting_log();

    let first = emitter
        .emit(&log, "first", RAW_OWNER, emission_time())
        .await
        .unwrap();
    let second = emitter
        .emit(&log, "second", RAW_OWNER, emission_time())
        .await
        .unwrap();

    // Four distinct files; the first pair is untouched.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
    let first_metadata: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&first.metadata_path).unwrap()).unwrap();
    let second_metadata: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&second.metadata_path).unwrap()).unwrap();
    assert_eq!(first_metadata["description"], "first");
    assert_eq!(second_metadata["description"], "second");
}

#[tokio::test]
async fn file_names_follow_both_patterns() {
    let dir = tempfile::tempdir().unwrap();
    let emitter = ContractEmitter::new(dir.path(), "ERC721_MashCook");

    let report = emitter
        .emit(&greeting_log(), "", RAW_OWNER, emission_time())
        .await
        .unwrap();

    let contract_name = report.contract_path.file_name().unwrap().to_str().unwrap();
    let metadata_name = report.metadata_path.file_name().unwrap().to_str().unwrap();
    assert_eq!(contract_name, "ERC721_MashCook_20250601_123045.yul");
    assert_eq!(metadata_name, "metadata_20250601_123045.json");
}

#[tokio::test]
async fn caller_description_overrides_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let emitter = ContractEmitter::new(dir.path(), "ERC721_ChatHistory");

    let report = emitter
        .emit(&greeting_log(), "Weekend hack session", RAW_OWNER, emission_time())
        .await
        .unwrap();

    let metadata: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report.metadata_path).unwrap()).unwrap();
    assert_eq!(metadata["description"], "Weekend hack session");
}
