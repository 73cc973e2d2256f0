//! Integration tests for sealing, opening, and the import/export flows.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{TimeZone, Utc};

use quill::backup::{
    open, seal, Envelope, ExportFlow, ExportOutcome, ExportState, ImportFlow, ImportState,
    HEADER_LEN,
};
use quill::crypto::{decrypt, derive_backup_key, encrypt, generate_nonce, generate_salt, TAG_LEN};
use quill::errors::QuillError;
use quill::journal::{Board, Entities, Entry, JournalStore};

/// A small journal: two boards, one of them deleted, and three entries.
fn sample_journal() -> JournalStore {
    let mut store = JournalStore::with_default_board("What are you grateful for today?");
    let gratitude = store.boards[0].id.clone();
    let places = store.create_board("Where did you go?").id.clone();

    store
        .create_entry(
            &gratitude,
            "Dinner with my sister in Lisbon",
            Some(Entities {
                people: vec!["sister".into()],
                places: vec!["Lisbon".into()],
            }),
        )
        .unwrap();
    store
        .create_entry(&places, "A long walk along the harbor", None)
        .unwrap();
    let deleted = store
        .create_entry(&gratitude, "Something I took back later", None)
        .unwrap()
        .id
        .clone();
    store.soft_delete_entry(&deleted);
    store.soft_delete_board(&places);
    store
}

/// Seal an arbitrary payload the way an export would.
fn seal_raw(payload: &[u8], passphrase: &str) -> String {
    let salt = generate_salt();
    let nonce = generate_nonce();
    let key = derive_backup_key(passphrase.as_bytes(), &salt).unwrap();
    let ciphertext = encrypt(&key, &nonce, payload).unwrap();
    Envelope {
        salt,
        nonce,
        ciphertext,
    }
    .encode()
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_restores_everything() {
    let store = sample_journal();
    let backup = seal(&store, "calm-ocean").unwrap();
    let restored = open(&backup, "calm-ocean").unwrap();

    // Soft-deleted records and entities survive unchanged.
    assert_eq!(restored, store);
    assert!(restored.boards.iter().any(|b| b.is_deleted));
    assert!(restored.entries.iter().any(|e| e.is_deleted));
}

#[test]
fn gratitude_board_scenario() {
    let store = JournalStore {
        boards: vec![Board {
            id: "board_abc".into(),
            prompt: "Gratitude".into(),
            created_at: 1_700_000_000_000,
            is_deleted: false,
        }],
        entries: vec![],
    };

    let backup = seal(&store, "calm-ocean").unwrap();
    assert!(BASE64.decode(backup.trim()).unwrap().len() >= 28 + 16);
    assert_eq!(open(&backup, "calm-ocean").unwrap(), store);
    assert!(matches!(
        open(&backup, "ocean-calm"),
        Err(QuillError::AuthenticationFailure)
    ));
}

#[test]
fn empty_collections_roundtrip() {
    let store = JournalStore::with_default_board("Gratitude");
    let restored = open(&seal(&store, "calm-ocean").unwrap(), "calm-ocean").unwrap();
    assert_eq!(restored.boards.len(), 1);
    assert!(restored.entries.is_empty());
}

#[test]
fn wrong_passphrase_is_authentication_failure() {
    let backup = seal(&sample_journal(), "calm-ocean").unwrap();
    assert!(matches!(
        open(&backup, "ocean-calm"),
        Err(QuillError::AuthenticationFailure)
    ));
}

#[test]
fn every_export_uses_fresh_salt_and_nonce() {
    let store = sample_journal();
    let a = Envelope::decode(&seal(&store, "calm-ocean").unwrap()).unwrap();
    let b = Envelope::decode(&seal(&store, "calm-ocean").unwrap()).unwrap();
    assert_ne!(a.salt, b.salt);
    assert_ne!(a.nonce, b.nonce);
    assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn decoded_backup_has_header_and_tag() {
    let backup = seal(&JournalStore::with_default_board("Gratitude"), "calm-ocean").unwrap();
    let raw = BASE64.decode(backup.trim()).unwrap();
    assert!(raw.len() >= HEADER_LEN + TAG_LEN);
}

#[test]
fn tampered_ciphertext_is_rejected() {
    let backup = seal(&sample_journal(), "calm-ocean").unwrap();
    let mut raw = BASE64.decode(backup.trim()).unwrap();
    raw[HEADER_LEN + 2] ^= 0x01;
    let tampered = BASE64.encode(&raw);

    assert!(matches!(
        open(&tampered, "calm-ocean"),
        Err(QuillError::AuthenticationFailure)
    ));
}

#[test]
fn any_flipped_bit_after_the_header_is_rejected() {
    let backup = seal(&JournalStore::with_default_board("Gratitude"), "calm-ocean").unwrap();
    let envelope = Envelope::decode(&backup).unwrap();
    // One key derivation; every variant below shares salt and nonce.
    let key = derive_backup_key(b"calm-ocean", &envelope.salt).unwrap();
    assert!(decrypt(&key, &envelope.nonce, &envelope.ciphertext).is_ok());

    // Covers the ciphertext body and the trailing tag.
    for i in 0..envelope.ciphertext.len() {
        for bit in 0..8 {
            let mut tampered = envelope.ciphertext.clone();
            tampered[i] ^= 1 << bit;
            assert!(
                matches!(
                    decrypt(&key, &envelope.nonce, &tampered),
                    Err(QuillError::AuthenticationFailure)
                ),
                "flip of bit {bit} in byte {i} went unnoticed"
            );
        }
    }
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let store = sample_journal();
    let backup = format!("\n  {}\n", seal(&store, "calm-ocean").unwrap());
    assert_eq!(open(&backup, "calm-ocean").unwrap(), store);
}

// ---------------------------------------------------------------------------
// Malformed backups
// ---------------------------------------------------------------------------

#[test]
fn not_base64_is_malformed_envelope() {
    assert!(matches!(
        open("not-base64!!", "calm-ocean"),
        Err(QuillError::MalformedEnvelope(_))
    ));
}

#[test]
fn too_short_is_malformed_envelope() {
    let short = BASE64.encode([0u8; HEADER_LEN - 1]);
    assert!(matches!(
        open(&short, "calm-ocean"),
        Err(QuillError::MalformedEnvelope(_))
    ));
}

#[test]
fn object_without_journal_fields_is_malformed_payload() {
    let backup = seal_raw(br#"{"foo":1}"#, "calm-ocean");
    assert!(matches!(
        open(&backup, "calm-ocean"),
        Err(QuillError::MalformedPayload(_))
    ));
}

#[test]
fn non_json_payload_is_malformed_payload() {
    let backup = seal_raw(b"dear diary", "calm-ocean");
    assert!(matches!(
        open(&backup, "calm-ocean"),
        Err(QuillError::MalformedPayload(_))
    ));
}

#[test]
fn dangling_entry_rejects_the_whole_backup() {
    let store = JournalStore {
        boards: vec![Board {
            id: "board_a".into(),
            prompt: "Gratitude".into(),
            created_at: 1_700_000_000_000,
            is_deleted: false,
        }],
        entries: vec![Entry {
            id: "entry_x".into(),
            board_id: "board_missing".into(),
            content: "This entry has no board".into(),
            timestamp: 1_700_000_000_001,
            is_deleted: false,
            entities: None,
        }],
    };
    let payload = serde_json::to_vec(&store).unwrap();
    let backup = seal_raw(&payload, "calm-ocean");

    match open(&backup, "calm-ocean") {
        Err(QuillError::DanglingReference { entry_id, board_id }) => {
            assert_eq!(entry_id, "entry_x");
            assert_eq!(board_id, "board_missing");
        }
        other => panic!("expected DanglingReference, got {other:?}"),
    }
}

#[test]
fn browser_shaped_payload_is_accepted() {
    let payload = br#"{
        "boards": [
            {"id": "board_1", "prompt": "What made you smile?", "createdAt": 1700000000000, "isDeleted": false}
        ],
        "entries": [
            {"id": "entry_1", "boardId": "board_1", "content": "The neighbour's dog",
             "timestamp": 1700000000500, "isDeleted": false,
             "entities": {"people": [], "places": ["park"]}}
        ]
    }"#;
    let backup = seal_raw(payload, "calm-ocean");

    let store = open(&backup, "calm-ocean").unwrap();
    assert_eq!(store.boards[0].prompt, "What made you smile?");
    let entities = store.entries[0].entities.as_ref().unwrap();
    assert_eq!(entities.places, vec!["park"]);
}

// ---------------------------------------------------------------------------
// Export flow
// ---------------------------------------------------------------------------

#[test]
fn export_flow_produces_named_artifact() {
    let store = sample_journal();
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 14, 30, 0).unwrap();

    let mut flow = ExportFlow::new("txt");
    flow.choose_passphrase("calm-ocean").unwrap();
    assert_eq!(flow.state(), ExportState::PassphraseChosen);

    let artifact = match flow.run(&store, &now).unwrap() {
        ExportOutcome::Done(a) => a,
        ExportOutcome::NothingToExport => panic!("journal is not empty"),
    };
    assert_eq!(flow.state(), ExportState::Done);
    assert_eq!(artifact.file_name, "backup-oct-17-2026-1430.txt");
    assert_eq!(open(&artifact.contents, "calm-ocean").unwrap(), store);
}

#[test]
fn replacing_the_suggested_passphrase_uses_the_new_one() {
    let store = sample_journal();
    let mut flow = ExportFlow::new("txt");
    flow.choose_passphrase("calm-ocean").unwrap();
    flow.choose_passphrase("my own words").unwrap();

    let ExportOutcome::Done(artifact) = flow.run(&store, &Utc::now()).unwrap() else {
        panic!("expected an artifact");
    };
    assert!(open(&artifact.contents, "calm-ocean").is_err());
    assert!(open(&artifact.contents, "my own words").is_ok());
}

// ---------------------------------------------------------------------------
// Import flow
// ---------------------------------------------------------------------------

#[test]
fn import_replaces_instead_of_merging() {
    let backup_source = sample_journal();
    let backup = seal(&backup_source, "calm-ocean").unwrap();

    let mut current = JournalStore::with_default_board("Something else entirely");
    let board = current.boards[0].id.clone();
    current
        .create_entry(&board, "An entry that only exists locally", None)
        .unwrap();

    let mut flow = ImportFlow::new();
    flow.select_file("backup-oct-17-2026-1430.txt", backup);
    flow.enter_passphrase("calm-ocean").unwrap();
    let summary = flow.confirm(&mut current).unwrap();

    assert_eq!(flow.state(), ImportState::Done);
    assert_eq!(summary.boards, backup_source.boards.len());
    assert_eq!(summary.entries, backup_source.entries.len());
    assert_eq!(current, backup_source);
}

#[test]
fn wrong_passphrase_can_be_retried() {
    let source = sample_journal();
    let backup = seal(&source, "calm-ocean").unwrap();
    let mut current = JournalStore::with_default_board("Local");
    let before = current.clone();

    let mut flow = ImportFlow::new();
    flow.select_file("backup.txt", backup);
    flow.enter_passphrase("ocean-calm").unwrap();

    let err = flow.confirm(&mut current).unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(flow.state(), ImportState::PassphraseEntered);
    assert_eq!(flow.file_name(), Some("backup.txt"));
    assert_eq!(flow.passphrase(), Some("ocean-calm"));
    assert_eq!(current, before, "failed import must not touch the journal");

    flow.enter_passphrase("calm-ocean").unwrap();
    flow.confirm(&mut current).unwrap();
    assert_eq!(current, source);
}

#[test]
fn invalid_payload_ends_the_import() {
    let backup = seal_raw(br#"{"foo":1}"#, "calm-ocean");
    let mut current = JournalStore::with_default_board("Local");
    let before = current.clone();

    let mut flow = ImportFlow::new();
    flow.select_file("backup.txt", backup);
    flow.enter_passphrase("calm-ocean").unwrap();

    let err = flow.confirm(&mut current).unwrap_err();
    assert!(matches!(err, QuillError::MalformedPayload(_)));
    assert!(!err.is_retryable());
    assert_eq!(flow.state(), ImportState::Failed);
    assert_eq!(current, before);
}
