//! Board and Entry records.
//!
//! Field names serialize in camelCase (`createdAt`, `boardId`,
//! `isDeleted`) so the JSON shape matches journals written by the
//! browser version of the app; their backups import unchanged.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the random part of a generated id.
const SHORT_ID_LEN: usize = 11;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A named journaling prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    /// The question shown when writing an entry.
    pub prompt: String,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
    pub is_deleted: bool,
}

/// One journal response to a board's prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    /// Id of the board this entry answers.
    pub board_id: String,
    pub content: String,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    pub is_deleted: bool,
    /// People and places mentioned, if extraction ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
}

/// People and places mentioned in an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub places: Vec<String>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.places.is_empty()
    }
}

/// Generate a board id such as `board_k3j5h2m9x4a`.
pub fn generate_board_id() -> String {
    format!("board_{}", short_id(&mut rand::rng()))
}

/// Generate an entry id such as `entry_k3j5h2m9x4a`.
pub fn generate_entry_id() -> String {
    format!("entry_{}", short_id(&mut rand::rng()))
}

fn short_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SHORT_ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_serializes_in_camel_case() {
        let board = Board {
            id: "board_abc".into(),
            prompt: "Gratitude".into(),
            created_at: 1_700_000_000_000,
            is_deleted: false,
        };
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(json["isDeleted"], false);
    }

    #[test]
    fn entry_without_entities_omits_the_field() {
        let entry = Entry {
            id: "entry_1".into(),
            board_id: "board_abc".into(),
            content: "A quiet walk by the river".into(),
            timestamp: 1,
            is_deleted: false,
            entities: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"boardId\":\"board_abc\""));
        assert!(!json.contains("entities"));
    }

    #[test]
    fn entry_parses_browser_json() {
        let json = r#"{
            "id": "entry_k3j5h2m9x4a",
            "boardId": "board_abc",
            "content": "Ramen with Yuna in Lisbon",
            "timestamp": 1700000000001,
            "isDeleted": false,
            "entities": { "people": ["Yuna"], "places": ["Lisbon"] }
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        let entities = entry.entities.unwrap();
        assert_eq!(entities.people, vec!["Yuna"]);
        assert_eq!(entities.places, vec!["Lisbon"]);
    }

    #[test]
    fn generated_ids_have_expected_shape() {
        let id = generate_entry_id();
        let suffix = id.strip_prefix("entry_").expect("entry_ prefix");
        assert_eq!(suffix.len(), SHORT_ID_LEN);
        assert!(suffix.bytes().all(|b| ID_ALPHABET.contains(&b)));
        assert!(generate_board_id().starts_with("board_"));
        assert_ne!(generate_board_id(), generate_board_id());
    }
}
