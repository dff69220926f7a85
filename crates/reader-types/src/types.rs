use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Document metadata. The body text lives in the store, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub id: u64,
    pub title: String,
    pub create_time: DateTime<Utc>,
    pub last_access_time: DateTime<Utc>,
    /// Character count of the content. Recomputed on every content write.
    pub length: usize,
    /// Content authority is the server; local stores keep a placeholder body.
    #[serde(default, skip_serializing_if = "is_false")]
    pub server_stored: bool,
}

/// Payload for creating a document. Timestamps and length default when
/// absent; whether client-supplied timestamps are honored is store policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_access_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub length: Option<usize>,
}

/// Partial metadata update. Only supplied fields overwrite; the store
/// stamps `last_access_time` on every write regardless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Per-document reading state kept alongside the metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingIndex {
    #[serde(default)]
    pub bookmarks: Vec<usize>,
    #[serde(default)]
    pub content: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub cursor: usize,
    pub title: String,
}

/// Result of a complexity rewrite. Ephemeral; only the adjusted passage
/// ever becomes document content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteOutcome {
    pub original_level: i32,
    pub adjusted_level: i32,
    pub adjusted_passage: String,
}

/// A challenging word with a level-appropriate definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardWord {
    pub word: String,
    pub definition: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = DocumentMeta {
            id: 3,
            title: "A title".into(),
            create_time: "2024-01-01T00:00:00Z".parse().unwrap(),
            last_access_time: "2024-01-02T00:00:00Z".parse().unwrap(),
            length: 42,
            server_stored: false,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["createTime"], "2024-01-01T00:00:00Z");
        assert_eq!(json["lastAccessTime"], "2024-01-02T00:00:00Z");
        assert!(json.get("serverStored").is_none());
    }

    #[test]
    fn test_reading_index_defaults_empty() {
        let index: ReadingIndex = serde_json::from_str("{}").unwrap();
        assert_eq!(index, ReadingIndex::default());
    }

    #[test]
    fn test_new_document_accepts_partial_fields() {
        let doc: NewDocument =
            serde_json::from_str(r#"{"title":"t","content":"c"}"#).unwrap();
        assert_eq!(doc.title, "t");
        assert!(doc.create_time.is_none());
        assert!(doc.length.is_none());
    }
}
