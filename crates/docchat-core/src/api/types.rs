//! Wire types for the `/api/chatbot` endpoints.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/chatbot/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub use_rag: bool,
}

/// Success body of `POST /api/chatbot/upload`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    /// Parser metadata; opaque to the client.
    pub metadata: serde_json::Value,
    pub trace_id: Option<String>,
    pub message: Option<String>,
    pub filename: Option<String>,
}

/// A document the backend cited for an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default = "unknown_file_name", deserialize_with = "null_as_unknown")]
    pub file_name: String,
    /// The reference backend names this field `score`.
    #[serde(default, alias = "score", skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

fn unknown_file_name() -> String {
    "unknown".to_string()
}

fn null_as_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_file_name))
}

/// Success body of `POST /api/chatbot/chat`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub trace_id: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

/// Vector store block of `GET /api/chatbot/stats`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VectorStoreStats {
    /// Number of indexed chunks.
    pub total_documents: Option<u64>,
    pub index_size: Option<u64>,
    pub dimension: Option<u64>,
    pub model_name: Option<String>,
}

/// Body of `GET /api/chatbot/stats`.
///
/// `conversation_count` is parsed for completeness but the client always
/// shows its own counts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatsResponse {
    pub vector_store: Option<VectorStoreStats>,
    pub conversation_count: Option<u64>,
}

impl StatsResponse {
    /// Indexed chunk count, 0 when the backend does not report one.
    pub fn chunk_count(&self) -> u64 {
        self.vector_store
            .as_ref()
            .and_then(|store| store.total_documents)
            .unwrap_or(0)
    }
}

/// One entry of `GET /api/chatbot/history`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryRecord {
    #[serde(default)]
    pub trace_id: Option<String>,
    pub query: String,
    pub response: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct HistoryResponse {
    pub history: Vec<HistoryRecord>,
}

/// Failure body shared by all endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}
