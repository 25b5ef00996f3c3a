//! HTTP client for the document chat backend.
//!
//! Every route lives under `{base_url}/api/chatbot`. Requests are never
//! retried and carry no timeout; a request stays in flight until the backend
//! answers or the connection fails.

mod types;

use std::io;

use reqwest::{Response, StatusCode, multipart};
use serde::de::DeserializeOwned;
pub use types::{
    ChatRequest, ChatResponse, HistoryRecord, Source, StatsResponse, UploadResponse,
    VectorStoreStats,
};
use types::{ErrorBody, HistoryResponse};

/// Route prefix shared by all endpoints.
pub const API_PREFIX: &str = "/api/chatbot";

/// Failure of a backend call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),
    /// A 2xx response whose body was not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The local file could not be read before uploading.
    #[error("failed to read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ApiError {
    /// True for HTTP-level rejections, false for network-class failures.
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Thin typed wrapper around `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ChatbotClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChatbotClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, route: &str) -> String {
        format!("{}{API_PREFIX}/{route}", self.base_url)
    }

    /// Uploads one document as multipart field `file`.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<UploadResponse> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        tracing::debug!(file = file_name, "uploading document");
        let response = self
            .http
            .post(self.url("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let parsed: UploadResponse = decode(response).await?;
        tracing::info!(
            file = file_name,
            trace_id = parsed.trace_id.as_deref().unwrap_or("-"),
            "document indexed"
        );
        Ok(parsed)
    }

    /// Sends one chat message.
    pub async fn chat(&self, message: &str, use_rag: bool) -> ApiResult<ChatResponse> {
        let body = ChatRequest { message, use_rag };
        let response = self
            .http
            .post(self.url("chat"))
            .json(&body)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let parsed: ChatResponse = decode(response).await?;
        tracing::info!(
            use_rag,
            sources = parsed.sources.len(),
            trace_id = parsed.trace_id.as_deref().unwrap_or("-"),
            "chat answered"
        );
        Ok(parsed)
    }

    /// Clears the backend conversation history. Any 2xx counts as success.
    pub async fn clear(&self) -> ApiResult<()> {
        let response = self
            .http
            .post(self.url("clear"))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Fetches aggregate backend stats.
    pub async fn stats(&self) -> ApiResult<StatsResponse> {
        let response = self
            .http
            .get(self.url("stats"))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        decode(response).await
    }

    /// Fetches the conversation history the backend keeps.
    pub async fn history(&self) -> ApiResult<Vec<HistoryRecord>> {
        let response = self
            .http
            .get(self.url("history"))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let parsed: HistoryResponse = decode(response).await?;
        Ok(parsed.history)
    }
}

async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(rejected(status, &body))
}

/// Decodes a JSON route's body. These routes answer JSON on failure too, so a
/// failure body that is not JSON (a proxy error page, say) is a decode error
/// rather than a backend message.
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let body = response.text().await.map_err(ApiError::Transport)?;
    if status.is_success() {
        return serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()));
    }

    if let Err(e) = serde_json::from_str::<serde_json::Value>(&body) {
        tracing::warn!(%status, "non-JSON failure body");
        return Err(ApiError::Decode(format!("{status}: {e}")));
    }
    Err(rejected(status, &body))
}

fn rejected(status: StatusCode, body: &str) -> ApiError {
    let message = error_message(status, body);
    tracing::warn!(%status, %message, "backend rejected request");
    ApiError::Status { status, message }
}

/// Message from the JSON `error` or `message` field, else the status reason.
/// Raw bodies are never echoed.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && let Some(message) = parsed.error.or(parsed.message)
        && !message.trim().is_empty()
    {
        return message;
    }

    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_error_field() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"error":"No file provided","message":"ignored"}"#,
        );
        assert_eq!(msg, "No file provided");
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>502 Bad Gateway</html>"),
            "Bad Gateway"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, "{}"), "Not Found");
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
    }

    #[test]
    fn test_url_joins_prefix_without_double_slash() {
        let client = ChatbotClient::new("http://localhost:5000/");
        assert_eq!(client.url("chat"), "http://localhost:5000/api/chatbot/chat");
    }
}
