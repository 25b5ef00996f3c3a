//! One-shot commands against a mocked backend.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_stats(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/chatbot/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vector_store": {"total_documents": 42, "dimension": 384},
            "conversation_count": 3
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_success_prints_stats() {
    let server = MockServer::start().await;
    mount_stats(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": {}, "trace_id": "u1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let file = dir.path().join("report.pdf");
    fs::write(&file, b"%PDF-1.4").unwrap();

    cargo_bin_cmd!("docchat")
        .env("DOCCHAT_HOME", dir.path())
        .args(["--server", &server.uri(), "upload"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully processed report.pdf"))
        .stdout(predicate::str::contains("Documents:     1"))
        .stdout(predicate::str::contains("Chunks:        42"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_rejects_unsupported_type_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let file = dir.path().join("movie.mp4");
    fs::write(&file, b"not a movie").unwrap();

    cargo_bin_cmd!("docchat")
        .env("DOCCHAT_HOME", dir.path())
        .args(["--server", &server.uri(), "upload"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File type .mp4 is not supported"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_prints_answer_and_sources() {
    let server = MockServer::start().await;
    mount_stats(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/chat"))
        .and(body_json(json!({"message": "What is X?", "use_rag": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "X is a thing.",
            "sources": [{"file_name": "report.pdf", "score": 0.5}],
            "trace_id": "c1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    cargo_bin_cmd!("docchat")
        .env("DOCCHAT_HOME", dir.path())
        .args(["--server", &server.uri(), "ask", "What is X?", "--no-rag"])
        .assert()
        .success()
        .stdout(predicate::str::contains("X is a thing."))
        .stdout(predicate::str::contains("report.pdf (score: 0.5)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_reports_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "LLM down"})))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    cargo_bin_cmd!("docchat")
        .env("DOCCHAT_HOME", dir.path())
        .args(["--server", &server.uri(), "ask", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: LLM down"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clear_with_yes_skips_prompt() {
    let server = MockServer::start().await;
    mount_stats(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    cargo_bin_cmd!("docchat")
        .env("DOCCHAT_HOME", dir.path())
        .args(["--server", &server.uri(), "clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chat history cleared"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clear_declined_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/clear"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    cargo_bin_cmd!("docchat")
        .env("DOCCHAT_HOME", dir.path())
        .args(["--server", &server.uri(), "clear"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."))
        .stderr(predicate::str::contains(
            "Are you sure you want to clear the chat history? [y/N]",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_and_history() {
    let server = MockServer::start().await;
    mount_stats(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/chatbot/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "history": [{"query": "q1", "response": "a1", "sources": [], "trace_id": "t"}]
        })))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    cargo_bin_cmd!("docchat")
        .env("DOCCHAT_HOME", dir.path())
        .args(["--server", &server.uri(), "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents:     0"))
        .stdout(predicate::str::contains("\nConversations: 0"))
        .stdout(predicate::str::contains("Chunks:        42"))
        .stdout(predicate::str::contains("Backend conversations: 3"))
        .stdout(predicate::str::contains("Dimension:     384"));

    cargo_bin_cmd!("docchat")
        .env("DOCCHAT_HOME", dir.path())
        .args(["--server", &server.uri(), "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Q: q1"))
        .stdout(predicate::str::contains("A: a1"));
}
