//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use serde_json::{json, Value};

use goodreads_mcp::application::service::GoodreadsService;
use goodreads_mcp::domain::transport::{HttpReply, Transport, TransportError};

// =============================================================================
// StubTransport — テスト用Transport
// =============================================================================

/// 固定の応答を返し、送信内容を記録するTransport。
pub struct StubTransport {
    reply: Result<HttpReply, TransportError>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl StubTransport {
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self::with(Ok(HttpReply::new(status, body)))
    }

    pub fn ok_json(body: Value) -> Self {
        Self::replying(200, body.to_string())
    }

    pub fn refusing() -> Self {
        Self::with(Err(TransportError::Connect("connection refused".into())))
    }

    pub fn with(reply: Result<HttpReply, TransportError>) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// 記録された (url, body) の一覧
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for StubTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        self.reply.clone()
    }
}

pub fn service(transport: StubTransport) -> GoodreadsService<StubTransport> {
    GoodreadsService::new(transport)
}

// =============================================================================
// getgather応答のフィクスチャ
// =============================================================================

/// Duneが1冊だけ入った標準的な成功応答。
pub fn dune_response() -> Value {
    success_response(
        "p1",
        json!([{
            "content": [{
                "cover": "c.jpg",
                "title": "Dune",
                "author": "Frank Herbert",
                "rating": "4.5"
            }]
        }]),
    )
}

pub fn success_response(profile_id: &str, bundles: Value) -> Value {
    json!({
        "profile_id": profile_id,
        "state": {"error": null},
        "extract_result": {"bundles": bundles}
    })
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
