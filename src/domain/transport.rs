use std::sync::Arc;

use serde_json::Value;

/// HTTP応答。ステータスと本文テキストのみ保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// 接続自体が確立できなかった。
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// getgatherへのHTTP送信の抽象。Infra層が実装する。
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, TransportError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, TransportError> {
        (**self).post_json(url, body).await
    }
}
