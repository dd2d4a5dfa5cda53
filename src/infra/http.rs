use serde_json::Value;

use crate::domain::transport::{HttpReply, Transport, TransportError};

/// reqwestによるTransport実装。
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// タイムアウト等はreqwestのデフォルトのまま。
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(level = "debug", skip(self, body))]
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, TransportError> {
        tracing::debug!(%url, "POST");
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(classify)?;
        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(classify)?;
        Ok(HttpReply::new(status, text))
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}
