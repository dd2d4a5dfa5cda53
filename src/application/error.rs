use crate::domain::error::{AuthError, ShapeError};
use crate::domain::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 利用者に見せる唯一の失敗。アダプタ層でのみ捕捉する。
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("malformed getgather response: {0}")]
    Shape(#[from] ShapeError),

    #[error("getgather returned invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("getgather request failed: {0}")]
    Transport(#[source] TransportError),
}
