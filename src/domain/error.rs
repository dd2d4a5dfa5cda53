/// 認証・取得失敗。原因の区別はメッセージのみで行う。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// getgatherに接続できない場合。起動方法を案内する。
    pub fn unreachable(host: &str) -> Self {
        Self::new(format!(
            "Cannot connect to getgather service at {host}. \
             Please ensure getgather is running:\n\
             docker run -p 8000:8000 getgather/dax"
        ))
    }

    pub fn missing_credentials() -> Self {
        Self::new("GOODREADS_EMAIL and GOODREADS_PASSWORD environment variables must be set")
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// getgatherの応答が想定した形をしていない。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("missing field: {path}")]
    MissingField { path: String },

    #[error("unexpected type at {path}: expected {expected}")]
    UnexpectedType { path: String, expected: &'static str },

    #[error("rating at {path} is not a number: {value}")]
    InvalidRating { path: String, value: String },
}
