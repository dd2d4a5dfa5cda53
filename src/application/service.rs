use serde::Serialize;
use serde_json::Value;

use crate::domain::error::{AuthError, ShapeError};
use crate::domain::model::book::AuthResponse;
use crate::domain::translate::books_from_bundles;
use crate::domain::transport::{Transport, TransportError};

use super::config::Credentials;
use super::error::AppError;

const BRAND_NAME: &str = "goodreads";

#[derive(Serialize)]
struct AuthRequest<'a> {
    brand_name: &'a str,
    state: RequestState<'a>,
}

#[derive(Serialize)]
struct RequestState<'a> {
    inputs: RequestInputs<'a>,
}

#[derive(Serialize)]
struct RequestInputs<'a> {
    email: &'a str,
    password: &'a str,
}

/// getgather経由でGoodreadsにログインし、本棚を取得するユースケース。
/// 呼び出しごとに独立したrequest/responseで、状態は持たない。
pub struct GoodreadsService<T: Transport> {
    transport: T,
}

impl<T: Transport> GoodreadsService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// 認証して本の一覧を返す。
    ///
    /// 接続不可・非200・`state.error` はすべて `AppError::Auth`。
    /// 応答の形が崩れている場合はそれ以外の `AppError` になる。
    #[tracing::instrument(level = "debug", skip(self, credentials), fields(email = %credentials.email))]
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
        host: &str,
    ) -> Result<AuthResponse, AppError> {
        let url = auth_url(host);
        let payload = serde_json::to_value(AuthRequest {
            brand_name: BRAND_NAME,
            state: RequestState {
                inputs: RequestInputs {
                    email: &credentials.email,
                    password: &credentials.password,
                },
            },
        })
        .map_err(AppError::Json)?;

        let reply = match self.transport.post_json(&url, &payload).await {
            Ok(reply) => reply,
            Err(TransportError::Connect(cause)) => {
                tracing::warn!(%host, %cause, "getgather unreachable");
                return Err(AuthError::unreachable(host).into());
            }
            Err(e) => return Err(AppError::Transport(e)),
        };
        tracing::debug!(status = reply.status, "getgather replied");

        // 非200は本文をそのままメッセージにする（JSONとは限らない）
        if reply.status != 200 {
            return Err(AuthError::new(reply.body).into());
        }

        let body: Value = serde_json::from_str(&reply.body).map_err(AppError::Json)?;

        let state_error = lookup(&body, &["state", "error"])?;
        if let Some(message) = in_band_error(state_error) {
            tracing::warn!(error = %message, "getgather reported an error");
            return Err(AuthError::new(message).into());
        }

        let profile_id = lookup(&body, &["profile_id"])?
            .as_str()
            .ok_or_else(|| ShapeError::UnexpectedType {
                path: "profile_id".into(),
                expected: "string",
            })?;
        let books = books_from_bundles(lookup(&body, &["extract_result", "bundles"])?)?;
        tracing::debug!(%profile_id, count = books.len(), "books extracted");

        Ok(AuthResponse::new(profile_id, books))
    }
}

pub fn auth_url(host: &str) -> String {
    format!("http://{host}/auth/{BRAND_NAME}")
}

fn lookup<'a>(value: &'a Value, keys: &[&str]) -> Result<&'a Value, ShapeError> {
    let mut current = value;
    for (depth, key) in keys.iter().enumerate() {
        current = current
            .get(key)
            .ok_or_else(|| ShapeError::MissingField {
                path: keys[..=depth].join("."),
            })?;
    }
    Ok(current)
}

/// `state.error` が真値ならメッセージを返す。
/// null / false / 0 / 空文字 / 空配列 / 空オブジェクトは「エラーなし」。
fn in_band_error(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_uses_plain_http() {
        assert_eq!(
            auth_url("127.0.0.1:8000"),
            "http://127.0.0.1:8000/auth/goodreads"
        );
    }

    #[test]
    fn falsy_state_errors() {
        for v in [json!(null), json!(false), json!(""), json!(0), json!([]), json!({})] {
            assert_eq!(in_band_error(&v), None, "{v} should be falsy");
        }
    }

    #[test]
    fn truthy_state_errors() {
        assert_eq!(
            in_band_error(&json!("locked account")),
            Some("locked account".to_string())
        );
        assert_eq!(in_band_error(&json!(true)), Some("true".to_string()));
        assert_eq!(
            in_band_error(&json!({"code": 7})),
            Some(r#"{"code":7}"#.to_string())
        );
    }

    #[test]
    fn lookup_reports_missing_path() {
        let body = json!({"state": {}});
        assert_eq!(
            lookup(&body, &["state", "error"]).unwrap_err(),
            ShapeError::MissingField {
                path: "state.error".into()
            }
        );
    }
}
