use std::fmt;

pub const DEFAULT_HOST: &str = "127.0.0.1:8000";

pub const ENV_EMAIL: &str = "GOODREADS_EMAIL";
pub const ENV_PASSWORD: &str = "GOODREADS_PASSWORD";
pub const ENV_HOST: &str = "GETGATHER_URL";

/// Goodreadsのログイン情報。
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// パスワードはログに出さない
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// MCP Serverモードの設定。起動時に環境変数から一度だけ組み立てる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// email / password のどちらかが欠けていればNone
    pub credentials: Option<Credentials>,
    pub host: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のlookup関数から組み立てる。空文字のemail/passwordは未設定扱い。
    /// `GETGATHER_URL` は未設定のときだけデフォルトを使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let credentials = match (non_empty(ENV_EMAIL), non_empty(ENV_PASSWORD)) {
            (Some(email), Some(password)) => Some(Credentials { email, password }),
            _ => None,
        };
        let host = lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        Self { credentials, host }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn full_environment() {
        let cfg = config_from(&[
            (ENV_EMAIL, "me@example.com"),
            (ENV_PASSWORD, "hunter2"),
            (ENV_HOST, "getgather:9000"),
        ]);
        assert_eq!(
            cfg.credentials,
            Some(Credentials::new("me@example.com", "hunter2"))
        );
        assert_eq!(cfg.host, "getgather:9000");
    }

    #[test]
    fn host_defaults_when_unset() {
        let cfg = config_from(&[(ENV_EMAIL, "me@example.com"), (ENV_PASSWORD, "pw")]);
        assert_eq!(cfg.host, DEFAULT_HOST);
    }

    #[test]
    fn missing_or_empty_credentials() {
        assert!(config_from(&[(ENV_PASSWORD, "pw")]).credentials.is_none());
        assert!(config_from(&[(ENV_EMAIL, "me@example.com")])
            .credentials
            .is_none());
        assert!(config_from(&[(ENV_EMAIL, ""), (ENV_PASSWORD, "pw")])
            .credentials
            .is_none());
    }

    #[test]
    fn debug_hides_password() {
        let dbg = format!("{:?}", Credentials::new("me@example.com", "hunter2"));
        assert!(dbg.contains("me@example.com"));
        assert!(!dbg.contains("hunter2"));
    }
}
