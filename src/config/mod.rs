use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Path the backend exposes to start the OAuth sign-in flow.
pub const SIGN_IN_PATH: &str = "/oauth2/authorization/google";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// Raw `Cookie` header value carrying the backend session,
    /// e.g. `JSESSIONID=...`.
    pub session_cookie: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_cookie: None,
            timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let api_url = env::var("NUBOARD_API_URL").unwrap_or_else(|_| {
            tracing::debug!("NUBOARD_API_URL not set, using default: {}", DEFAULT_API_URL);
            DEFAULT_API_URL.to_string()
        });

        let session_cookie = env::var("NUBOARD_SESSION_COOKIE")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let timeout = env::var("NUBOARD_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("Invalid NUBOARD_TIMEOUT_SECS '{}': {}", raw, e);
                    None
                }
            });

        Self {
            api_url,
            session_cookie,
            timeout,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
