/// Supplies the cross-site-request-forgery token attached to uploads.
pub trait CsrfTokenProvider: Send + Sync {
    /// `None` when no token is available; the request then carries an empty header.
    fn csrf_token(&self) -> Option<String>;
}

/// Reads the token out of a `Cookie` header string such as
/// `sessionid=x; csrftoken=abc-123`.
#[derive(Debug, Clone)]
pub struct CookieCsrfProvider {
    cookie: String,
    name: String,
}

impl CookieCsrfProvider {
    pub const DEFAULT_COOKIE_NAME: &'static str = "csrftoken";

    pub fn new(cookie: impl Into<String>) -> Self {
        Self::with_name(cookie, Self::DEFAULT_COOKIE_NAME)
    }

    pub fn with_name(cookie: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
            name: name.into(),
        }
    }
}

impl CsrfTokenProvider for CookieCsrfProvider {
    fn csrf_token(&self) -> Option<String> {
        self.cookie
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| key.trim() == self.name)
            .map(|(_, value)| token_prefix(value.trim()))
            .filter(|token| !token.is_empty())
    }
}

/// Token characters are word characters and dashes; anything after is ignored.
fn token_prefix(value: &str) -> String {
    value
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Fixed token, for callers that already hold one.
#[derive(Debug, Clone, Default)]
pub struct StaticCsrfToken(pub Option<String>);

impl CsrfTokenProvider for StaticCsrfToken {
    fn csrf_token(&self) -> Option<String> {
        self.0.clone()
    }
}
