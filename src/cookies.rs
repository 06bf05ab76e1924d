use std::fmt;

/// Anti-forgery token echoed back to the server on every mutation.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Returns the value of `name` in a raw `Cookie`-style header.
///
/// The header is split on `"; {name}="`; a value is only returned when exactly
/// one such boundary exists, and it runs up to the next `;`.
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    let haystack = format!("; {header}");
    let needle = format!("; {name}=");
    let parts: Vec<&str> = haystack.split(needle.as_str()).collect();
    if parts.len() != 2 {
        return None;
    }
    parts[1].split(';').next().map(str::to_string)
}

pub trait TokenSource {
    fn auth_token(&self) -> Option<AuthToken>;
}

/// Reads a named cookie from a header provider on every call, so a token
/// rotated by the server is picked up by the next request.
#[derive(Clone)]
pub struct CookieJar<F> {
    name: String,
    header: F,
}

impl<F> CookieJar<F>
where
    F: Fn() -> String,
{
    pub fn new(name: impl Into<String>, header: F) -> Self {
        Self {
            name: name.into(),
            header,
        }
    }
}

impl<F> TokenSource for CookieJar<F>
where
    F: Fn() -> String,
{
    fn auth_token(&self) -> Option<AuthToken> {
        read_cookie(&(self.header)(), &self.name)
            .filter(|value| !value.trim().is_empty())
            .map(AuthToken)
    }
}
