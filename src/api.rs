use std::collections::BTreeMap;

use tracing::debug;

use crate::cookies::AuthToken;
use crate::errors::{UiError, UiResult};

pub type EntityId = u64;

/// Largest integer a JS number carries exactly (`Number.MAX_SAFE_INTEGER`).
/// Ids that only arrive as floats must stay within it.
pub const MAX_SAFE_ID: f64 = 9_007_199_254_740_991.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Flat field-name to value map captured from a form at submission time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: BTreeMap<String, String>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later values for the same name replace earlier ones.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> UiResult<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }
}

impl FromIterator<(String, String)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut payload = FormPayload::new();
        for (name, value) in iter {
            payload.insert(name, value);
        }
        payload
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub include_credentials: bool,
}

impl ApiRequest {
    /// Session cookies always travel with mutations.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            include_credentials: true,
        }
    }

    /// Attaches the token header. Without a token the request goes out bare and
    /// the server decides what to do with it.
    pub fn with_token(mut self, header: &str, token: Option<&AuthToken>) -> Self {
        if let Some(token) = token {
            if !token.as_str().trim().is_empty() {
                self.headers
                    .push((header.to_string(), token.as_str().to_string()));
            }
        }
        self
    }

    pub fn with_json(mut self, payload: &FormPayload) -> UiResult<Self> {
        self.headers
            .push(("Content-Type".into(), "application/json".into()));
        self.body = Some(payload.to_json()?);
        Ok(self)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> UiResult<ApiResponse>;
}

/// Sends one mutation. Any status outside 2xx becomes `UiError::Rejected`
/// carrying `failure` as its message; the response body is ignored.
pub async fn dispatch<T: Transport>(
    transport: &T,
    request: ApiRequest,
    failure: &str,
) -> UiResult<()> {
    debug!(method = request.method.as_str(), url = %request.url, "sending request");
    let response = transport.send(request).await?;
    if response.ok() {
        Ok(())
    } else {
        Err(UiError::Rejected {
            status: response.status,
            message: failure.to_string(),
        })
    }
}

pub fn course_path(course_id: EntityId) -> String {
    format!("/courses/{course_id}")
}

pub fn lesson_path(course_id: EntityId, lesson_id: EntityId) -> String {
    format!("/courses/{course_id}/lessons/{lesson_id}")
}

pub fn review_path(course_id: EntityId, lesson_id: EntityId, review_id: EntityId) -> String {
    format!("/courses/{course_id}/lessons/{lesson_id}/reviews/{review_id}")
}

/// Parses an id handed over from page markup, which may arrive as `"7"`,
/// `" 7 "` or `"7.0"` depending on how the template printed it.
pub fn parse_entity_id(raw: &str) -> UiResult<EntityId> {
    let trimmed = raw.trim();
    if let Ok(id) = trimmed.parse::<EntityId>() {
        return Ok(id);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value >= 0.0 && value <= MAX_SAFE_ID && value.fract() == 0.0 => {
            Ok(value as EntityId)
        }
        _ => Err(UiError::InvalidId(raw.to_string())),
    }
}
