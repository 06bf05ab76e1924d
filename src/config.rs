use serde::{Deserialize, Serialize};

use crate::errors::{UiError, UiResult};

/// Page-level settings. Defaults match the markup rendered by the course
/// server; a page can override any subset with a JSON blob.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub token_cookie: String,
    pub token_header: String,
    pub courses_path: String,
    pub card_selector: String,
    pub modal_selector: String,
    pub reveal_class: String,
    pub pulse_classes: Vec<String>,
    pub pulse_ms: u32,
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            token_cookie: "XSRF-TOKEN".into(),
            token_header: "X-XSRF-TOKEN".into(),
            courses_path: "/courses".into(),
            card_selector: ".card".into(),
            modal_selector: ".modal".into(),
            reveal_class: "fade-in".into(),
            pulse_classes: vec!["animate__animated".into(), "animate__pulse".into()],
            pulse_ms: 1000,
            log_level: "info".into(),
        }
    }
}

impl UiConfig {
    pub fn from_json(raw: &str) -> UiResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|err| UiError::Config(err.to_string()))
    }
}
