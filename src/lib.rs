pub mod animator;
pub mod api;
pub mod config;
pub mod controller;
pub mod cookies;
pub mod errors;
pub mod logging;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use api::{ApiRequest, ApiResponse, EntityId, FormPayload, Method, Transport};
pub use config::UiConfig;
pub use controller::{Completion, DeleteTarget, DeletionTrigger, FormController, FormRole};
pub use cookies::{read_cookie, AuthToken, CookieJar, TokenSource};
pub use errors::{UiError, UiResult};
pub use view::{ButtonState, MemoryView, View};
