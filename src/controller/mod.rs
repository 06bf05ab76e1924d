pub mod delete;
pub mod form;
pub mod modal;

use tracing::warn;

use crate::errors::UiError;
use crate::view::View;

pub use delete::{DeleteTarget, DeletionTrigger};
pub use form::{FormController, FormRole};

/// What a finished interaction did to the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    Reloaded,
    Navigated(String),
    /// The user declined the confirmation prompt.
    Declined,
    /// A request for the same form was still in flight.
    Ignored,
}

fn report_failure<V: View>(view: &V, failure: &str, err: &UiError) {
    warn!(status = ?err.status(), error = %err, "{failure}");
    view.alert(&format!("{failure}: {err}"));
}
