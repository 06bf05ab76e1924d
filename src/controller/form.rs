use std::cell::Cell;

use tracing::{debug, info, warn};

use crate::api::{dispatch, ApiRequest, FormPayload, Method, Transport};
use crate::config::UiConfig;
use crate::controller::{report_failure, Completion};
use crate::cookies::TokenSource;
use crate::errors::UiResult;
use crate::view::{ButtonState, View};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormRole {
    CreateCourse,
    EditCourse,
    CreateLesson,
    EditLesson,
    AddReview,
    EditReview,
}

impl FormRole {
    pub const ALL: [FormRole; 6] = [
        FormRole::CreateCourse,
        FormRole::EditCourse,
        FormRole::CreateLesson,
        FormRole::EditLesson,
        FormRole::AddReview,
        FormRole::EditReview,
    ];

    pub fn form_id(self) -> &'static str {
        match self {
            FormRole::CreateCourse => "createCourseForm",
            FormRole::EditCourse => "editCourseForm",
            FormRole::CreateLesson => "createLessonForm",
            FormRole::EditLesson => "editLessonForm",
            FormRole::AddReview => "addReviewForm",
            FormRole::EditReview => "editReviewForm",
        }
    }

    pub fn method(self) -> Method {
        match self {
            FormRole::CreateCourse | FormRole::CreateLesson | FormRole::AddReview => Method::Post,
            FormRole::EditCourse | FormRole::EditLesson | FormRole::EditReview => Method::Put,
        }
    }

    pub fn busy_verb(self) -> &'static str {
        match self {
            FormRole::CreateCourse | FormRole::CreateLesson => "Creating...",
            FormRole::EditCourse | FormRole::EditLesson | FormRole::EditReview => "Updating...",
            FormRole::AddReview => "Submitting...",
        }
    }

    pub fn idle_label(self) -> &'static str {
        match self {
            FormRole::CreateCourse => "Create Course",
            FormRole::EditCourse => "Update Course",
            FormRole::CreateLesson => "Create Lesson",
            FormRole::EditLesson => "Update Lesson",
            FormRole::AddReview => "Submit Review",
            FormRole::EditReview => "Update Review",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            FormRole::CreateCourse => "Failed to create course",
            FormRole::EditCourse => "Failed to update course",
            FormRole::CreateLesson => "Failed to create lesson",
            FormRole::EditLesson => "Failed to update lesson",
            FormRole::AddReview => "Failed to submit review",
            FormRole::EditReview => "Failed to update review",
        }
    }
}

/// Submit lifecycle of one form: busy button, JSON mutation, then reload on
/// success or an editable form plus one alert on failure.
pub struct FormController<T, S> {
    role: FormRole,
    transport: T,
    tokens: S,
    token_header: String,
    in_flight: Cell<bool>,
}

impl<T, S> FormController<T, S>
where
    T: Transport,
    S: TokenSource,
{
    pub fn new(role: FormRole, transport: T, tokens: S, config: &UiConfig) -> Self {
        Self {
            role,
            transport,
            tokens,
            token_header: config.token_header.clone(),
            in_flight: Cell::new(false),
        }
    }

    /// Builds the controller only when the role's form is on the page.
    pub fn install<V: View>(
        view: &V,
        role: FormRole,
        transport: T,
        tokens: S,
        config: &UiConfig,
    ) -> Option<Self> {
        if !view.has_element(role.form_id()) {
            debug!(form = role.form_id(), "form not on page");
            return None;
        }
        info!(form = role.form_id(), "form controller installed");
        Some(Self::new(role, transport, tokens, config))
    }

    pub fn role(&self) -> FormRole {
        self.role
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Runs one submission. The caller has already prevented the browser's own
    /// submit. On success the button stays busy until the reload lands.
    pub async fn submit<V: View>(&self, view: &V) -> UiResult<Completion> {
        if self.in_flight.replace(true) {
            debug!(form = self.role.form_id(), "submission already in flight");
            return Ok(Completion::Ignored);
        }

        match self.send(view).await {
            Ok(()) => {
                info!(form = self.role.form_id(), "submission accepted, reloading");
                view.reload();
                Ok(Completion::Reloaded)
            }
            Err(err) => {
                let idle = ButtonState::idle(self.role.idle_label());
                if let Err(restore_err) = view.set_submit_state(self.role.form_id(), &idle) {
                    warn!(error = %restore_err, "could not restore submit button");
                }
                self.in_flight.set(false);
                report_failure(view, self.role.failure_message(), &err);
                Err(err)
            }
        }
    }

    async fn send<V: View>(&self, view: &V) -> UiResult<()> {
        let form_id = self.role.form_id();
        view.set_submit_state(form_id, &ButtonState::busy(self.role.busy_verb()))?;

        let payload: FormPayload = view.read_fields(form_id)?.into_iter().collect();
        let action = view.form_action(form_id)?;
        let request = ApiRequest::new(self.role.method(), action)
            .with_token(&self.token_header, self.tokens.auth_token().as_ref())
            .with_json(&payload)?;

        dispatch(&self.transport, request, self.role.failure_message()).await
    }
}
