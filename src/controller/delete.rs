use tracing::info;

use crate::api::{course_path, dispatch, lesson_path, review_path, ApiRequest, EntityId, Method, Transport};
use crate::config::UiConfig;
use crate::controller::{report_failure, Completion};
use crate::cookies::TokenSource;
use crate::errors::UiResult;
use crate::view::View;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteTarget {
    Course {
        course_id: EntityId,
    },
    Lesson {
        course_id: EntityId,
        lesson_id: EntityId,
    },
    Review {
        course_id: EntityId,
        lesson_id: EntityId,
        review_id: EntityId,
    },
}

impl DeleteTarget {
    pub fn noun(self) -> &'static str {
        match self {
            DeleteTarget::Course { .. } => "course",
            DeleteTarget::Lesson { .. } => "lesson",
            DeleteTarget::Review { .. } => "review",
        }
    }

    pub fn path(self) -> String {
        match self {
            DeleteTarget::Course { course_id } => course_path(course_id),
            DeleteTarget::Lesson {
                course_id,
                lesson_id,
            } => lesson_path(course_id, lesson_id),
            DeleteTarget::Review {
                course_id,
                lesson_id,
                review_id,
            } => review_path(course_id, lesson_id, review_id),
        }
    }

    pub fn confirm_prompt(self) -> String {
        format!("Are you sure you want to delete this {}?", self.noun())
    }

    pub fn failure_message(self) -> String {
        format!("Failed to delete {}", self.noun())
    }
}

/// Confirm-then-DELETE for path-identified resources. A deleted course leaves
/// its own page, so it navigates to the listing; lessons and reviews reload the
/// parent page in place.
pub struct DeletionTrigger<T, S> {
    transport: T,
    tokens: S,
    token_header: String,
    courses_path: String,
}

impl<T, S> DeletionTrigger<T, S>
where
    T: Transport,
    S: TokenSource,
{
    pub fn new(transport: T, tokens: S, config: &UiConfig) -> Self {
        Self {
            transport,
            tokens,
            token_header: config.token_header.clone(),
            courses_path: config.courses_path.clone(),
        }
    }

    pub async fn trigger<V: View>(&self, view: &V, target: DeleteTarget) -> UiResult<Completion> {
        if !view.confirm(&target.confirm_prompt()) {
            return Ok(Completion::Declined);
        }

        let request = ApiRequest::new(Method::Delete, target.path())
            .with_token(&self.token_header, self.tokens.auth_token().as_ref());
        let failure = target.failure_message();

        match dispatch(&self.transport, request, &failure).await {
            Ok(()) => {
                info!(path = %target.path(), "deleted {}", target.noun());
                match target {
                    DeleteTarget::Course { .. } => {
                        view.navigate(&self.courses_path);
                        Ok(Completion::Navigated(self.courses_path.clone()))
                    }
                    DeleteTarget::Lesson { .. } | DeleteTarget::Review { .. } => {
                        view.reload();
                        Ok(Completion::Reloaded)
                    }
                }
            }
            Err(err) => {
                report_failure(view, &failure, &err);
                Err(err)
            }
        }
    }
}
