#![cfg(not(target_arch = "wasm32"))]

mod support;

use axum::http::StatusCode;
use serde_json::json;

use learntrack_web::{ButtonState, Completion, FormController, FormRole, MemoryView, UiConfig};
use support::{no_cookies, session_cookies, Backend, OfflineTransport};

fn create_course_page() -> MemoryView {
    MemoryView::new()
        .with_form("createCourseForm", "/courses", "Create Course")
        .with_field("createCourseForm", "courseName", "name", "Algebra")
        .with_field("createCourseForm", "courseDescription", "description", "Intro")
}

#[tokio::test]
async fn created_course_reloads_without_alert() {
    let backend = Backend::new();
    let view = create_course_page();
    let controller = FormController::new(
        FormRole::CreateCourse,
        backend.transport(),
        session_cookies(),
        &UiConfig::default(),
    );

    let outcome = controller.submit(&view).await.unwrap();

    assert_eq!(outcome, Completion::Reloaded);
    assert_eq!(view.reloads(), 1);
    assert!(view.alerts().is_empty());

    let hits = backend.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].method, "POST");
    assert_eq!(hits[0].path, "/courses");
    assert_eq!(hits[0].token.as_deref(), Some("abc123"));
    assert_eq!(hits[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        hits[0].body,
        Some(json!({"name": "Algebra", "description": "Intro"}))
    );
}

#[tokio::test]
async fn server_error_restores_create_button() {
    let backend = Backend::new();
    backend.respond_with(StatusCode::INTERNAL_SERVER_ERROR);
    let view = create_course_page();
    let controller = FormController::new(
        FormRole::CreateCourse,
        backend.transport(),
        session_cookies(),
        &UiConfig::default(),
    );

    let err = controller.submit(&view).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(view.reloads(), 0);
    assert_eq!(
        view.button("createCourseForm"),
        Some(ButtonState::idle("Create Course"))
    );
    let alerts = view.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("Failed to create course"));
}

#[tokio::test]
async fn missing_token_is_sent_bare_and_rejected_by_server() {
    let backend = Backend::new();
    let view = create_course_page();
    let controller = FormController::new(
        FormRole::CreateCourse,
        backend.transport(),
        no_cookies(),
        &UiConfig::default(),
    );

    controller.submit(&view).await.unwrap_err();

    let hits = backend.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].token, None);
    assert_eq!(view.alerts().len(), 1);
    assert!(!controller.is_in_flight());
}

#[tokio::test]
async fn network_failure_alerts_with_transport_message() {
    let view = MemoryView::new()
        .with_form("createLessonForm", "/courses/3/lessons", "Create Lesson")
        .with_field("createLessonForm", "lessonTitle", "title", "Limits");
    let controller = FormController::new(
        FormRole::CreateLesson,
        OfflineTransport,
        session_cookies(),
        &UiConfig::default(),
    );

    controller.submit(&view).await.unwrap_err();

    assert_eq!(
        view.alerts(),
        vec!["Failed to create lesson: Failed to fetch".to_string()]
    );
    assert_eq!(
        view.button("createLessonForm"),
        Some(ButtonState::idle("Create Lesson"))
    );
}

#[tokio::test]
async fn overlapping_submit_is_ignored_while_in_flight() {
    let backend = Backend::new();
    let view = create_course_page();
    let controller = FormController::new(
        FormRole::CreateCourse,
        backend.transport(),
        session_cookies(),
        &UiConfig::default(),
    );

    let (first, second) = tokio::join!(controller.submit(&view), controller.submit(&view));

    assert_eq!(first.unwrap(), Completion::Reloaded);
    assert_eq!(second.unwrap(), Completion::Ignored);
    assert_eq!(backend.hits().len(), 1);
    assert_eq!(view.reloads(), 1);
}

#[tokio::test]
async fn each_role_uses_its_method_and_busy_verb() {
    let backend = Backend::new();
    let cases = [
        (FormRole::CreateCourse, "/courses", "POST"),
        (FormRole::EditCourse, "/courses/4", "PUT"),
        (FormRole::CreateLesson, "/courses/4/lessons", "POST"),
        (FormRole::EditLesson, "/courses/4/lessons/2", "PUT"),
        (FormRole::AddReview, "/courses/4/lessons/2/reviews", "POST"),
        (FormRole::EditReview, "/courses/4/lessons/2/reviews/9", "PUT"),
    ];

    for (role, action, method) in cases {
        let view = MemoryView::new()
            .with_form(role.form_id(), action, role.idle_label())
            .with_field(role.form_id(), "title", "title", "x");
        let controller = FormController::install(
            &view,
            role,
            backend.transport(),
            session_cookies(),
            &UiConfig::default(),
        )
        .expect("form is on the page");

        controller.submit(&view).await.unwrap();

        let hit = backend.hits().pop().unwrap();
        assert_eq!(hit.method, method, "{role:?}");
        assert_eq!(hit.path, action, "{role:?}");
        assert_eq!(
            view.button_history(role.form_id()),
            vec![ButtonState::busy(role.busy_verb())],
            "{role:?}"
        );
    }
    assert_eq!(backend.hits().len(), 6);
}

#[test]
fn only_forms_on_the_page_get_controllers() {
    let backend = Backend::new();
    let view = MemoryView::new().with_form("addReviewForm", "/courses/1/lessons/1/reviews", "Submit Review");

    let installed: Vec<FormRole> = FormRole::ALL
        .into_iter()
        .filter(|role| {
            FormController::install(
                &view,
                *role,
                backend.transport(),
                session_cookies(),
                &UiConfig::default(),
            )
            .is_some()
        })
        .collect();

    assert_eq!(installed, vec![FormRole::AddReview]);
}
