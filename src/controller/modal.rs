use tracing::debug;

use crate::api::{lesson_path, review_path, EntityId};
use crate::errors::UiResult;
use crate::view::View;

const EDIT_COURSE_MODAL: &str = "editCourseModal";

/// Ids of an edit modal that is filled from a rendered card.
struct CardModal {
    card_attribute: &'static str,
    form_id: &'static str,
    modal_id: &'static str,
    title_field: &'static str,
    body_field: &'static str,
}

const LESSON_MODAL: CardModal = CardModal {
    card_attribute: "data-lesson-id",
    form_id: "editLessonForm",
    modal_id: "editLessonModal",
    title_field: "editLessonTitle",
    body_field: "editLessonDescription",
};

const REVIEW_MODAL: CardModal = CardModal {
    card_attribute: "data-review-id",
    form_id: "editReviewForm",
    modal_id: "editReviewModal",
    title_field: "editReviewTitle",
    body_field: "editReviewContent",
};

/// Copies the displayed course name and description into the edit form and
/// opens the modal. The form keeps the action it was rendered with.
pub fn edit_course<V: View>(view: &V, name: &str, description: &str) -> UiResult<()> {
    view.set_field("editCourseName", name)?;
    view.set_field("editCourseDescription", description)?;
    view.show_modal(EDIT_COURSE_MODAL)
}

pub fn edit_lesson<V: View>(view: &V, course_id: EntityId, lesson_id: EntityId) -> UiResult<()> {
    populate_from_card(view, &LESSON_MODAL, lesson_id, &lesson_path(course_id, lesson_id))
}

pub fn edit_review<V: View>(
    view: &V,
    course_id: EntityId,
    lesson_id: EntityId,
    review_id: EntityId,
) -> UiResult<()> {
    populate_from_card(
        view,
        &REVIEW_MODAL,
        review_id,
        &review_path(course_id, lesson_id, review_id),
    )
}

fn populate_from_card<V: View>(
    view: &V,
    modal: &CardModal,
    id: EntityId,
    action: &str,
) -> UiResult<()> {
    let card = format!(r#"[{}="{}"]"#, modal.card_attribute, id);
    let title = view.card_text(&card, ".card-title")?;
    let body = view.card_text(&card, ".card-text")?;

    view.set_form_action(modal.form_id, action)?;
    view.set_field(modal.title_field, &title)?;
    view.set_field(modal.body_field, &body)?;
    debug!(card = %card, action, "edit form populated");
    view.show_modal(modal.modal_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryView;

    fn lesson_page() -> MemoryView {
        MemoryView::new()
            .with_form("editLessonForm", "/placeholder", "Update Lesson")
            .with_field("editLessonForm", "editLessonTitle", "title", "")
            .with_field("editLessonForm", "editLessonDescription", "description", "")
            .with_modal("editLessonModal")
            .with_card_text(r#"[data-lesson-id="7"]"#, ".card-title", "  Limits & Continuity ")
            .with_card_text(r#"[data-lesson-id="7"]"#, ".card-text", "Epsilon\ndelta")
    }

    #[test]
    fn course_fields_are_copied_verbatim() {
        let view = MemoryView::new()
            .with_form("editCourseForm", "/courses/4", "Update Course")
            .with_field("editCourseForm", "editCourseName", "name", "")
            .with_field("editCourseForm", "editCourseDescription", "description", "")
            .with_modal("editCourseModal");

        edit_course(&view, " Algebra <I> ", "Intro\n").unwrap();

        assert_eq!(view.field("editCourseName").as_deref(), Some(" Algebra <I> "));
        assert_eq!(view.field("editCourseDescription").as_deref(), Some("Intro\n"));
        assert_eq!(view.action("editCourseForm").as_deref(), Some("/courses/4"));
        assert_eq!(view.shown_modals(), vec!["editCourseModal".to_string()]);
    }

    #[test]
    fn lesson_modal_reads_card_and_rewrites_action() {
        let view = lesson_page();

        edit_lesson(&view, 3, 7).unwrap();

        assert_eq!(view.field("editLessonTitle").as_deref(), Some("  Limits & Continuity "));
        assert_eq!(view.field("editLessonDescription").as_deref(), Some("Epsilon\ndelta"));
        assert_eq!(view.action("editLessonForm").as_deref(), Some("/courses/3/lessons/7"));
        assert_eq!(view.shown_modals(), vec!["editLessonModal".to_string()]);
    }

    #[test]
    fn missing_card_leaves_modal_closed() {
        let view = lesson_page();

        assert!(edit_lesson(&view, 3, 8).is_err());
        assert!(view.shown_modals().is_empty());
        assert_eq!(view.action("editLessonForm").as_deref(), Some("/placeholder"));
    }

    #[test]
    fn review_modal_targets_review_resource() {
        let view = MemoryView::new()
            .with_form("editReviewForm", "", "Update Review")
            .with_field("editReviewForm", "editReviewTitle", "title", "")
            .with_field("editReviewForm", "editReviewContent", "content", "")
            .with_modal("editReviewModal")
            .with_card_text(r#"[data-review-id="11"]"#, ".card-title", "Great")
            .with_card_text(r#"[data-review-id="11"]"#, ".card-text", "Loved it");

        edit_review(&view, 3, 7, 11).unwrap();

        assert_eq!(view.action("editReviewForm").as_deref(), Some("/courses/3/lessons/7/reviews/11"));
        assert_eq!(view.field("editReviewContent").as_deref(), Some("Loved it"));
    }
}
