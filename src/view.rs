use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::errors::{UiError, UiResult};

const SPINNER: &str = r#"<i class="fas fa-spinner fa-spin me-2"></i>"#;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonState {
    Idle { label: String },
    Busy { verb: String },
}

impl ButtonState {
    pub fn idle(label: impl Into<String>) -> Self {
        ButtonState::Idle {
            label: label.into(),
        }
    }

    pub fn busy(verb: impl Into<String>) -> Self {
        ButtonState::Busy { verb: verb.into() }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, ButtonState::Busy { .. })
    }

    /// Button content as rendered into the page.
    pub fn markup(&self) -> String {
        match self {
            ButtonState::Idle { label } => label.clone(),
            ButtonState::Busy { verb } => format!("{SPINNER}{verb}"),
        }
    }
}

/// Everything the controllers need from the page. Element arguments are
/// element ids unless named otherwise.
pub trait View {
    fn has_element(&self, id: &str) -> bool;

    /// Named fields of a form in document order.
    fn read_fields(&self, form_id: &str) -> UiResult<Vec<(String, String)>>;

    fn form_action(&self, form_id: &str) -> UiResult<String>;

    fn set_form_action(&self, form_id: &str, action: &str) -> UiResult<()>;

    fn set_field(&self, id: &str, value: &str) -> UiResult<()>;

    /// Text content of `part` (a selector) inside the element matching `card`.
    fn card_text(&self, card: &str, part: &str) -> UiResult<String>;

    fn set_submit_state(&self, form_id: &str, state: &ButtonState) -> UiResult<()>;

    fn show_modal(&self, modal_id: &str) -> UiResult<()>;

    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);

    fn reload(&self);

    fn navigate(&self, url: &str);
}

#[derive(Clone, Debug)]
struct MemoryField {
    id: String,
    form_id: String,
    name: String,
    value: String,
}

#[derive(Clone, Debug)]
struct MemoryForm {
    action: String,
    button: ButtonState,
    button_history: Vec<ButtonState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    forms: HashMap<String, MemoryForm>,
    fields: Vec<MemoryField>,
    cards: HashMap<(String, String), String>,
    modals: Vec<String>,
    shown: Vec<String>,
    alerts: Vec<String>,
    confirmations: Vec<String>,
    navigations: Vec<String>,
    reloads: usize,
}

/// In-memory page used for headless runs and tests. Records every effect a
/// controller has on the page.
#[derive(Debug)]
pub struct MemoryView {
    state: RefCell<MemoryState>,
    confirm_answer: Cell<bool>,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryView {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(MemoryState::default()),
            confirm_answer: Cell::new(true),
        }
    }

    pub fn with_form(self, form_id: &str, action: &str, label: &str) -> Self {
        self.state.borrow_mut().forms.insert(
            form_id.to_string(),
            MemoryForm {
                action: action.to_string(),
                button: ButtonState::idle(label),
                button_history: Vec::new(),
            },
        );
        self
    }

    /// Adds an input named `name` to `form_id`. `id` is the element id used by
    /// `set_field`.
    pub fn with_field(self, form_id: &str, id: &str, name: &str, value: &str) -> Self {
        self.state.borrow_mut().fields.push(MemoryField {
            id: id.to_string(),
            form_id: form_id.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn with_card_text(self, card: &str, part: &str, text: &str) -> Self {
        self.state
            .borrow_mut()
            .cards
            .insert((card.to_string(), part.to_string()), text.to_string());
        self
    }

    pub fn with_modal(self, modal_id: &str) -> Self {
        self.state.borrow_mut().modals.push(modal_id.to_string());
        self
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn field(&self, id: &str) -> Option<String> {
        self.state
            .borrow()
            .fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.clone())
    }

    pub fn action(&self, form_id: &str) -> Option<String> {
        self.state
            .borrow()
            .forms
            .get(form_id)
            .map(|form| form.action.clone())
    }

    pub fn button(&self, form_id: &str) -> Option<ButtonState> {
        self.state
            .borrow()
            .forms
            .get(form_id)
            .map(|form| form.button.clone())
    }

    pub fn button_history(&self, form_id: &str) -> Vec<ButtonState> {
        self.state
            .borrow()
            .forms
            .get(form_id)
            .map(|form| form.button_history.clone())
            .unwrap_or_default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.state.borrow().confirmations.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.borrow().navigations.clone()
    }

    pub fn shown_modals(&self) -> Vec<String> {
        self.state.borrow().shown.clone()
    }

    pub fn reloads(&self) -> usize {
        self.state.borrow().reloads
    }
}

impl View for MemoryView {
    fn has_element(&self, id: &str) -> bool {
        let state = self.state.borrow();
        state.forms.contains_key(id)
            || state.modals.iter().any(|modal| modal == id)
            || state.fields.iter().any(|field| field.id == id)
    }

    fn read_fields(&self, form_id: &str) -> UiResult<Vec<(String, String)>> {
        let state = self.state.borrow();
        if !state.forms.contains_key(form_id) {
            return Err(UiError::MissingElement(form_id.to_string()));
        }
        Ok(state
            .fields
            .iter()
            .filter(|field| field.form_id == form_id && !field.name.is_empty())
            .map(|field| (field.name.clone(), field.value.clone()))
            .collect())
    }

    fn form_action(&self, form_id: &str) -> UiResult<String> {
        self.action(form_id)
            .ok_or_else(|| UiError::MissingElement(form_id.to_string()))
    }

    fn set_form_action(&self, form_id: &str, action: &str) -> UiResult<()> {
        let mut state = self.state.borrow_mut();
        let form = state
            .forms
            .get_mut(form_id)
            .ok_or_else(|| UiError::MissingElement(form_id.to_string()))?;
        form.action = action.to_string();
        Ok(())
    }

    fn set_field(&self, id: &str, value: &str) -> UiResult<()> {
        let mut state = self.state.borrow_mut();
        let field = state
            .fields
            .iter_mut()
            .find(|field| field.id == id)
            .ok_or_else(|| UiError::MissingElement(id.to_string()))?;
        field.value = value.to_string();
        Ok(())
    }

    fn card_text(&self, card: &str, part: &str) -> UiResult<String> {
        self.state
            .borrow()
            .cards
            .get(&(card.to_string(), part.to_string()))
            .cloned()
            .ok_or_else(|| UiError::MissingElement(format!("{card} {part}")))
    }

    fn set_submit_state(&self, form_id: &str, state: &ButtonState) -> UiResult<()> {
        let mut inner = self.state.borrow_mut();
        let form = inner
            .forms
            .get_mut(form_id)
            .ok_or_else(|| UiError::MissingElement(form_id.to_string()))?;
        form.button = state.clone();
        form.button_history.push(state.clone());
        Ok(())
    }

    fn show_modal(&self, modal_id: &str) -> UiResult<()> {
        let mut state = self.state.borrow_mut();
        if !state.modals.iter().any(|modal| modal == modal_id) {
            return Err(UiError::MissingElement(modal_id.to_string()));
        }
        state.shown.push(modal_id.to_string());
        Ok(())
    }

    fn confirm(&self, message: &str) -> bool {
        self.state
            .borrow_mut()
            .confirmations
            .push(message.to_string());
        self.confirm_answer.get()
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_string());
    }

    fn reload(&self) {
        self.state.borrow_mut().reloads += 1;
    }

    fn navigate(&self, url: &str) {
        self.state.borrow_mut().navigations.push(url.to_string());
    }
}
