//! Coupling between the engine and the surrounding form store.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;

/// The narrow interface the engine needs from a form framework.
///
/// `read` supplies the field's current (initially default) value, `write` receives the full
/// ordered tag sequence after every successful mutation, and `error` exposes the externally
/// computed validation message for the field. The engine never produces form errors itself.
pub trait FormBinding {
    fn read(&self) -> Vec<String>;
    fn write(&mut self, tags: &[String]);
    fn error(&self) -> Option<String>;
}

/// Array rule evaluated by [`MemoryForm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    MinItems { min: usize, message: String },
    MaxItems { max: usize, message: String },
}

impl FieldRule {
    pub fn min_items(min: usize, message: impl Into<String>) -> Self {
        FieldRule::MinItems {
            min,
            message: message.into(),
        }
    }

    pub fn max_items(max: usize, message: impl Into<String>) -> Self {
        FieldRule::MaxItems {
            max,
            message: message.into(),
        }
    }

    fn violation(&self, value: &[String]) -> Option<&str> {
        match self {
            FieldRule::MinItems { min, message } if value.len() < *min => Some(message),
            FieldRule::MaxItems { max, message } if value.len() > *max => Some(message),
            _ => None,
        }
    }
}

pub type FormValues = BTreeMap<String, Vec<String>>;

/// Field name to message, for every field that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(pub BTreeMap<String, String>);

impl FormErrors {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Default)]
struct FormField {
    default: Vec<String>,
    value: Vec<String>,
    rules: Vec<FieldRule>,
    error: Option<String>,
}

impl FormField {
    fn validate(&mut self) -> Option<String> {
        self.error = self
            .rules
            .iter()
            .find_map(|rule| rule.violation(&self.value))
            .map(str::to_string);
        self.error.clone()
    }
}

#[derive(Debug, Default)]
struct FormState {
    fields: BTreeMap<String, FormField>,
    submit_count: usize,
}

/// In-memory form store with array fields and declarative item-count rules.
///
/// Fields are validated on [`MemoryForm::submit`]; once a submit has been attempted, every write
/// re-validates its field so errors clear (or appear) as the user edits.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    state: Rc<RefCell<FormState>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with its default value and rules, returning its binding.
    pub fn register(
        &self,
        name: impl Into<String>,
        default: Vec<String>,
        rules: Vec<FieldRule>,
    ) -> MemoryFieldBinding {
        let name = name.into();
        self.state.borrow_mut().fields.insert(
            name.clone(),
            FormField {
                value: default.clone(),
                default,
                rules,
                error: None,
            },
        );
        MemoryFieldBinding {
            form: self.clone(),
            name,
        }
    }

    /// Binding for an already registered field.
    pub fn binding(&self, name: &str) -> Option<MemoryFieldBinding> {
        if !self.state.borrow().fields.contains_key(name) {
            return None;
        }
        Some(MemoryFieldBinding {
            form: self.clone(),
            name: name.to_string(),
        })
    }

    pub fn value(&self, name: &str) -> Option<Vec<String>> {
        self.state
            .borrow()
            .fields
            .get(name)
            .map(|field| field.value.clone())
    }

    pub fn values(&self) -> FormValues {
        self.state
            .borrow()
            .fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value.clone()))
            .collect()
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.state
            .borrow()
            .fields
            .get(name)
            .and_then(|field| field.error.clone())
    }

    /// Sets an error from outside the rule set (for example a server-side check).
    pub fn set_error(&self, name: &str, message: impl Into<String>) {
        if let Some(field) = self.state.borrow_mut().fields.get_mut(name) {
            field.error = Some(message.into());
        }
    }

    pub fn clear_errors(&self) {
        for field in self.state.borrow_mut().fields.values_mut() {
            field.error = None;
        }
    }

    pub fn submit_count(&self) -> usize {
        self.state.borrow().submit_count
    }

    /// Validates every field; returns the values when all rules pass.
    pub fn submit(&self) -> Result<FormValues, FormErrors> {
        let mut state = self.state.borrow_mut();
        state.submit_count += 1;

        let mut errors = BTreeMap::new();
        for (name, field) in state.fields.iter_mut() {
            if let Some(message) = field.validate() {
                errors.insert(name.clone(), message);
            }
        }
        drop(state);

        if errors.is_empty() {
            tracing::debug!("form submitted");
            Ok(self.values())
        } else {
            tracing::debug!(failed = errors.len(), "form submit rejected");
            Err(FormErrors(errors))
        }
    }

    /// Restores defaults, clears errors, and forgets previous submits.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.submit_count = 0;
        for field in state.fields.values_mut() {
            field.value = field.default.clone();
            field.error = None;
        }
    }

    fn write_field(&self, name: &str, tags: &[String]) {
        let mut state = self.state.borrow_mut();
        let revalidate = state.submit_count > 0;
        let Some(field) = state.fields.get_mut(name) else {
            tracing::warn!(field = name, "write to unregistered form field ignored");
            return;
        };
        field.value = tags.to_vec();
        if revalidate {
            field.validate();
        }
    }
}

/// [`FormBinding`] for one field of a [`MemoryForm`].
#[derive(Debug, Clone)]
pub struct MemoryFieldBinding {
    form: MemoryForm,
    name: String,
}

impl MemoryFieldBinding {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn form(&self) -> &MemoryForm {
        &self.form
    }
}

impl FormBinding for MemoryFieldBinding {
    fn read(&self) -> Vec<String> {
        self.form.value(&self.name).unwrap_or_default()
    }

    fn write(&mut self, tags: &[String]) {
        self.form.write_field(&self.name, tags);
    }

    fn error(&self) -> Option<String> {
        self.form.error(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldRule, FormBinding, MemoryForm};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn binding_reads_defaults_and_writes_values() {
        let form = MemoryForm::new();
        let mut skills = form.register("skills", strings(&["React", "TypeScript"]), Vec::new());
        assert_eq!(skills.read(), strings(&["React", "TypeScript"]));

        skills.write(&strings(&["React"]));
        assert_eq!(form.value("skills"), Some(strings(&["React"])));
    }

    #[test]
    fn errors_appear_on_submit_and_revalidate_on_write() {
        let form = MemoryForm::new();
        let mut skills = form.register(
            "skills",
            Vec::new(),
            vec![FieldRule::min_items(1, "At least one skill is required")],
        );
        assert_eq!(skills.error(), None);

        let errors = form.submit().expect_err("empty skills must fail");
        assert_eq!(errors.get("skills"), Some("At least one skill is required"));
        assert_eq!(skills.error().as_deref(), Some("At least one skill is required"));

        skills.write(&strings(&["Rust"]));
        assert_eq!(skills.error(), None);
        assert_eq!(form.submit().expect("valid").get("skills"), Some(&strings(&["Rust"])));
    }

    #[test]
    fn writes_before_first_submit_do_not_validate() {
        let form = MemoryForm::new();
        let mut tools = form.register(
            "tools",
            Vec::new(),
            vec![FieldRule::max_items(1, "Maximum 1 tool")],
        );
        tools.write(&strings(&["git", "docker"]));
        assert_eq!(tools.error(), None);
    }

    #[test]
    fn reset_restores_defaults() {
        let form = MemoryForm::new();
        let mut skills = form.register("skills", strings(&["Go"]), Vec::new());
        skills.write(&strings(&["Go", "Rust"]));
        form.set_error("skills", "taken");
        form.reset();
        assert_eq!(skills.read(), strings(&["Go"]));
        assert_eq!(skills.error(), None);
        assert_eq!(form.submit_count(), 0);
        assert!(form.binding("missing").is_none());
    }
}
