//! crates/informes_core/src/form.rs
//!
//! Per-screen form state and the reducer that drives it.
//!
//! A `FormState` is the single source of truth for one screen's in-progress
//! input. It is owned by exactly one screen and mutated from one logical thread:
//! user edits and submission completions are applied as discrete events.

use std::collections::BTreeMap;
use std::fmt::Debug;

use tracing::{debug, warn};

use crate::domain::{Credentials, LoginField, ReportDraft, ReportField};

//=========================================================================================
// Field Sets
//=========================================================================================

/// A set of named text fields that a form edits.
pub trait FormFields: Clone + Default {
    type Field: Copy + Eq + Ord + Debug;

    fn get(&self, field: Self::Field) -> &str;
    fn get_mut(&mut self, field: Self::Field) -> &mut String;
}

impl FormFields for Credentials {
    type Field = LoginField;

    fn get(&self, field: LoginField) -> &str {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    fn get_mut(&mut self, field: LoginField) -> &mut String {
        match field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

impl FormFields for ReportDraft {
    type Field = ReportField;

    fn get(&self, field: ReportField) -> &str {
        match field {
            ReportField::Course => &self.course,
            ReportField::Year => &self.year,
            ReportField::Semester => &self.semester,
            ReportField::Date => &self.date,
            ReportField::Comments => &self.comments,
        }
    }

    fn get_mut(&mut self, field: ReportField) -> &mut String {
        match field {
            ReportField::Course => &mut self.course,
            ReportField::Year => &mut self.year,
            ReportField::Semester => &mut self.semester,
            ReportField::Date => &mut self.date,
            ReportField::Comments => &mut self.comments,
        }
    }
}

//=========================================================================================
// Status and Outcomes
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// The result of an external call, as applied to a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded { message: String },
    Failed { message: String },
}

//=========================================================================================
// FormState
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<F: FormFields> {
    values: F,
    errors: BTreeMap<F::Field, String>,
    status: FormStatus,
    message: String,
}

impl<F: FormFields> Default for FormState<F> {
    fn default() -> Self {
        Self {
            values: F::default(),
            errors: BTreeMap::new(),
            status: FormStatus::Idle,
            message: String::new(),
        }
    }
}

impl<F: FormFields> FormState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &F {
        &self.values
    }

    pub fn value(&self, field: F::Field) -> &str {
        self.values.get(field)
    }

    /// The field's error message, empty when the field has none.
    pub fn error(&self, field: F::Field) -> &str {
        self.errors.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &BTreeMap<F::Field, String> {
        &self.errors
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// The top-level message shown above or below the form.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Overwrites a field and clears its error. An edit after a successful
    /// submission starts a fresh form.
    pub fn set_field(&mut self, field: F::Field, value: impl Into<String>) {
        *self.values.get_mut(field) = value.into();
        self.errors.remove(&field);
        if self.status == FormStatus::Succeeded {
            self.status = FormStatus::Idle;
            self.message.clear();
        }
    }

    /// Records per-field validation messages. Empty messages clear the field's
    /// error. The status is left untouched.
    pub fn set_errors<I>(&mut self, errors: I)
    where
        I: IntoIterator<Item = (F::Field, String)>,
    {
        for (field, message) in errors {
            if message.is_empty() {
                self.errors.remove(&field);
            } else {
                self.errors.insert(field, message);
            }
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Enters `Submitting`. Returns false, leaving the state unchanged, when a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.is_submitting() {
            warn!("Submission already in progress; rejecting re-entry.");
            return false;
        }
        self.status = FormStatus::Submitting;
        true
    }

    /// Applies the result of the in-flight submission. Returns false if there
    /// was none.
    pub fn complete_submit(&mut self, outcome: SubmitOutcome) -> bool {
        if !self.is_submitting() {
            warn!(?outcome, "Completion received with no submission in flight; ignoring.");
            return false;
        }
        match outcome {
            SubmitOutcome::Succeeded { message } => {
                self.values = F::default();
                self.errors.clear();
                self.status = FormStatus::Succeeded;
                self.message = message;
            }
            SubmitOutcome::Failed { message } => {
                self.status = FormStatus::Failed(message.clone());
                self.message = message;
            }
        }
        true
    }

    /// Fails the attempt without dispatching anything. Refused while a
    /// submission is in flight.
    pub fn reject(&mut self, message: impl Into<String>) -> bool {
        if self.is_submitting() {
            return false;
        }
        let message = message.into();
        debug!(%message, "Submission rejected before dispatch.");
        self.status = FormStatus::Failed(message.clone());
        self.message = message;
        true
    }

    pub fn view(&self) -> FormView<F> {
        let tone = match self.status {
            FormStatus::Succeeded => MessageTone::Success,
            FormStatus::Failed(_) => MessageTone::Error,
            FormStatus::Idle | FormStatus::Submitting => MessageTone::Neutral,
        };
        FormView {
            values: self.values.clone(),
            errors: self.errors.clone(),
            submit_enabled: !self.is_submitting(),
            show_spinner: self.is_submitting(),
            message: self.message.clone(),
            tone,
        }
    }
}

//=========================================================================================
// Reducer
//=========================================================================================

/// Everything that can happen to a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent<Field> {
    Edited { field: Field, value: String },
    FieldErrors(Vec<(Field, String)>),
    Rejected(String),
    SubmitStarted { message: String },
    SubmitFinished(SubmitOutcome),
}

/// Pure transition function: `(state, event) -> state`.
pub fn reduce<F: FormFields>(mut state: FormState<F>, event: FormEvent<F::Field>) -> FormState<F> {
    match event {
        FormEvent::Edited { field, value } => state.set_field(field, value),
        FormEvent::FieldErrors(errors) => state.set_errors(errors),
        FormEvent::Rejected(message) => {
            state.reject(message);
        }
        FormEvent::SubmitStarted { message } => {
            if state.begin_submit() {
                state.message = message;
            }
        }
        FormEvent::SubmitFinished(outcome) => {
            state.complete_submit(outcome);
        }
    }
    state
}

//=========================================================================================
// View Projection
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    Neutral,
    Success,
    Error,
}

/// What the rendering layer needs to draw a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView<F: FormFields> {
    pub values: F,
    pub errors: BTreeMap<F::Field, String>,
    pub submit_enabled: bool,
    pub show_spinner: bool,
    pub message: String,
    pub tone: MessageTone,
}
