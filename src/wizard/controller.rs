use std::collections::BTreeSet;
use log::{info, warn};

use crate::components::notification::Severity;
use crate::wizard::attachment::{validate_attachment, Attachment};
use crate::wizard::fields::{
    check_step, find_field, sanitize_dni, step_count, FieldKind, FieldSpec, FormValues, PLAN_FIELD,
};
use crate::wizard::state::{WizardError, WizardState};
use crate::wizard::submission::{SubmissionError, SubmissionPayload};

pub const SUCCESS_MESSAGE: &str =
    "¡Registro completado exitosamente! Nos pondremos en contacto contigo pronto.";

/// Everything the form markup needs to draw itself.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardSnapshot {
    pub current_step: usize,
    pub total_steps: usize,
    pub progress: f64,
    pub values: FormValues,
    pub invalid: BTreeSet<&'static str>,
    pub validated_groups: BTreeSet<&'static str>,
    pub attachment: Option<Attachment>,
    pub submitting: bool,
}

impl WizardSnapshot {
    pub fn is_active(&self, step: usize) -> bool {
        self.current_step == step
    }

    pub fn is_invalid(&self, name: &str) -> bool {
        self.invalid.contains(name)
    }
}

/// DOM side effects of the wizard.
pub trait WizardView {
    fn render(&mut self, snapshot: WizardSnapshot);
    fn notify(&mut self, text: String, severity: Severity);
    fn scroll_to_form(&mut self);
    fn clear_attachment_input(&mut self);
}

pub struct FormWizard {
    fields: &'static [FieldSpec],
    state: WizardState,
    values: FormValues,
    invalid: BTreeSet<&'static str>,
    validated_groups: BTreeSet<&'static str>,
    attachment: Option<Attachment>,
    submitting: bool,
}

impl FormWizard {
    pub fn new(fields: &'static [FieldSpec]) -> Result<Self, WizardError> {
        Ok(Self {
            fields,
            state: WizardState::new(step_count(fields))?,
            values: FormValues::default(),
            invalid: BTreeSet::new(),
            validated_groups: BTreeSet::new(),
            attachment: None,
            submitting: false,
        })
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            current_step: self.state.current_step(),
            total_steps: self.state.total_steps(),
            progress: self.state.progress_percent(),
            values: self.values.clone(),
            invalid: self.invalid.clone(),
            validated_groups: self.validated_groups.clone(),
            attachment: self.attachment.clone(),
            submitting: self.submitting,
        }
    }

    /// Checks the required fields of the active step and updates their
    /// invalid markers.
    pub fn validate_current_step(&mut self, view: &mut impl WizardView) -> bool {
        let check = check_step(
            self.fields,
            self.state.current_step(),
            &self.values,
            self.attachment.is_some(),
        );
        for name in &check.valid {
            self.invalid.remove(name);
        }
        self.invalid.extend(check.invalid.iter().copied());
        self.validated_groups.extend(check.validated_groups.iter().copied());

        let result = check.into_result();
        view.render(self.snapshot());
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!("Step {} has missing fields: {:?}", self.state.current_step(), err.fields);
                view.notify(err.to_string(), Severity::Danger);
                false
            }
        }
    }

    /// Moves to `target` when the active step validates. Returns whether the
    /// transition happened.
    pub fn go_forward(&mut self, target: usize, view: &mut impl WizardView) -> Result<bool, WizardError> {
        self.state.check_target(target)?;
        if !self.validate_current_step(view) {
            return Ok(false);
        }
        self.transition(target, view)?;
        Ok(true)
    }

    pub fn go_backward(&mut self, target: usize, view: &mut impl WizardView) -> Result<(), WizardError> {
        self.transition(target, view)
    }

    fn transition(&mut self, target: usize, view: &mut impl WizardView) -> Result<(), WizardError> {
        self.state.set_step(target)?;
        info!("Wizard moved to step {}/{}", target, self.state.total_steps());
        self.show_current_step(view);
        Ok(())
    }

    fn show_current_step(&self, view: &mut impl WizardView) {
        view.render(self.snapshot());
        view.scroll_to_form();
    }

    /// Stores a text-like value and returns what was kept, which differs from
    /// `raw` for the DNI field.
    pub fn set_text(&mut self, name: &str, raw: &str, view: &mut impl WizardView) -> String {
        let Some(field) = find_field(self.fields, name) else {
            warn!("Ignoring input for unknown field {}", name);
            return raw.to_string();
        };
        let value = match field.kind {
            FieldKind::Dni => sanitize_dni(raw),
            _ => raw.to_string(),
        };
        self.values.set_text(field.name, value.clone());
        view.render(self.snapshot());
        value
    }

    pub fn set_checked(&mut self, name: &str, checked: bool, view: &mut impl WizardView) {
        match find_field(self.fields, name) {
            Some(field) => {
                self.values.set_checked(field.name, checked);
                view.render(self.snapshot());
            }
            None => warn!("Ignoring change for unknown field {}", name),
        }
    }

    /// Handles a change of the file input. Only the first selected file is
    /// passed in; `None` means the selection was emptied.
    pub fn validate_file(&mut self, file: Option<Attachment>, view: &mut impl WizardView) -> bool {
        let Some(file) = file else {
            self.attachment = None;
            view.render(self.snapshot());
            return false;
        };
        match validate_attachment(&file) {
            Ok(()) => {
                info!("Attachment accepted: {} ({} bytes)", file.name, file.size);
                self.attachment = Some(file);
                view.render(self.snapshot());
                true
            }
            Err(err) => {
                warn!("Attachment rejected: {:?}", err);
                self.attachment = None;
                view.notify(err.to_string(), Severity::Danger);
                view.clear_attachment_input();
                view.render(self.snapshot());
                false
            }
        }
    }

    /// Intercepted submit. Returns the payload to send when the final step is
    /// complete, and marks the submit control busy until
    /// [`FormWizard::finish_submission`] is called.
    pub fn submit(&mut self, view: &mut impl WizardView) -> Option<SubmissionPayload> {
        if self.submitting {
            warn!("Submission already in progress");
            return None;
        }
        if !self.state.is_final() {
            let next = self.state.current_step() + 1;
            if let Err(err) = self.go_forward(next, view) {
                warn!("Could not advance on submit: {}", err);
            }
            return None;
        }
        if !self.validate_current_step(view) {
            return None;
        }

        self.submitting = true;
        view.render(self.snapshot());
        Some(SubmissionPayload {
            fields: self.values.entries(self.fields),
            attachment: self.attachment.clone(),
        })
    }

    pub fn finish_submission(&mut self, result: Result<(), SubmissionError>, view: &mut impl WizardView) {
        self.submitting = false;
        match result {
            Ok(()) => {
                info!("Form submitted successfully");
                view.notify(SUCCESS_MESSAGE.to_string(), Severity::Success);
                self.values.clear();
                self.attachment = None;
                self.invalid.clear();
                self.validated_groups.clear();
                view.clear_attachment_input();
                self.state.reset();
                self.show_current_step(view);
            }
            Err(err) => {
                log::error!("Form submission failed: {:?}", err);
                view.notify(err.to_string(), Severity::Danger);
                view.render(self.snapshot());
            }
        }
    }

    /// Preselects a plan chosen from a pricing card.
    pub fn select_plan(&mut self, plan: &str, view: &mut impl WizardView) {
        self.set_text(PLAN_FIELD, plan, view);
    }
}
