//! Multi-step lead-capture form.
//!
//! [`controller::FormWizard`] owns the step state, field values and
//! validation markers and talks to the page only through
//! [`controller::WizardView`]; [`view::WizardForm`] is the Yew component that
//! implements that view against the DOM.

pub mod attachment;
pub mod controller;
pub mod fields;
pub mod state;
pub mod submission;
pub mod view;

pub use view::WizardForm;
