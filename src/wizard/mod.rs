//! Agent Creation Wizard
//!
//! Four-step state machine that edits an `AgentDraft`: basic details,
//! personality, an inert tokenize placeholder, and review/create. Network
//! calls are requested through `WizardAction` and run by the caller.

mod input;
mod navigation;
mod types;
mod wizard;


pub use navigation::{CREATE_FAILED_MESSAGE, validate_step};
pub use types::{Field, SubmissionStatus, WizardAction, WizardStep};
pub use wizard::AgentWizard;
