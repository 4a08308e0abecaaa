//! The guided wizard core.
//!
//! ## Pieces
//!
//! - [`sequence`] — step list per artifact type (4 steps monthly, 5
//!   otherwise)
//! - [`check_step`] — per-step completion predicates
//! - [`WorkflowController`] — the state machine driving one session
//! - [`build_payload`] / [`save_artifact`] — reduction into the three
//!   divergent persistence payloads
//! - [`load_for_edit`] — the inverse path populating a session from a
//!   persisted artifact
//!
//! Notices (blocked navigation, post-save warnings) reach the host
//! through the session's [`WizardEvent`] channel.

mod controller;
mod events;
mod loader;
mod persist;
mod steps;
mod validation;

pub use controller::WorkflowController;
pub use events::{channel, EventReceiver, EventSender, WizardEvent};
pub use loader::load_for_edit;
pub use persist::{build_payload, save_artifact, PlanBody, SavePayload, WorkoutBody};
pub use steps::{sequence, StepDescriptor, StepId};
pub use validation::{check_step, StepCheck};
