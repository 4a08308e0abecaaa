//! Wizard error types.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for wizard operations.
pub type WizardResult<T> = Result<T, WizardError>;

/// Errors that can occur while driving the wizard.
///
/// Validation failures are deliberately *not* part of this taxonomy: an
/// incomplete step is a user-correctable condition modelled as a value
/// ([`StepCheck`](crate::wizard::StepCheck)), never as an error.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Loading an existing artifact for editing failed. Fatal to wizard
    /// entry: the caller must not open a half-populated session.
    #[error("failed to load artifact '{id}' for editing: {source}")]
    Load {
        id: String,
        #[source]
        source: StoreError,
    },

    /// No workout or training plan exists under the given id.
    #[error("no workout or training plan found with id '{0}'")]
    NotFound(String),

    /// The primary save call failed. Recoverable: the wizard stays on
    /// the last step with all accumulated state intact.
    #[error("failed to save artifact: {0}")]
    Save(#[source] StoreError),

    /// The template-list fetch for the template step failed.
    #[error("failed to fetch templates: {0}")]
    TemplateFetch(#[source] StoreError),

    /// An operation was invoked in a state that does not permit it
    /// (wrong container shape, save off the last step, unknown week).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Payload construction could not serialize block content.
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}
