//! # Planforge
//!
//! Wizard core for assembling training artifacts: a single workout, a
//! weekly plan, or a four-to-six-week monthly plan, built through a
//! guided multi-step flow and persisted in one of three distinct
//! shapes.
//!
//! The crate owns the workflow logic only. Rendering, routing and the
//! concrete backend live in the host application; persistence is
//! reached through the [`store::TrainingStore`] trait.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use planforge::model::ArtifactType;
//! use planforge::store::MemoryStore;
//! use planforge::wizard::WorkflowController;
//!
//! # async fn demo() -> Result<(), planforge::WizardError> {
//! let store = Arc::new(MemoryStore::new());
//! let (mut wizard, mut events) = WorkflowController::new(ArtifactType::Single, store);
//!
//! wizard.choose_template();
//! wizard.next();
//! // ... step sub-views mutate state through the controller ...
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod model;
pub mod store;
pub mod wizard;

pub use error::{WizardError, WizardResult};
pub use model::{ArtifactMeta, ArtifactType, Block, Exercise, WorkflowState};
pub use wizard::{WizardEvent, WorkflowController};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
