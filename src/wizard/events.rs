//! Session event channel.
//!
//! User-visible notices flow through an explicit channel owned by the
//! wizard session instead of any ambient global: the host UI holds the
//! receiver and renders notices however it likes (toast, banner, log).

use serde::Serialize;
use tokio::sync::mpsc;

use super::steps::StepId;

/// A notice emitted by the wizard session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum WizardEvent {
    /// Forward navigation was blocked by a step predicate. Recoverable
    /// by editing current-step state.
    StepIncomplete { step: StepId, message: String },

    /// A best-effort side operation (athlete assignment, template
    /// flagging) failed after the primary artifact was committed.
    Warning { message: String },

    /// The save call failed. The wizard stays open on the last step
    /// with all accumulated state intact.
    SaveFailed { message: String },

    /// The artifact was committed under the given id.
    Saved { id: String },
}

/// Sending half held by the wizard session.
pub type EventSender = mpsc::UnboundedSender<WizardEvent>;

/// Receiving half held by the host UI.
pub type EventReceiver = mpsc::UnboundedReceiver<WizardEvent>;

/// Create a session event channel.
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = WizardEvent::StepIncomplete {
            step: StepId::Blocks,
            message: "add at least one block".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"step_incomplete\""));
        assert!(json.contains("\"blocks\""));
    }

    #[test]
    fn test_channel_delivery() {
        let (tx, mut rx) = channel();
        tx.send(WizardEvent::Saved { id: "w-1".to_string() }).unwrap();
        let event = rx.try_recv().unwrap();
        assert_eq!(event, WizardEvent::Saved { id: "w-1".to_string() });
    }
}
