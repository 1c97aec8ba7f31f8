//! The workflow graph editor.
//!
//! The editor is a pure reducer over an immutable [`EditorState`]: every
//! pointer, keyboard or command event is folded into the state by
//! [`reduce`], which reports what happened as an [`Outcome`]. The
//! [`GraphController`] wraps the reducer with the node catalog and the
//! save/execute [`Submitter`], which talks to the external persistence and
//! execution collaborators.

pub mod collaborator;
pub mod controller;
pub mod error;
pub mod event;
pub mod reducer;
pub mod state;
pub mod submit;

#[cfg(test)]
mod testing;

pub use collaborator::{RunReceipt, SaveReceipt, WorkflowRunner, WorkflowStore};
pub use controller::GraphController;
pub use error::{CollaboratorError, EditorError, Operation, ValidationError};
pub use event::{EditorEvent, PointerTarget};
pub use reducer::{Outcome, Rejection, Transition, reduce};
pub use state::{EditorState, InteractionMode, PickerState};
pub use submit::{Submitter, validate_for_save};
