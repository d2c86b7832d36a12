//! Device shadow: twin document types, store client, and the intent-to-shadow
//! mediator.

pub mod document;
pub mod mediator;
pub mod store;

pub use document::{Actuator, DesiredPatch, ShadowDocument, StateBlock};
pub use mediator::{ConfirmedWrite, FailureReason, Mediator, MediatorResult, StateKind};
pub use store::{HttpShadowStore, ShadowStore};
