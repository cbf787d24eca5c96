//! Team composition engine
//!
//! This module contains the composition data model and the rules that act
//! on it: the state store, slot compatibility checks, the resonance
//! evaluator and the mutation operations.

pub mod composition;
pub mod mutation;
pub mod resonance;
pub mod rules;
pub mod store;

pub use composition::{default_positions, Build, Composition, PositionKey, TEAM_SIZE};
pub use mutation::Mutation;
pub use resonance::{evaluate, ResonanceReport};
pub use rules::{can_accept, DockHighlight, DragItem, DropDescriptor, DropTarget};
pub use store::CompositionStore;

/// Composition errors
#[derive(Debug, thiserror::Error)]
pub enum CompError {
    #[error("Unknown position: {0}")]
    UnknownPosition(PositionKey),
    #[error("Invalid composition data: {0}")]
    InvalidData(#[from] serde_json::Error),
}
