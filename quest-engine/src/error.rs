use crate::graph::NodeId;

/// Errors raised while building a mansion or its suspect index.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuestError {
    #[error("Duplicate location name: {name}")]
    DuplicateLocation { name: String },
    #[error("Unknown location: {name}")]
    UnknownLocation { name: String },
    #[error("Unknown node id: {id}")]
    UnknownNode { id: NodeId },
    #[error("Location '{parent}' already has a {side} child")]
    SlotOccupied { parent: String, side: &'static str },
    #[error("Location '{child}' cannot be attached under '{parent}': {reason}")]
    InvalidLink {
        parent: String,
        child: String,
        reason: &'static str,
    },
    #[error("Location '{name}' is not reachable from the root")]
    Unreachable { name: String },
    #[error("Mansion has no locations")]
    EmptyMansion,
    #[error("Suspect index needs at least one bucket")]
    ZeroBuckets,
}
