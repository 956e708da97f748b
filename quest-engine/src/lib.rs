//! Detective Quest engine.
//!
//! A mansion is a binary tree of rooms ([`LocationGraph`]). Walking it with an
//! [`ExplorationEngine`] drops the clues found along the way into a sorted
//! [`ClueStore`]; a [`SuspectIndex`] maps every clue to the suspect it points
//! at, and a [`VerdictEvaluator`] weighs the final accusation.

pub mod clue_store;
pub mod error;
pub mod explorer;
pub mod graph;
pub mod scenario;
pub mod suspect_index;
pub mod verdict;


pub use clue_store::ClueStore;
pub use error::QuestError;
pub use explorer::{
    Command, Directions, EngineState, ExplorationEngine, ExplorationSummary, LeafPolicy,
    StepEvent, StepReport,
};
pub use graph::{LocationGraph, NodeId, Side};
pub use scenario::Scenario;
pub use suspect_index::SuspectIndex;
pub use verdict::{count_clues_for_suspect, EvidenceLine, Judgement, Outcome, VerdictEvaluator};
