use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clue_store::ClueStore;
use crate::error::QuestError;
use crate::graph::{LocationGraph, NodeId, Side};

/// What happens when the detective walks into a room with no way forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeafPolicy {
    /// The dead end is reported and the caller must still send `Exit`.
    #[default]
    RequireExit,
    /// Exploration finishes as soon as a leaf is entered.
    AutoStop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Exit,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineState {
    AtLocation,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Entered,
    Blocked(Side),
    InvalidCommand,
    Finished,
    /// A command arrived after exploration was over.
    AlreadyFinished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub exit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub event: StepEvent,
    pub state: EngineState,
    pub location: String,
    pub is_leaf: bool,
    pub directions: Directions,
    /// Clue picked up on this step, if the step entered a room holding one.
    pub clue: Option<String>,
    /// Whether `clue` was not yet in the store.
    pub new_clue: bool,
    pub clues_found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorationSummary {
    pub stopped_at: String,
    pub path: Vec<String>,
    pub clues_found: usize,
    pub distinct_clues: usize,
}

/// Walks a [`LocationGraph`] one command at a time, dropping every clue it
/// comes across into the borrowed [`ClueStore`].
pub struct ExplorationEngine<'a> {
    graph: &'a LocationGraph,
    store: &'a mut ClueStore,
    policy: LeafPolicy,
    current: NodeId,
    state: EngineState,
    clues_found: usize,
    path: Vec<NodeId>,
}

impl<'a> ExplorationEngine<'a> {
    /// Places the detective at the root and returns the report for entering it.
    pub fn start(
        graph: &'a LocationGraph,
        store: &'a mut ClueStore,
        policy: LeafPolicy,
    ) -> Result<(Self, StepReport), QuestError> {
        let root = graph.root().ok_or(QuestError::EmptyMansion)?;
        let mut engine = Self {
            graph,
            store,
            policy,
            current: root,
            state: EngineState::AtLocation,
            clues_found: 0,
            path: Vec::new(),
        };
        let report = engine.enter(root);
        Ok((engine, report))
    }

    pub fn step(&mut self, command: Command) -> StepReport {
        if self.state == EngineState::Finished {
            return self.report(StepEvent::AlreadyFinished, None, false);
        }

        match command {
            Command::Left => self.walk(Side::Left),
            Command::Right => self.walk(Side::Right),
            Command::Exit => {
                info!(location = %self.graph.name(self.current), "exploration ended by exit");
                self.state = EngineState::Finished;
                self.report(StepEvent::Finished, None, false)
            }
            Command::Invalid => {
                debug!("invalid command ignored");
                self.report(StepEvent::InvalidCommand, None, false)
            }
        }
    }

    /// Feeds commands until they run out or exploration finishes.
    pub fn run<I>(&mut self, commands: I) -> Vec<StepReport>
    where
        I: IntoIterator<Item = Command>,
    {
        let mut reports = Vec::new();
        for command in commands {
            if self.is_finished() {
                break;
            }
            reports.push(self.step(command));
        }
        reports
    }

    fn walk(&mut self, side: Side) -> StepReport {
        match self.graph.child(self.current, side) {
            Some(next) => self.enter(next),
            None => {
                debug!(location = %self.graph.name(self.current), ?side, "path blocked");
                self.report(StepEvent::Blocked(side), None, false)
            }
        }
    }

    fn enter(&mut self, id: NodeId) -> StepReport {
        self.current = id;
        self.path.push(id);
        info!(location = %self.graph.name(id), "entered room");

        let mut found = None;
        let mut new_clue = false;
        if let Some(clue) = self.graph.clue(id) {
            new_clue = self.store.insert(clue);
            self.clues_found += 1;
            debug!(%clue, new_clue, total = self.clues_found, "clue collected");
            found = Some(clue.to_string());
        }

        if self.policy == LeafPolicy::AutoStop && self.graph.is_leaf(id) {
            info!(location = %self.graph.name(id), "dead end reached, stopping");
            self.state = EngineState::Finished;
        }
        self.report(StepEvent::Entered, found, new_clue)
    }

    fn report(&self, event: StepEvent, clue: Option<String>, new_clue: bool) -> StepReport {
        let at_location = self.state == EngineState::AtLocation;
        StepReport {
            event,
            state: self.state,
            location: self.graph.name(self.current).to_string(),
            is_leaf: self.graph.is_leaf(self.current),
            directions: Directions {
                left: at_location && self.graph.left_of(self.current).is_some(),
                right: at_location && self.graph.right_of(self.current).is_some(),
                exit: at_location,
            },
            clue,
            new_clue,
            clues_found: self.clues_found,
        }
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == EngineState::Finished
    }

    pub fn clues_found(&self) -> usize {
        self.clues_found
    }

    pub fn summary(&self) -> ExplorationSummary {
        ExplorationSummary {
            stopped_at: self.graph.name(self.current).to_string(),
            path: self
                .path
                .iter()
                .map(|&id| self.graph.name(id).to_string())
                .collect(),
            clues_found: self.clues_found,
            distinct_clues: self.store.len(),
        }
    }
}
