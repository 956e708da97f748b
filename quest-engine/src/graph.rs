use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::QuestError;

/// Index of a location inside a [`LocationGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocationNode {
    pub name: String,
    /// Empty when the room holds nothing.
    pub clue: String,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

/// Binary tree of rooms stored as an arena. The first node created is the
/// root; every other node gets exactly one parent through `attach_*`.
#[derive(Debug, Clone, Default)]
pub struct LocationGraph {
    nodes: Vec<LocationNode>,
    by_name: HashMap<String, NodeId>,
}

impl LocationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_node(
        &mut self,
        name: impl Into<String>,
        clue: impl Into<String>,
    ) -> Result<NodeId, QuestError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(QuestError::DuplicateLocation { name });
        }

        let id = NodeId(self.nodes.len());
        self.by_name.insert(name.clone(), id);
        self.nodes.push(LocationNode {
            name,
            clue: clue.into(),
            left: None,
            right: None,
            parent: None,
        });
        Ok(id)
    }

    pub fn attach_left(&mut self, parent: NodeId, child: NodeId) -> Result<(), QuestError> {
        self.attach(parent, child, Side::Left)
    }

    pub fn attach_right(&mut self, parent: NodeId, child: NodeId) -> Result<(), QuestError> {
        self.attach(parent, child, Side::Right)
    }

    pub fn attach(&mut self, parent: NodeId, child: NodeId, side: Side) -> Result<(), QuestError> {
        self.node(parent)?;
        self.node(child)?;

        let invalid = |graph: &Self, reason| QuestError::InvalidLink {
            parent: graph.nodes[parent.0].name.clone(),
            child: graph.nodes[child.0].name.clone(),
            reason,
        };

        if parent == child {
            return Err(invalid(self, "a room cannot lead to itself"));
        }
        if Some(child) == self.root() {
            return Err(invalid(self, "the root cannot have a parent"));
        }
        if self.nodes[child.0].parent.is_some() {
            return Err(invalid(self, "it already has a parent"));
        }
        if self.is_ancestor(child, parent) {
            return Err(invalid(self, "it would create a cycle"));
        }

        let slot = match side {
            Side::Left => &mut self.nodes[parent.0].left,
            Side::Right => &mut self.nodes[parent.0].right,
        };
        if slot.is_some() {
            return Err(QuestError::SlotOccupied {
                parent: self.nodes[parent.0].name.clone(),
                side: side.as_str(),
            });
        }
        *slot = Some(child);
        self.nodes[child.0].parent = Some(parent);

        debug!(
            parent = %self.nodes[parent.0].name,
            child = %self.nodes[child.0].name,
            side = side.as_str(),
            "attached room"
        );
        Ok(())
    }

    /// Walks parent links upwards from `node` looking for `candidate`.
    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    /// Checks that the graph is non-empty and every room hangs off the root.
    pub fn validate(&self) -> Result<(), QuestError> {
        if self.nodes.is_empty() {
            return Err(QuestError::EmptyMansion);
        }
        // Attach rejects cycles, so any non-root node with a parent reaches the root.
        for node in self.nodes.iter().skip(1) {
            if node.parent.is_none() {
                return Err(QuestError::Unreachable {
                    name: node.name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    pub fn node(&self, id: NodeId) -> Result<&LocationNode, QuestError> {
        self.nodes.get(id.0).ok_or(QuestError::UnknownNode { id })
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn clue(&self, id: NodeId) -> Option<&str> {
        let clue = self.nodes[id.0].clue.as_str();
        if clue.is_empty() {
            None
        } else {
            Some(clue)
        }
    }

    pub fn left_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].left
    }

    pub fn right_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].right
    }

    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left_of(id),
            Side::Right => self.right_of(id),
        }
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        node.left.is_none() && node.right.is_none()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rooms in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &LocationNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }
}
