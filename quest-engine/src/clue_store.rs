use std::cmp::Ordering;

#[derive(Debug)]
struct ClueNode {
    clue: String,
    left: Option<Box<ClueNode>>,
    right: Option<Box<ClueNode>>,
}

/// Unbalanced binary search tree of collected clues, ordered by byte-wise
/// comparison of the clue text. Keys are unique.
#[derive(Debug, Default)]
pub struct ClueStore {
    root: Option<Box<ClueNode>>,
    len: usize,
}

impl ClueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `clue`, returning `false` when it was already stored. A repeated
    /// insert leaves the tree untouched.
    pub fn insert(&mut self, clue: &str) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match clue.cmp(node.clue.as_str()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *slot = Some(Box::new(ClueNode {
            clue: clue.to_string(),
            left: None,
            right: None,
        }));
        self.len += 1;
        true
    }

    pub fn contains(&self, clue: &str) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match clue.cmp(node.clue.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Clues in ascending order. Each call starts a fresh walk from the root.
    pub fn iter(&self) -> InOrder<'_> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&ClueNode, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }
}

impl Drop for ClueStore {
    // A sorted insertion sequence degrades the tree into a list; release it
    // without recursing once per level.
    fn drop(&mut self) {
        let mut stack: Vec<Box<ClueNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<'a> IntoIterator for &'a ClueStore {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct InOrder<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.clue.as_str())
    }
}
