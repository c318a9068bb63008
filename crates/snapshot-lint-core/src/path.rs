//! The current root-to-node path of a traversal.

use crate::coordinate::Coordinate;
use std::collections::HashSet;
use std::fmt::Write;

/// Coordinates on the path from the root to the node being visited.
///
/// Descending pushes a coordinate, returning pops it, so sibling branches
/// never see each other's nodes. Membership checks are O(1); no set is copied
/// per call.
#[derive(Debug, Clone)]
pub struct TraversalPath {
    stack: Vec<Coordinate>,
    members: HashSet<Coordinate>,
}

impl TraversalPath {
    /// Starts a path at the root coordinate.
    #[must_use]
    pub fn new(root: Coordinate) -> Self {
        let mut members = HashSet::new();
        members.insert(root.clone());
        Self {
            stack: vec![root],
            members,
        }
    }

    /// True if the coordinate already appears on this path.
    #[must_use]
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.members.contains(coordinate)
    }

    /// Descends into `coordinate`.
    ///
    /// Callers check [`contains`](Self::contains) first; a coordinate is on
    /// the path at most once.
    pub fn push(&mut self, coordinate: Coordinate) {
        debug_assert!(!self.members.contains(&coordinate));
        self.members.insert(coordinate.clone());
        self.stack.push(coordinate);
    }

    /// Returns from the most recent descent. The root is never popped.
    pub fn pop(&mut self) -> Option<Coordinate> {
        if self.stack.len() <= 1 {
            return None;
        }
        let coordinate = self.stack.pop()?;
        self.members.remove(&coordinate);
        Some(coordinate)
    }

    /// Number of coordinates on the path, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True if the path holds no coordinates. [`pop`](Self::pop) never
    /// removes the root, so a path built by [`new`](Self::new) is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The deepest coordinate on the path.
    #[must_use]
    pub fn current(&self) -> &Coordinate {
        &self.stack[self.stack.len() - 1]
    }

    /// Coordinates from the root down to the current node.
    #[must_use]
    pub fn as_slice(&self) -> &[Coordinate] {
        &self.stack
    }

    /// Renders the path, optionally headed by `head`, as an indented tree.
    #[must_use]
    pub fn render(&self, head: Option<&Coordinate>) -> String {
        render_path(head, &self.stack)
    }
}

/// Renders a path as a top-down indented list.
///
/// The first line is `head` (or the deepest node of `trail` when there is no
/// head), indented one tab; every following line walks one step towards the
/// root and is indented one tab further than the line above.
#[must_use]
pub fn render_path(head: Option<&Coordinate>, trail: &[Coordinate]) -> String {
    let mut out = String::new();
    let lines = head.into_iter().chain(trail.iter().rev());
    for (depth, coordinate) in lines.enumerate() {
        if depth > 0 {
            out.push('\n');
        }
        for _ in 0..=depth {
            out.push('\t');
        }
        let _ = write!(out, "{coordinate}");
    }
    out
}
