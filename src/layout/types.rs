use std::collections::BTreeMap;

use serde::Serialize;

/// Displacement of one node from its group's center, in the same units
/// as the node/spacer dimensions in `LayoutConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
}

/// One breadth-first depth level within a connected group. `parents`
/// holds the frontier that produced this row (empty for the roots row);
/// chunks split out of an oversized row all share the same parents and
/// carry `split`.
#[derive(Debug, Clone)]
pub struct Row {
    pub nodes: Vec<String>,
    pub parents: Vec<String>,
    pub split: bool,
}

impl Row {
    pub(crate) fn new(nodes: Vec<String>, parents: Vec<String>, split: bool) -> Self {
        Self {
            nodes,
            parents,
            split,
        }
    }
}

/// Maximal set of nodes mutually reachable ignoring edge direction,
/// with its computed row structure and bounding box.
#[derive(Debug, Clone, Default)]
pub struct ConnectedGroup {
    pub nodes: Vec<String>,
    pub roots: Vec<String>,
    pub leaves: Vec<String>,
    pub rows: Vec<Row>,
    /// Width of the widest row after chunking, in node count.
    pub columns: usize,
    pub width: f32,
    pub height: f32,
}

/// Which placement strategy the renderer should run with. The static
/// tree placement is always complete; the cola variant asks the
/// rendering surface to layer a force-directed refinement pass on top
/// of the pre-seeded positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayoutMode {
    Tree,
    ColaTree,
}

impl LayoutMode {
    /// Tag string the consuming renderer keys on.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Tree => "TreeLayout",
            LayoutMode::ColaTree => "ColaTreeLayout",
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one layout call.
#[derive(Debug, Clone)]
pub struct Layout {
    pub mode: LayoutMode,
    /// Per-node displacement from the owning group's center. Nodes never
    /// placed (unconnected, or dropped by the pass cap) are absent;
    /// callers fall back to a default position for missing ids.
    pub offsets: BTreeMap<String, Offset>,
    pub groups: Vec<ConnectedGroup>,
    /// Nodes touched by no surviving link, in input order.
    pub unconnected: Vec<String>,
    /// Ids flagged as cycle participants by the breadth-first sweep.
    pub cycles: Vec<String>,
    /// Connected nodes that never received a row within the pass budget.
    pub unplaced: usize,
}
