use std::collections::BTreeMap;

use crate::ir::ResourceLink;

use super::types::{LayoutMode, Offset};

/// Seam for an optional physics-based refinement pass. Implementations
/// receive positions already seeded by the tree placement and may only
/// nudge them; they never derive positions from scratch. The default
/// `NoRefine` leaves the static placement untouched, which is always a
/// complete, renderable result.
pub trait PositionRefiner {
    fn refine(&self, offsets: &mut BTreeMap<String, Offset>, links: &[ResourceLink]);
}

/// The pure tree layout: no refinement at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRefine;

impl PositionRefiner for NoRefine {
    fn refine(&self, _offsets: &mut BTreeMap<String, Offset>, _links: &[ResourceLink]) {}
}

/// Pick the layout mode: once more than one paired node had to be
/// placed outside the tree, the renderer is asked to run a force pass
/// over the seeded positions to resolve residual overlap.
pub(super) fn select_mode(paired_placed: usize) -> LayoutMode {
    if paired_placed > 1 {
        LayoutMode::ColaTree
    } else {
        LayoutMode::Tree
    }
}
