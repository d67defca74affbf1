mod coords;
mod partition;
mod refine;
mod rows;
mod sort;
pub(crate) mod types;

pub use refine::{NoRefine, PositionRefiner};
pub use types::*;

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::ir::{ResourceNode, Topology};

use coords::{assign_coordinates, place_paired};
use partition::partition;
use refine::select_mode;
use rows::{build_meta, build_rows, strip_from_meta};
use sort::sort_row;

/// Compute a tree layout with the pure static placement (no force
/// refinement). The input topology is never mutated; all derived state
/// lives in side maps owned by this call.
pub fn compute_layout(topology: &Topology, config: &LayoutConfig) -> Layout {
    compute_layout_with(topology, config, &NoRefine)
}

/// Compute a tree layout, handing the seeded positions to `refiner`
/// when the paired-node count pushes the result into cola mode.
pub fn compute_layout_with(
    topology: &Topology,
    config: &LayoutConfig,
    refiner: &dyn PositionRefiner,
) -> Layout {
    let part = partition(&topology.nodes, &topology.links);
    let mut meta = build_meta(&topology.nodes, &part);
    let nodes_by_id: HashMap<&str, &ResourceNode> = topology
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();

    // Paired nodes leave the tree before the row sweep ever sees them;
    // they are placed beside their parent after the tree is done.
    let paired = collect_paired(topology, &meta, &nodes_by_id, config);
    let excluded: HashSet<String> = paired.iter().map(|(child, _)| child.clone()).collect();
    if !excluded.is_empty() {
        strip_from_meta(&mut meta, &excluded);
    }

    let mut offsets: BTreeMap<String, Offset> = BTreeMap::new();
    let mut groups: Vec<ConnectedGroup> = Vec::new();
    let mut unplaced = 0;

    for members in &part.groups {
        let mut group = ConnectedGroup {
            nodes: members.clone(),
            ..Default::default()
        };
        unplaced += build_rows(&mut group, &mut meta, &nodes_by_id, &excluded, config);
        for row in &mut group.rows {
            // Chunked rows were sorted before splitting; the roots row
            // has no parents to sort against.
            if !row.split && !row.parents.is_empty() {
                row.nodes = sort_row(&row.nodes, &row.parents, &meta, &nodes_by_id, config);
            }
        }
        assign_coordinates(&mut group, &meta, config, &mut offsets);
        groups.push(group);
    }

    let paired_placed = place_paired(&paired, config, &mut offsets);
    let mode = select_mode(paired_placed);
    if mode == LayoutMode::ColaTree {
        refiner.refine(&mut offsets, &topology.links);
    }

    let cycles: Vec<String> = topology
        .nodes
        .iter()
        .filter(|node| {
            meta.get(node.id.as_str())
                .is_some_and(|entry| entry.cycle)
        })
        .map(|node| node.id.clone())
        .collect();

    Layout {
        mode,
        offsets,
        groups,
        unconnected: part.unconnected,
        cycles,
        unplaced,
    }
}

/// Children of the configured `placeWith` type that hang off exactly
/// one parent of the configured parent type, in input order.
fn collect_paired(
    topology: &Topology,
    meta: &HashMap<String, rows::NodeMeta>,
    nodes_by_id: &HashMap<&str, &ResourceNode>,
    config: &LayoutConfig,
) -> Vec<(String, String)> {
    let Some(place) = &config.place_with else {
        return Vec::new();
    };
    let mut paired = Vec::new();
    for node in &topology.nodes {
        if node.kind != place.child_type {
            continue;
        }
        let Some(entry) = meta.get(node.id.as_str()) else {
            continue;
        };
        let [parent] = entry.incoming.as_slice() else {
            continue;
        };
        let parent_matches = nodes_by_id
            .get(parent.as_str())
            .is_some_and(|parent_node| parent_node.kind == place.parent_type);
        if parent_matches {
            paired.push((node.id.clone(), parent.clone()));
        }
    }
    paired
}
