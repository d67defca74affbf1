use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::ir::ResourceNode;

use super::partition::Partition;
use super::sort::sort_row;
use super::types::{ConnectedGroup, Row};

/// Hard cap on breadth-first passes per group. Cyclic or adversarial
/// graphs degrade to a best-effort layout instead of looping.
pub(super) const MAX_PASSES: usize = 10;

/// Per-node connectivity attached for the duration of one layout call.
/// Kept in a side map so the caller's node objects are never touched.
#[derive(Debug, Clone, Default)]
pub(super) struct NodeMeta {
    pub incoming: Vec<String>,
    pub outgoing: Vec<String>,
    pub cycle: bool,
}

/// Build the deduplicated incoming/outgoing lists for every node, from
/// the partition's adjacency indices. First-seen order is preserved.
pub(super) fn build_meta(
    nodes: &[ResourceNode],
    part: &Partition,
) -> HashMap<String, NodeMeta> {
    let mut meta: HashMap<String, NodeMeta> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        let mut entry = NodeMeta::default();
        if let Some(ends) = part.incoming.get(node.id.as_str()) {
            let mut seen = HashSet::new();
            for end in ends {
                if seen.insert(end.other.as_str()) {
                    entry.incoming.push(end.other.clone());
                }
            }
        }
        if let Some(ends) = part.outgoing.get(node.id.as_str()) {
            let mut seen = HashSet::new();
            for end in ends {
                if seen.insert(end.other.as_str()) {
                    entry.outgoing.push(end.other.clone());
                }
            }
        }
        meta.insert(node.id.clone(), entry);
    }
    meta
}

/// Remove `ids` from every incoming/outgoing list so the row sweep
/// never sees them. Used for paired nodes placed beside their parent.
pub(super) fn strip_from_meta(meta: &mut HashMap<String, NodeMeta>, ids: &HashSet<String>) {
    for entry in meta.values_mut() {
        entry.incoming.retain(|id| !ids.contains(id));
        entry.outgoing.retain(|id| !ids.contains(id));
    }
}

/// Breadth-first sweep of one connected group: fills `roots`, `leaves`,
/// `rows` and `columns`, marks cycle participants in `meta`, and
/// returns how many members never received a row within the pass cap.
pub(super) fn build_rows(
    group: &mut ConnectedGroup,
    meta: &mut HashMap<String, NodeMeta>,
    nodes_by_id: &HashMap<&str, &ResourceNode>,
    excluded: &HashSet<String>,
    config: &LayoutConfig,
) -> usize {
    for id in &group.nodes {
        if excluded.contains(id) {
            continue;
        }
        let Some(entry) = meta.get(id.as_str()) else {
            continue;
        };
        if entry.incoming.is_empty() {
            group.roots.push(id.clone());
        }
        if entry.outgoing.is_empty() {
            group.leaves.push(id.clone());
        }
    }

    let mut pending: HashSet<String> = group
        .nodes
        .iter()
        .filter(|id| !excluded.contains(*id))
        .cloned()
        .collect();
    for root in &group.roots {
        pending.remove(root);
    }

    let mut frontier = group.roots.clone();
    // Parents of the row about to be stored: the previous unchunked
    // frontier, not whatever chunks it was stored as.
    let mut parents: Vec<String> = Vec::new();
    let mut passes = 0;
    while !frontier.is_empty() && !pending.is_empty() && passes < MAX_PASSES {
        // Next frontier: dedup union of outgoing across the current one,
        // restricted to ids still waiting for a row.
        let mut seen: HashSet<String> = HashSet::new();
        let mut next: Vec<String> = Vec::new();
        for id in &frontier {
            if let Some(entry) = meta.get(id.as_str()) {
                for out in &entry.outgoing {
                    if pending.contains(out) && seen.insert(out.clone()) {
                        pending.remove(out);
                        next.push(out.clone());
                    }
                }
            }
        }
        // The row list lags the frontier by one step, so the first
        // stored row is always the roots.
        push_row(group, frontier.clone(), &parents, meta, nodes_by_id, config);
        parents = frontier;
        frontier = next;
        passes += 1;
    }

    if !frontier.is_empty() {
        push_row(group, frontier.clone(), &parents, meta, nodes_by_id, config);
    }

    if !pending.is_empty() {
        // Pass budget exhausted: flag the final row's outgoing
        // neighbors as cycle participants. Best effort, not a full
        // cycle detector.
        for id in &frontier {
            let outgoing = meta
                .get(id.as_str())
                .map(|entry| entry.outgoing.clone())
                .unwrap_or_default();
            for out in outgoing {
                if let Some(entry) = meta.get_mut(out.as_str()) {
                    entry.cycle = true;
                }
            }
        }
    }

    group.columns = group
        .rows
        .iter()
        .map(|row| row.nodes.len())
        .max()
        .unwrap_or(0);

    pending.len()
}

/// Store a frontier as one row, splitting it into `split` chunks when
/// it exceeds the column budget. Traversal is unaffected: the caller
/// keeps sweeping from the unchunked frontier.
fn push_row(
    group: &mut ConnectedGroup,
    nodes: Vec<String>,
    parents: &[String],
    meta: &HashMap<String, NodeMeta>,
    nodes_by_id: &HashMap<&str, &ResourceNode>,
    config: &LayoutConfig,
) {
    if nodes.len() <= config.max_columns {
        group
            .rows
            .push(Row::new(nodes, parents.to_vec(), false));
        return;
    }
    let sorted = sort_row(&nodes, parents, meta, nodes_by_id, config);
    for chunk in sorted.chunks(config.chunk_size()) {
        group
            .rows
            .push(Row::new(chunk.to_vec(), parents.to_vec(), true));
    }
}
