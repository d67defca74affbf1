use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::ir::ResourceNode;

use super::rows::NodeMeta;

/// Reorder one row so each parent's children sit together, terminal
/// nodes flank continuing ones, and branches end up visually centered.
/// The roots row (no parents) is left untouched. Returns a new ordering;
/// the input row is not mutated.
pub(super) fn sort_row(
    row: &[String],
    parents: &[String],
    meta: &HashMap<String, NodeMeta>,
    nodes_by_id: &HashMap<&str, &ResourceNode>,
    config: &LayoutConfig,
) -> Vec<String> {
    if parents.is_empty() {
        return row.to_vec();
    }
    let members: HashSet<&str> = row.iter().map(String::as_str).collect();

    let mut out: Vec<String> = Vec::with_capacity(row.len());
    // A node reachable from two parents lands in the first parent's
    // segment only.
    let mut taken: HashSet<String> = HashSet::new();

    for parent in parents {
        let Some(parent_meta) = meta.get(parent.as_str()) else {
            continue;
        };
        let mut ends_here: Vec<String> = Vec::new();
        let mut continues_on: Vec<String> = Vec::new();
        for child in &parent_meta.outgoing {
            if !members.contains(child.as_str()) {
                continue;
            }
            let continues = meta
                .get(child.as_str())
                .is_some_and(|entry| !entry.outgoing.is_empty());
            if continues {
                continues_on.push(child.clone());
            } else {
                ends_here.push(child.clone());
            }
        }
        if ends_here.is_empty() && continues_on.is_empty() {
            continue;
        }

        if !config.sort_rows_by.is_empty() {
            sort_by_keys(&mut ends_here, &config.sort_rows_by, nodes_by_id);
            sort_by_keys(&mut continues_on, &config.sort_rows_by, nodes_by_id);
        }

        let insert_at = continues_insertion_index(
            row.len(),
            ends_here.len(),
            continues_on.len(),
            config,
        );
        let mut segment = ends_here;
        segment.splice(insert_at..insert_at, continues_on);

        for id in segment {
            if taken.insert(id.clone()) {
                out.push(id);
            }
        }
    }

    // Anything no parent accounted for keeps its original position at
    // the end, so the result stays a permutation of the input row.
    for id in row {
        if !taken.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

/// Where continuing nodes get re-inserted among terminal ones. Normally
/// the middle of the segment; when the full row will be chunked, shift
/// the insertion point so the continuing nodes land centered within the
/// last chunk instead.
fn continues_insertion_index(
    row_len: usize,
    ends_len: usize,
    continues_len: usize,
    config: &LayoutConfig,
) -> usize {
    if row_len <= config.max_columns {
        return ends_len / 2;
    }
    let chunk = config.chunk_size();
    let rem = row_len % chunk;
    let last_chunk = if rem == 0 { chunk } else { rem };
    let idx = ends_len as isize - (last_chunk as isize - continues_len as isize) / 2;
    if idx < 0 {
        ends_len
    } else {
        (idx as usize).min(ends_len)
    }
}

/// Stable multi-key sort: try each property path in order, first
/// non-equal comparison wins, a present value outranks an absent one.
fn sort_by_keys(
    ids: &mut [String],
    keys: &[String],
    nodes_by_id: &HashMap<&str, &ResourceNode>,
) {
    ids.sort_by(|a, b| {
        let node_a = nodes_by_id.get(a.as_str());
        let node_b = nodes_by_id.get(b.as_str());
        for key in keys {
            let value_a = node_a.and_then(|node| node.sort_value(key));
            let value_b = node_b.and_then(|node| node.sort_value(key));
            let ordering = match (value_a, value_b) {
                (Some(a), Some(b)) => a.compare(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}
