use std::collections::{BTreeMap, HashMap};

use crate::config::LayoutConfig;

use super::rows::NodeMeta;
use super::types::{ConnectedGroup, Offset};

/// Vertical distance a paired node sits below its parent.
const PAIRED_NUDGE: f32 = 20.0;

/// Fill the offset map for one group: rows stacked top to bottom and
/// vertically centered, the widest row seeding horizontal placement,
/// ancestors centered over their children.
pub(super) fn assign_coordinates(
    group: &mut ConnectedGroup,
    meta: &HashMap<String, NodeMeta>,
    config: &LayoutConfig,
    offsets: &mut BTreeMap<String, Offset>,
) {
    let row_count = group.rows.len();
    if row_count == 0 {
        group.width = 0.0;
        group.height = 0.0;
        return;
    }

    group.height =
        row_count as f32 * config.node_height + (row_count - 1) as f32 * config.y_spacer;
    group.width = group.columns as f32 * config.node_width
        + group.columns.saturating_sub(1) as f32 * config.x_spacer;

    // Vertical: uniform spacing, the stack centered on the group. Each
    // offset is the node's center.
    let mut dy = -((row_count - 1) as f32 * config.y_step()) / 2.0;
    for row in &group.rows {
        for id in &row.nodes {
            offsets.insert(id.clone(), Offset { dx: 0.0, dy });
        }
        dy += config.y_step();
    }

    // Horizontal: seed from the widest row (earliest on ties), then
    // walk down toward the leaves and back up toward the roots.
    let widest = group
        .rows
        .iter()
        .enumerate()
        .max_by(|(ai, a), (bi, b)| {
            a.nodes
                .len()
                .cmp(&b.nodes.len())
                .then(bi.cmp(ai))
        })
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    for (idx, row) in group.rows.iter().enumerate().skip(widest) {
        let left = -((row.nodes.len() - 1) as f32 * config.x_step()) / 2.0;
        for (col, id) in row.nodes.iter().enumerate() {
            // Below the seeded row a 1:1 chain stays vertically aligned
            // with its parent instead of taking the evenly spaced slot.
            let inherited = if idx > widest {
                singleton_parent_dx(id, meta, offsets)
            } else {
                None
            };
            let dx = inherited.unwrap_or(left + config.x_step() * col as f32);
            if let Some(offset) = offsets.get_mut(id.as_str()) {
                offset.dx = dx;
            }
        }
    }

    for idx in (0..widest).rev() {
        let row = &group.rows[idx];
        let left = -((row.nodes.len() - 1) as f32 * config.x_step()) / 2.0;
        for (col, id) in row.nodes.iter().enumerate() {
            let dx = children_midpoint(id, meta, offsets)
                .unwrap_or(left + config.x_step() * col as f32);
            if let Some(offset) = offsets.get_mut(id.as_str()) {
                offset.dx = dx;
            }
        }
    }
}

/// The parent's dx, when this node has exactly one incoming neighbor
/// and that neighbor has exactly one outgoing neighbor.
fn singleton_parent_dx(
    id: &str,
    meta: &HashMap<String, NodeMeta>,
    offsets: &BTreeMap<String, Offset>,
) -> Option<f32> {
    let entry = meta.get(id)?;
    let [parent] = entry.incoming.as_slice() else {
        return None;
    };
    if meta.get(parent.as_str())?.outgoing.len() != 1 {
        return None;
    }
    offsets.get(parent.as_str()).map(|offset| offset.dx)
}

/// Midpoint of the min and max child dx. Children missing from the
/// offset map are skipped; with no placed child at all the caller falls
/// back to even spacing.
fn children_midpoint(
    id: &str,
    meta: &HashMap<String, NodeMeta>,
    offsets: &BTreeMap<String, Offset>,
) -> Option<f32> {
    let entry = meta.get(id)?;
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for child in &entry.outgoing {
        if let Some(offset) = offsets.get(child.as_str()) {
            min = min.min(offset.dx);
            max = max.max(offset.dx);
        }
    }
    if min > max {
        return None;
    }
    Some((min + max) / 2.0)
}

/// Place paired nodes beside their single parent: sorted by parent dx,
/// the first goes to the parent's left when more than one exists, the
/// rest to the right, all nudged just below the parent. Returns how
/// many were actually placed.
pub(super) fn place_paired(
    paired: &[(String, String)],
    config: &LayoutConfig,
    offsets: &mut BTreeMap<String, Offset>,
) -> usize {
    let mut placeable: Vec<(&str, Offset)> = paired
        .iter()
        .filter_map(|(child, parent)| {
            offsets
                .get(parent.as_str())
                .map(|offset| (child.as_str(), *offset))
        })
        .collect();
    placeable.sort_by(|a, b| {
        a.1.dx
            .partial_cmp(&b.1.dx)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let count = placeable.len();
    for (idx, (child, parent_offset)) in placeable.iter().enumerate() {
        let side = if idx == 0 && count > 1 { -1.0 } else { 1.0 };
        offsets.insert(
            child.to_string(),
            Offset {
                dx: parent_offset.dx + side * config.x_step(),
                dy: parent_offset.dy + PAIRED_NUDGE,
            },
        );
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Row;

    fn row(nodes: &[&str], parents: &[&str], split: bool) -> Row {
        Row::new(
            nodes.iter().map(|s| s.to_string()).collect(),
            parents.iter().map(|s| s.to_string()).collect(),
            split,
        )
    }

    fn meta_entry(incoming: &[&str], outgoing: &[&str]) -> NodeMeta {
        NodeMeta {
            incoming: incoming.iter().map(|s| s.to_string()).collect(),
            outgoing: outgoing.iter().map(|s| s.to_string()).collect(),
            cycle: false,
        }
    }

    fn assign(group: &mut ConnectedGroup, meta: &HashMap<String, NodeMeta>) -> BTreeMap<String, Offset> {
        let mut offsets = BTreeMap::new();
        assign_coordinates(group, meta, &LayoutConfig::default(), &mut offsets);
        offsets
    }

    #[test]
    fn single_column_chain_sits_on_the_axis() {
        let mut group = ConnectedGroup {
            nodes: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![row(&["a"], &[], false), row(&["b"], &["a"], false), row(&["c"], &["b"], false)],
            columns: 1,
            ..Default::default()
        };
        let mut meta = HashMap::new();
        meta.insert("a".to_string(), meta_entry(&[], &["b"]));
        meta.insert("b".to_string(), meta_entry(&["a"], &["c"]));
        meta.insert("c".to_string(), meta_entry(&["b"], &[]));

        let offsets = assign(&mut group, &meta);
        assert_eq!(offsets["a"].dx, 0.0);
        assert_eq!(offsets["b"].dx, 0.0);
        assert_eq!(offsets["c"].dx, 0.0);
        // rows advance by nodeHeight + ySpacer = 125, centered on 0
        assert_eq!(offsets["a"].dy, -125.0);
        assert_eq!(offsets["b"].dy, 0.0);
        assert_eq!(offsets["c"].dy, 125.0);
        assert_eq!(group.height, 315.0);
        assert_eq!(group.width, 65.0);
    }

    #[test]
    fn widest_row_is_symmetric_and_parent_is_centered_over_it() {
        // a -> b, a -> c
        let mut group = ConnectedGroup {
            nodes: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![row(&["a"], &[], false), row(&["b", "c"], &["a"], false)],
            columns: 2,
            ..Default::default()
        };
        let mut meta = HashMap::new();
        meta.insert("a".to_string(), meta_entry(&[], &["b", "c"]));
        meta.insert("b".to_string(), meta_entry(&["a"], &[]));
        meta.insert("c".to_string(), meta_entry(&["a"], &[]));

        let offsets = assign(&mut group, &meta);
        assert_eq!(offsets["b"].dx, -67.5);
        assert_eq!(offsets["c"].dx, 67.5);
        assert_eq!(offsets["b"].dx + offsets["c"].dx, 0.0);
        assert_eq!(offsets["a"].dx, 0.0);
    }

    #[test]
    fn singleton_chain_inherits_parent_dx_below_widest_row() {
        // root -> a, root -> b, a -> a1
        let mut group = ConnectedGroup {
            nodes: vec!["root".into(), "a".into(), "b".into(), "a1".into()],
            rows: vec![
                row(&["root"], &[], false),
                row(&["a", "b"], &["root"], false),
                row(&["a1"], &["a", "b"], false),
            ],
            columns: 2,
            ..Default::default()
        };
        let mut meta = HashMap::new();
        meta.insert("root".to_string(), meta_entry(&[], &["a", "b"]));
        meta.insert("a".to_string(), meta_entry(&["root"], &["a1"]));
        meta.insert("b".to_string(), meta_entry(&["root"], &[]));
        meta.insert("a1".to_string(), meta_entry(&["a"], &[]));

        let offsets = assign(&mut group, &meta);
        assert_eq!(offsets["a"].dx, -67.5);
        // a1 aligns under a, not the evenly spaced slot at 0
        assert_eq!(offsets["a1"].dx, -67.5);
    }

    #[test]
    fn paired_nodes_flank_their_parent() {
        let config = LayoutConfig::default();
        let mut offsets = BTreeMap::new();
        offsets.insert("sub".to_string(), Offset { dx: 10.0, dy: -50.0 });
        let paired = vec![
            ("rule1".to_string(), "sub".to_string()),
            ("rule2".to_string(), "sub".to_string()),
        ];
        let placed = place_paired(&paired, &config, &mut offsets);
        assert_eq!(placed, 2);
        assert_eq!(offsets["rule1"].dx, 10.0 - 135.0);
        assert_eq!(offsets["rule2"].dx, 10.0 + 135.0);
        assert_eq!(offsets["rule1"].dy, -30.0);
        assert_eq!(offsets["rule2"].dy, -30.0);
    }

    #[test]
    fn lone_paired_node_goes_right_of_its_parent() {
        let config = LayoutConfig::default();
        let mut offsets = BTreeMap::new();
        offsets.insert("sub".to_string(), Offset { dx: 0.0, dy: 0.0 });
        let paired = vec![("rule".to_string(), "sub".to_string())];
        assert_eq!(place_paired(&paired, &config, &mut offsets), 1);
        assert_eq!(offsets["rule"].dx, 135.0);
        assert_eq!(offsets["rule"].dy, 20.0);
    }

    #[test]
    fn paired_node_with_unplaced_parent_is_skipped() {
        let config = LayoutConfig::default();
        let mut offsets = BTreeMap::new();
        let paired = vec![("rule".to_string(), "ghost".to_string())];
        assert_eq!(place_paired(&paired, &config, &mut offsets), 0);
        assert!(!offsets.contains_key("rule"));
    }
}
