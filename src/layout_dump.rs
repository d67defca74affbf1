use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::ir::Topology;
use crate::layout::Layout;
use crate::style::StyleCatalog;

/// Flat, serializable snapshot of a computed layout, consumed by the
/// CLI and handy for test snapshots.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub mode: String,
    pub nodes: Vec<NodeDump>,
    pub groups: Vec<GroupDump>,
    pub unconnected: Vec<String>,
    pub cycles: Vec<String>,
    pub unplaced: usize,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub shape: String,
    pub dx: f32,
    pub dy: f32,
}

#[derive(Debug, Serialize)]
pub struct GroupDump {
    pub index: usize,
    pub nodes: Vec<String>,
    pub roots: Vec<String>,
    pub leaves: Vec<String>,
    pub rows: Vec<RowDump>,
    pub columns: usize,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct RowDump {
    pub nodes: Vec<String>,
    pub split: bool,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, topology: &Topology, catalog: &StyleCatalog) -> Self {
        // Input order, skipping ids the layout never placed.
        let nodes = topology
            .nodes
            .iter()
            .filter_map(|node| {
                layout.offsets.get(node.id.as_str()).map(|offset| NodeDump {
                    id: node.id.clone(),
                    kind: node.kind.clone(),
                    shape: catalog.shape_for(&node.kind).to_string(),
                    dx: offset.dx,
                    dy: offset.dy,
                })
            })
            .collect();

        let groups = layout
            .groups
            .iter()
            .enumerate()
            .map(|(idx, group)| GroupDump {
                index: idx,
                nodes: group.nodes.clone(),
                roots: group.roots.clone(),
                leaves: group.leaves.clone(),
                rows: group
                    .rows
                    .iter()
                    .map(|row| RowDump {
                        nodes: row.nodes.clone(),
                        split: row.split,
                    })
                    .collect(),
                columns: group.columns,
                width: group.width,
                height: group.height,
            })
            .collect();

        LayoutDump {
            mode: layout.mode.as_str().to_string(),
            nodes,
            groups,
            unconnected: layout.unconnected.clone(),
            cycles: layout.cycles.clone(),
            unplaced: layout.unplaced,
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    layout: &Layout,
    topology: &Topology,
    catalog: &StyleCatalog,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, topology, catalog);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
