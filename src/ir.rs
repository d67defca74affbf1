use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// One displayed resource: an application, subscription, cluster,
/// deployment, pod, replicaset, route, service, placement rule, and so
/// on. The layout engine only interprets `id` and `type`; every other
/// field rides along untouched and is available to `sortRowsBy` keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ResourceNode {
    pub fn new(id: &str, kind: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Resolve a `sortRowsBy` property path against this node. `id` and
    /// `type` hit the fixed fields; anything else is a dot-separated
    /// path into the pass-through map.
    pub fn sort_value(&self, path: &str) -> Option<SortValue<'_>> {
        match path {
            "id" => return Some(SortValue::Str(&self.id)),
            "type" => return Some(SortValue::Str(&self.kind)),
            _ => {}
        }
        let mut parts = path.split('.');
        let mut current = self.extra.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        SortValue::from_json(current)
    }
}

/// A comparable view of one pass-through field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Str(&'a str),
    Num(f64),
}

impl<'a> SortValue<'a> {
    fn from_json(value: &'a serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(SortValue::Str(s)),
            serde_json::Value::Number(n) => n.as_f64().map(SortValue::Num),
            serde_json::Value::Bool(true) => Some(SortValue::Str("true")),
            serde_json::Value::Bool(false) => Some(SortValue::Str("false")),
            _ => None,
        }
    }

    pub fn compare(self, other: SortValue<'_>) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        match (self, other) {
            (SortValue::Num(a), SortValue::Num(b)) => {
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            (a, b) => a.as_text().cmp(&b.as_text()),
        }
    }

    fn as_text(self) -> String {
        match self {
            SortValue::Str(s) => s.to_string(),
            SortValue::Num(n) => n.to_string(),
        }
    }
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLink {
    pub source: String,
    pub target: String,
}

impl ResourceLink {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// The input graph for one layout call. Node order is significant: it
/// drives group discovery order and every tie-break downstream, which is
/// what makes repeated calls byte-identical.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub nodes: Vec<ResourceNode>,
    #[serde(default)]
    pub links: Vec<ResourceLink>,
}

#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("invalid topology JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate node id: {0}")]
    DuplicateId(String),
}

impl Topology {
    /// Parse a topology document, rejecting duplicate node ids. This is
    /// the only place the crate reports errors; the layout stages
    /// themselves never fail for well-typed input.
    pub fn from_json(input: &str) -> Result<Self, TopologyError> {
        let topology: Topology = serde_json::from_str(input)?;
        let mut seen: HashSet<&str> = HashSet::new();
        for node in &topology.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(TopologyError::DuplicateId(node.id.clone()));
            }
        }
        Ok(topology)
    }

    pub fn node_index(&self) -> BTreeMap<&str, &ResourceNode> {
        self.nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect()
    }
}
