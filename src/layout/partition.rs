use std::collections::{HashMap, HashSet};

use crate::ir::{ResourceLink, ResourceNode};

/// One adjacency entry: the neighbor on the far end of a link, plus the
/// index of the owning link for traceability.
#[derive(Debug, Clone)]
pub(super) struct LinkEnd {
    pub other: String,
    pub link: usize,
}

/// Connectivity metadata for one layout call: connected groups in
/// discovery order, fully-disconnected nodes in input order, and the
/// two adjacency indices every later stage reads.
#[derive(Debug, Default)]
pub(super) struct Partition {
    /// Member ids per group, in input order. Groups themselves appear
    /// in the order their first member appears in the input.
    pub groups: Vec<Vec<String>>,
    pub unconnected: Vec<String>,
    /// Sources keyed by target id.
    pub incoming: HashMap<String, Vec<LinkEnd>>,
    /// Targets keyed by source id.
    pub outgoing: HashMap<String, Vec<LinkEnd>>,
}

/// Group nodes into connected components, ignoring edge direction.
/// Links whose source or target id is unknown are silently dropped.
pub(super) fn partition(nodes: &[ResourceNode], links: &[ResourceLink]) -> Partition {
    let known: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();

    let mut incoming: HashMap<String, Vec<LinkEnd>> = HashMap::new();
    let mut outgoing: HashMap<String, Vec<LinkEnd>> = HashMap::new();
    for (idx, link) in links.iter().enumerate() {
        if !known.contains(link.source.as_str()) || !known.contains(link.target.as_str()) {
            continue;
        }
        outgoing.entry(link.source.clone()).or_default().push(LinkEnd {
            other: link.target.clone(),
            link: idx,
        });
        incoming.entry(link.target.clone()).or_default().push(LinkEnd {
            other: link.source.clone(),
            link: idx,
        });
    }

    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut unconnected: Vec<String> = Vec::new();
    // Claims are global: a node joins exactly one group.
    let mut claimed: HashSet<String> = HashSet::new();

    for node in nodes {
        let id = node.id.as_str();
        let any_connected = incoming.contains_key(id) || outgoing.contains_key(id);
        if !any_connected {
            unconnected.push(id.to_string());
            continue;
        }
        if claimed.contains(id) {
            continue;
        }
        let mut absorbed: HashSet<String> = HashSet::new();
        let mut stack = vec![id.to_string()];
        claimed.insert(id.to_string());
        absorbed.insert(id.to_string());
        while let Some(current) = stack.pop() {
            for index in [&incoming, &outgoing] {
                if let Some(ends) = index.get(&current) {
                    for end in ends {
                        if claimed.insert(end.other.clone()) {
                            absorbed.insert(end.other.clone());
                            stack.push(end.other.clone());
                        }
                    }
                }
            }
        }
        // Store members in input order so every downstream tie-break is
        // stable across calls.
        let members: Vec<String> = nodes
            .iter()
            .filter(|node| absorbed.contains(node.id.as_str()))
            .map(|node| node.id.clone())
            .collect();
        groups.push(members);
    }

    Partition {
        groups,
        unconnected,
        incoming,
        outgoing,
    }
}
