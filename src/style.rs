use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CATALOG: Lazy<StyleCatalog> = Lazy::new(StyleCatalog::console_default);

/// Pure lookup data mapping resource types to node shapes and statuses
/// to status icons. The renderer consults this after layout; nothing in
/// the layout math depends on it. Kept as a value passed in by the
/// caller rather than a module-level singleton.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleCatalog {
    pub shapes: BTreeMap<String, String>,
    pub status_icons: BTreeMap<String, String>,
}

impl StyleCatalog {
    /// The shape and icon tables the multi-cluster console ships with.
    pub fn console_default() -> Self {
        let shapes = [
            ("application", "application"),
            ("cluster", "cluster"),
            ("clusters", "cluster"),
            ("deployable", "deployable"),
            ("deployment", "deployment"),
            ("helmrelease", "chart"),
            ("placements", "placements"),
            ("pod", "pod"),
            ("replicaset", "replicaset"),
            ("route", "route"),
            ("service", "service"),
            ("subscription", "subscription"),
        ];
        let status_icons = [
            ("success", "success"),
            ("error", "failure"),
            ("failure", "failure"),
            ("running", "running"),
            ("pending", "pending"),
            ("warning", "warning"),
        ];
        Self {
            shapes: shapes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            status_icons: status_icons
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn shape_for(&self, resource_type: &str) -> &str {
        self.shapes
            .get(resource_type)
            .map(String::as_str)
            .unwrap_or("other")
    }

    pub fn icon_for(&self, status: &str) -> Option<&str> {
        self.status_icons.get(status).map(String::as_str)
    }
}

/// Shared default catalog for callers that do not carry their own.
pub fn default_catalog() -> &'static StyleCatalog {
    &DEFAULT_CATALOG
}
