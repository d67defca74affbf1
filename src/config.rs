use std::path::Path;

use serde::{Deserialize, Serialize};

/// Designates a child resource type that is pulled out of the tree rows
/// and placed beside its single parent of the given type instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceWith {
    pub parent_type: String,
    pub child_type: String,
}

/// Layout options. Field names match the option object the surrounding
/// console passes in, so config files deserialize directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub x_spacer: f32,
    pub y_spacer: f32,
    pub max_columns: usize,
    pub place_with: Option<PlaceWith>,
    pub sort_rows_by: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 65.0,
            node_height: 65.0,
            x_spacer: 70.0,
            y_spacer: 60.0,
            max_columns: 16,
            place_with: None,
            sort_rows_by: Vec::new(),
        }
    }
}

impl LayoutConfig {
    /// Chunk size used when an oversized row is split: deliberately
    /// smaller than `max_columns` to leave margin for centering.
    pub fn chunk_size(&self) -> usize {
        (self.max_columns * 5 / 6).max(1)
    }

    /// Horizontal advance from one column to the next.
    pub fn x_step(&self) -> f32 {
        self.node_width + self.x_spacer
    }

    /// Vertical advance from one row to the next.
    pub fn y_step(&self) -> f32 {
        self.node_height + self.y_spacer
    }
}

/// Load layout options from a JSON file, falling back to JSON5 so the
/// hand-edited config files the console ships (with comments and
/// trailing commas) keep working. No path means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    match serde_json::from_str(&contents) {
        Ok(config) => Ok(config),
        Err(json_err) => match json5::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(_) => Err(json_err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_console_spacing() {
        let config = LayoutConfig::default();
        assert_eq!(config.node_width, 65.0);
        assert_eq!(config.y_spacer, 60.0);
        assert_eq!(config.max_columns, 16);
        assert_eq!(config.chunk_size(), 13);
    }

    #[test]
    fn camel_case_options_deserialize() {
        let config: LayoutConfig = serde_json::from_str(
            r#"{"maxColumns":8,"placeWith":{"parentType":"subscription","childType":"placements"}}"#,
        )
        .unwrap();
        assert_eq!(config.max_columns, 8);
        assert_eq!(config.chunk_size(), 6);
        let place = config.place_with.unwrap();
        assert_eq!(place.parent_type, "subscription");
        assert_eq!(place.child_type, "placements");
    }
}
