#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod style;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{LayoutConfig, PlaceWith, load_config};
pub use ir::{ResourceLink, ResourceNode, Topology, TopologyError};
pub use layout::{
    ConnectedGroup, Layout, LayoutMode, NoRefine, Offset, PositionRefiner, Row, compute_layout,
    compute_layout_with,
};
pub use style::{StyleCatalog, default_catalog};
