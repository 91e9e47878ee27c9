//! Government organization hierarchy: units, levels and the tree view.

pub mod client;
pub mod tree;
pub mod unit;

pub use client::{OrgClient, OrgOverview, OrgStats, Position, SubFetch, TreeView};
pub use tree::{INDENT_STEP, TreeRow, TreeStats, build_forest, count_nodes, render_rows};
pub use unit::{BadgeColor, OrgLevel, OrgUnit, OrgUnitId, level_color};
