#[path = "org/overview.rs"]
mod overview;
#[path = "org/tree.rs"]
mod tree;
