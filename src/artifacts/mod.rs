//! Data structures and algorithms
//!
//! - `objects`: immutable object types (blob, commit) and their identifiers
//! - `graph`: commit-history traversal and split-point (LCA) discovery
//! - `merge`: three-way reconciliation table and conflict markers
//! - `sync`: working-tree synchronization against a commit's tree

pub mod graph;
pub mod merge;
pub mod objects;
pub mod sync;
