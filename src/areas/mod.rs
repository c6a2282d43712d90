//! Core repository components
//!
//! The fundamental building blocks of a repository:
//!
//! - `store`: content-addressed object database for blobs and commits
//! - `index`: staging and removal areas for pending changes
//! - `refs`: branch records and the active-branch pointer
//! - `repository`: the context value tying the areas together
//! - `workspace`: working-directory file system operations

pub mod index;
pub mod refs;
pub mod repository;
pub mod store;
pub mod workspace;
