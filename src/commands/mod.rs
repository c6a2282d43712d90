//! User command implementations
//!
//! One file per command, each extending `Repository`. The CLI layer
//! validates argument shape and dispatches here; every command reads the
//! references and index, consults the store and commit graph, drives the
//! synchronizer or merge engine, and finally writes updated objects and
//! references.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod global_log;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod rm_branch;
pub mod status;
