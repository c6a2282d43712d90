//! Commit object
//!
//! A commit is an immutable snapshot: the complete mapping of tracked
//! filenames to blob hashes, the files removed by this commit, ancestry
//! links, a timestamp and a message. The root commit has no parent and a
//! fixed epoch timestamp so every fresh repository starts bit-identical.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! timestamp <unix-seconds>
//! parent <sha>            (absent for the root commit)
//! merge-parent <sha>      (present only for merge commits)
//! tracked <sha> <filename>
//! removed <sha> <filename>
//!
//! <commit message>
//! ```
//!
//! ## Identity
//!
//! `sha1(display timestamp, message, first parent or " ", branch name)` —
//! the branch is a hash input so two branches committing the same message at
//! the same instant still produce distinct ids.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::{Packable, Unpackable, sha1_id};
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Message carried by the root commit of every repository
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Mapping from filename to blob hash
pub type Tree = BTreeMap<String, ObjectId>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<Utc>,
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
    tree: Tree,
    removed: Tree,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<Utc>,
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
        tree: Tree,
        removed: Tree,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parent,
            merge_parent,
            tree,
            removed,
        }
    }

    /// The deterministic root commit shared by every fresh repository
    pub fn root() -> Self {
        let epoch = DateTime::from_timestamp(0, 0).unwrap_or_default();
        Commit::new(
            ROOT_COMMIT_MESSAGE.to_string(),
            epoch,
            None,
            None,
            Tree::new(),
            Tree::new(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    /// Both parent edges, first parent first
    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.merge_parent.iter())
            .cloned()
            .collect()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn removed(&self) -> &Tree {
        &self.removed
    }

    /// Timestamp in the human-readable log format
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %d %H:%M:%S %Y %z").to_string()
    }

    /// Compute this commit's id as recorded under the given branch
    pub fn id(&self, branch: &str) -> ObjectId {
        let parent = self
            .parent
            .as_ref()
            .map(|oid| oid.as_ref().to_string())
            .unwrap_or_else(|| " ".to_string());

        sha1_id(&[&self.readable_timestamp(), &self.message, &parent, branch])
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![format!("timestamp {}", self.timestamp.timestamp())];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        if let Some(merge_parent) = &self.merge_parent {
            lines.push(format!("merge-parent {}", merge_parent));
        }
        for (filename, oid) in &self.tree {
            lines.push(format!("tracked {} {}", oid, filename));
        }
        for (filename, oid) in &self.removed {
            lines.push(format!("removed {} {}", oid, filename));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(Bytes::from(lines.join("\n")))
    }
}

impl Unpackable for Commit {
    fn deserialize(content: &str) -> anyhow::Result<Self> {
        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut timestamp = None;
        let mut parent = None;
        let mut merge_parent = None;
        let mut tree = Tree::new();
        let mut removed = Tree::new();

        for line in header.lines() {
            let (key, value) = line
                .split_once(' ')
                .context("Invalid commit object: malformed header line")?;

            match key {
                "timestamp" => {
                    let seconds: i64 = value
                        .parse()
                        .context("Invalid commit object: invalid timestamp")?;
                    timestamp = DateTime::from_timestamp(seconds, 0);
                }
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge-parent" => merge_parent = Some(ObjectId::try_parse(value.to_string())?),
                "tracked" | "removed" => {
                    let (oid, filename) = value
                        .split_once(' ')
                        .context("Invalid commit object: malformed tree entry")?;
                    let entry = (filename.to_string(), ObjectId::try_parse(oid.to_string())?);
                    if key == "tracked" {
                        tree.insert(entry.0, entry.1);
                    } else {
                        removed.insert(entry.0, entry.1);
                    }
                }
                _ => anyhow::bail!("Invalid commit object: unknown header {}", key),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp")?;

        Ok(Commit::new(
            message.to_string(),
            timestamp,
            parent,
            merge_parent,
            tree,
            removed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_commit_is_deterministic() {
        let first = Commit::root();
        let second = Commit::root();
        assert_eq!(first.id("master"), second.id("master"));
        assert!(first.parent().is_none());
        assert_eq!(first.timestamp().timestamp(), 0);
    }

    #[test]
    fn id_depends_on_branch_name() {
        let commit = Commit::root();
        assert_ne!(commit.id("master"), commit.id("feature"));
    }

    #[test]
    fn survives_serialization_with_tree_and_parents() {
        let parent = Commit::root().id("master");
        let blob_oid = ObjectId::try_parse("a".repeat(40)).unwrap();
        let mut tree = Tree::new();
        tree.insert("a.txt".to_string(), blob_oid.clone());
        let mut removed = Tree::new();
        removed.insert("b.txt".to_string(), blob_oid);

        let commit = Commit::new(
            "add a, drop b".to_string(),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            Some(parent),
            None,
            tree,
            removed,
        );

        let bytes = commit.serialize().unwrap();
        let parsed = Commit::deserialize(std::str::from_utf8(&bytes).unwrap()).unwrap();
        assert_eq!(parsed, commit);
    }

    #[test]
    fn multiline_message_survives_serialization() {
        let commit = Commit::new(
            "subject\n\nbody paragraph".to_string(),
            DateTime::from_timestamp(42, 0).unwrap(),
            None,
            None,
            Tree::new(),
            Tree::new(),
        );

        let bytes = commit.serialize().unwrap();
        let parsed = Commit::deserialize(std::str::from_utf8(&bytes).unwrap()).unwrap();
        assert_eq!(parsed.message(), "subject\n\nbody paragraph");
    }
}
