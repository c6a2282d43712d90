//! Branch references and the active-branch pointer
//!
//! A branch is a named record pointing at a commit. Each record holds the
//! branch tip (`head`) and an optional `override` set by reset; reads
//! resolve the override first. Records are independent files, so one
//! branch's update never touches another's. A single separate file names
//! the active branch.
//!
//! ## File format
//!
//! ```text
//! head <commit-id>
//! override <commit-id>    (only after a reset)
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

/// Branch created by `init` and named by every fresh repository
pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, new)]
pub struct Refs {
    /// Directory of branch records, one file per branch
    refs_path: Box<Path>,
    /// File containing the active branch name
    branch_file: Box<Path>,
}

/// Persisted state of one branch
#[derive(Debug, Clone, PartialEq, Eq)]
struct BranchRecord {
    head: ObjectId,
    r#override: Option<ObjectId>,
}

impl BranchRecord {
    fn effective_head(&self) -> &ObjectId {
        self.r#override.as_ref().unwrap_or(&self.head)
    }

    fn render(&self) -> String {
        match &self.r#override {
            Some(oid) => format!("head {}\noverride {}\n", self.head, oid),
            None => format!("head {}\n", self.head),
        }
    }

    fn parse(content: &str) -> anyhow::Result<Self> {
        let mut head = None;
        let mut r#override = None;

        for line in content.lines() {
            match line.split_once(' ') {
                Some(("head", oid)) => head = Some(ObjectId::try_parse(oid.to_string())?),
                Some(("override", oid)) => {
                    r#override = Some(ObjectId::try_parse(oid.to_string())?)
                }
                _ => anyhow::bail!("Invalid branch record line: {}", line),
            }
        }

        Ok(BranchRecord {
            head: head.context("Invalid branch record: missing head")?,
            r#override,
        })
    }
}

impl Refs {
    pub fn branch_exists(&self, name: &str) -> bool {
        self.refs_path.join(name).is_file()
    }

    /// Create a branch pointing at a commit
    pub fn create_branch(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(Error::BranchAlreadyExists.into());
        }

        self.write_record(
            name,
            &BranchRecord {
                head: oid.clone(),
                r#override: None,
            },
        )
    }

    /// Effective head of a branch, resolving a reset override if present
    pub fn head(&self, name: &str) -> anyhow::Result<ObjectId> {
        Ok(self.read_record(name)?.effective_head().clone())
    }

    /// Move a branch tip to a new commit, clearing any override (commit path)
    pub fn advance(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_record(
            name,
            &BranchRecord {
                head: oid.clone(),
                r#override: None,
            },
        )
    }

    /// Point a branch at an arbitrary commit (reset path).
    ///
    /// Both fields move together so that a commit made after a reset chains
    /// from the reset target.
    pub fn reset_to(&self, name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_record(
            name,
            &BranchRecord {
                head: oid.clone(),
                r#override: Some(oid.clone()),
            },
        )
    }

    pub fn delete_branch(&self, name: &str) -> anyhow::Result<()> {
        let branch_path = self.refs_path.join(name);

        if !branch_path.is_file() {
            return Err(Error::BranchNotFound.into());
        }

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("Unable to delete branch record for {}", name))
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let mut branches = std::fs::read_dir(self.refs_path.as_ref())
            .with_context(|| {
                format!("Unable to list refs directory {}", self.refs_path.display())
            })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }

    pub fn current_branch(&self) -> anyhow::Result<String> {
        let name = std::fs::read_to_string(self.branch_file.as_ref())
            .context("Unable to read the active branch pointer")?;

        Ok(name.trim().to_string())
    }

    pub fn set_current_branch(&self, name: &str) -> anyhow::Result<()> {
        std::fs::write(self.branch_file.as_ref(), name)
            .context("Unable to update the active branch pointer")
    }

    fn read_record(&self, name: &str) -> anyhow::Result<BranchRecord> {
        let branch_path = self.refs_path.join(name);
        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("Unable to read branch record for {}", name))?;

        BranchRecord::parse(&content)
    }

    fn write_record(&self, name: &str, record: &BranchRecord) -> anyhow::Result<()> {
        let branch_path = self.refs_path.join(name);

        std::fs::write(&branch_path, record.render())
            .with_context(|| format!("Unable to write branch record for {}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(byte: char) -> ObjectId {
        ObjectId::try_parse(byte.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn record_without_override_round_trips() {
        let record = BranchRecord {
            head: oid('a'),
            r#override: None,
        };
        assert_eq!(BranchRecord::parse(&record.render()).unwrap(), record);
    }

    #[test]
    fn record_with_override_round_trips_and_resolves() {
        let record = BranchRecord {
            head: oid('a'),
            r#override: Some(oid('b')),
        };
        let parsed = BranchRecord::parse(&record.render()).unwrap();
        assert_eq!(parsed, record);
        assert_eq!(parsed.effective_head(), &oid('b'));
    }

    #[test]
    fn malformed_record_is_rejected() {
        assert!(BranchRecord::parse("garbage").is_err());
        assert!(BranchRecord::parse("override aaaa\n").is_err());
    }
}
