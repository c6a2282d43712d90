//! Staging and removal areas
//!
//! The mutable set of pending changes between commits. Each area is a
//! directory of entry files keyed by blob hash; the entry content is the
//! filename, so both the next commit and status reporting can recover the
//! filename-to-hash mapping without a store round trip. Both areas are
//! emptied by every successful commit and branch checkout.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::path::Path;

#[derive(Debug)]
pub struct Index {
    staging_path: Box<Path>,
    removal_path: Box<Path>,
}

impl Index {
    pub fn new(staging_path: Box<Path>, removal_path: Box<Path>) -> Self {
        Index {
            staging_path,
            removal_path,
        }
    }

    /// Stage a pending add, replacing any staged entry for the same filename
    pub fn stage(&self, filename: &str, oid: &ObjectId) -> anyhow::Result<()> {
        self.unstage_file(filename)?;
        Self::write_entry(&self.staging_path, filename, oid)
    }

    /// Drop the staged entry for a filename; returns whether one existed
    pub fn unstage_file(&self, filename: &str) -> anyhow::Result<bool> {
        Self::remove_entry(&self.staging_path, filename)
    }

    /// Queue a pending removal for the next commit
    pub fn queue_removal(&self, filename: &str, oid: &ObjectId) -> anyhow::Result<()> {
        Self::write_entry(&self.removal_path, filename, oid)
    }

    /// Cancel a pending removal; returns whether one existed
    pub fn cancel_removal(&self, filename: &str) -> anyhow::Result<bool> {
        Self::remove_entry(&self.removal_path, filename)
    }

    /// Pending adds as (filename, blob hash), sorted by filename
    pub fn staged_entries(&self) -> anyhow::Result<Vec<(String, ObjectId)>> {
        Self::list_entries(&self.staging_path)
    }

    /// Pending removals as (filename, blob hash), sorted by filename
    pub fn removal_entries(&self) -> anyhow::Result<Vec<(String, ObjectId)>> {
        Self::list_entries(&self.removal_path)
    }

    pub fn is_clean(&self) -> anyhow::Result<bool> {
        Ok(self.staged_entries()?.is_empty() && self.removal_entries()?.is_empty())
    }

    /// Empty both areas (after commit and after branch checkout)
    pub fn clear(&self) -> anyhow::Result<()> {
        for path in [&self.staging_path, &self.removal_path] {
            for (_, oid) in Self::list_entries(path)? {
                std::fs::remove_file(path.join(oid.as_ref())).with_context(|| {
                    format!("Unable to clear index entry {}", oid)
                })?;
            }
        }

        Ok(())
    }

    fn write_entry(area: &Path, filename: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let entry_path = area.join(oid.as_ref());

        std::fs::write(&entry_path, filename)
            .with_context(|| format!("Unable to write index entry {}", entry_path.display()))
    }

    fn remove_entry(area: &Path, filename: &str) -> anyhow::Result<bool> {
        for (entry_filename, oid) in Self::list_entries(area)? {
            if entry_filename == filename {
                std::fs::remove_file(area.join(oid.as_ref())).with_context(|| {
                    format!("Unable to remove index entry {}", oid)
                })?;
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn list_entries(area: &Path) -> anyhow::Result<Vec<(String, ObjectId)>> {
        let mut entries = Vec::new();

        for entry in std::fs::read_dir(area)
            .with_context(|| format!("Unable to list index directory {}", area.display()))?
        {
            let entry = entry?;
            let oid = match ObjectId::try_parse(entry.file_name().to_string_lossy().to_string()) {
                Ok(oid) => oid,
                Err(_) => continue,
            };
            let filename = std::fs::read_to_string(entry.path())
                .with_context(|| format!("Unable to read index entry {}", oid))?;

            entries.push((filename, oid));
        }

        entries.sort();
        Ok(entries)
    }
}
