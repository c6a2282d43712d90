//! Content-addressed object database
//!
//! Blobs and commits are persisted as one file per object, keyed by hash,
//! in separate directories (the two hash formulas are not interchangeable).
//! Writes are idempotent and atomic: content goes to a temp name first and
//! is renamed into place, so an object is either fully present or absent.
//! References are only ever updated after the objects they point to exist.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::{Packable, Unpackable};
use crate::errors::Error;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct ObjectStore {
    blobs_path: Box<Path>,
    commits_path: Box<Path>,
}

impl ObjectStore {
    pub fn new(blobs_path: Box<Path>, commits_path: Box<Path>) -> Self {
        ObjectStore {
            blobs_path,
            commits_path,
        }
    }

    /// Persist a blob unless an object with its hash already exists
    pub fn put_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let oid = blob.id();
        self.write_object(self.blobs_path.join(oid.as_ref()), blob.serialize()?)?;
        Ok(oid)
    }

    pub fn get_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let content = self.read_object(self.blobs_path.join(oid.as_ref()))?;
        Blob::deserialize(&content)
    }

    pub fn blob_exists(&self, oid: &ObjectId) -> bool {
        self.blobs_path.join(oid.as_ref()).exists()
    }

    /// Persist a commit under its precomputed id (idempotent)
    pub fn put_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        self.write_object(self.commits_path.join(oid.as_ref()), commit.serialize()?)
    }

    pub fn get_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.read_object(self.commits_path.join(oid.as_ref()))?;
        Commit::deserialize(&content)
    }

    /// All stored commit ids, in sorted order
    pub fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut oids = std::fs::read_dir(self.commits_path.as_ref())
            .with_context(|| {
                format!(
                    "Unable to list commits directory {}",
                    self.commits_path.display()
                )
            })?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                ObjectId::try_parse(entry.file_name().to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>();

        oids.sort();
        Ok(oids)
    }

    /// Resolve a commit id fragment to the unique stored id containing it.
    ///
    /// Fails with `CommitNotFound` when nothing matches and with
    /// `AmbiguousCommitId` when more than one id does.
    pub fn resolve_commit_prefix(&self, fragment: &str) -> anyhow::Result<ObjectId> {
        let mut matches = self
            .list_commit_ids()?
            .into_iter()
            .filter(|oid| oid.as_ref().contains(fragment))
            .collect::<Vec<_>>();

        match matches.len() {
            0 => Err(Error::CommitNotFound.into()),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::AmbiguousCommitId.into()),
        }
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<String> {
        std::fs::read_to_string(&object_path)
            .with_context(|| format!("Unable to read object file {}", object_path.display()))
    }

    fn write_object(&self, object_path: PathBuf, content: Bytes) -> anyhow::Result<()> {
        if object_path.exists() {
            return Ok(());
        }

        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        std::fs::write(&temp_object_path, &content).with_context(|| {
            format!(
                "Unable to write object file {}",
                temp_object_path.display()
            )
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    fn store_with_commit_ids(ids: &[&str]) -> (TempDir, ObjectStore) {
        let dir = TempDir::new().unwrap();
        let blobs_path = dir.path().join("blobs");
        let commits_path = dir.path().join("commits");
        std::fs::create_dir_all(&blobs_path).unwrap();
        std::fs::create_dir_all(&commits_path).unwrap();

        for id in ids {
            std::fs::write(commits_path.join(id), "").unwrap();
        }

        let store = ObjectStore::new(
            blobs_path.into_boxed_path(),
            commits_path.into_boxed_path(),
        );
        (dir, store)
    }

    #[test]
    fn prefix_resolution_requires_a_unique_match() {
        let shared = "a".repeat(40);
        let distinct = format!("{}b", "a".repeat(39));
        let (_dir, store) = store_with_commit_ids(&[&shared, &distinct]);

        let resolved = store.resolve_commit_prefix("b").unwrap();
        assert_eq!(resolved.as_ref(), distinct.as_str());

        // both stored ids contain the fragment
        let err = store.resolve_commit_prefix("aaaa").unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::AmbiguousCommitId)
        );

        let err = store.resolve_commit_prefix("ffff").unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::CommitNotFound));
    }
}
