//! Working-tree synchronizer
//!
//! Materializes a commit's tracked files into the working directory and
//! enforces the no-clobber rule: a working file untracked by the tree being
//! left behind but tracked by the tree being brought in would be silently
//! destroyed, so the whole set is checked before anything is written. This
//! is the only component that deletes or overwrites user-visible files.

use crate::areas::store::ObjectStore;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use derive_new::new;

#[derive(new)]
pub struct Synchronizer<'a> {
    workspace: &'a Workspace,
    store: &'a ObjectStore,
}

impl Synchronizer<'_> {
    /// Fail before any mutation if an untracked working file would be
    /// overwritten by materializing `incoming_tree`.
    pub fn check_obstructions(
        &self,
        leaving_tree: &Tree,
        incoming_tree: &Tree,
    ) -> anyhow::Result<()> {
        for filename in self.workspace.list_files()? {
            if !leaving_tree.contains_key(&filename) && incoming_tree.contains_key(&filename) {
                tracing::debug!(%filename, "untracked file obstructs materialization");
                return Err(Error::UntrackedObstruction.into());
            }
        }

        Ok(())
    }

    /// Delete working files tracked by the tree being left behind that are
    /// absent from the incoming tree.
    pub fn remove_stale(&self, leaving_tree: &Tree, incoming_tree: &Tree) -> anyhow::Result<()> {
        for filename in leaving_tree.keys() {
            if !incoming_tree.contains_key(filename) {
                self.workspace.delete_file(filename)?;
            }
        }

        Ok(())
    }

    /// Write every tracked file of a tree into the working directory,
    /// overwriting tracked files in place.
    pub fn materialize(&self, tree: &Tree) -> anyhow::Result<()> {
        for oid in tree.values() {
            self.write_blob(oid)?;
        }

        Ok(())
    }

    /// Write a single blob's content to its recorded filename
    pub fn write_blob(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let blob = self.store.get_blob(oid)?;
        self.workspace.write_file(blob.filename(), blob.content())
    }
}
