use crate::areas::repository::Repository;
use crate::errors::Error;

impl Repository {
    /// Unstage a file, or queue a tracked file for removal.
    ///
    /// A staged-but-uncommitted file is only unstaged; its working copy is
    /// left alone. A file tracked by the head commit is queued for removal
    /// and its working copy deleted. Anything else is no reason to remove.
    pub fn rm(&self, filename: &str) -> anyhow::Result<()> {
        if self.index().unstage_file(filename)? {
            return Ok(());
        }

        let (_, head_commit) = self.head_commit()?;
        match head_commit.tree().get(filename) {
            Some(oid) => {
                self.index().queue_removal(filename, oid)?;
                self.workspace().delete_file(filename)?;
                tracing::debug!(%filename, blob = %oid, "queued for removal");
                Ok(())
            }
            None => Err(Error::NothingToRemove.into()),
        }
    }
}
