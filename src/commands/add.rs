use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::errors::Error;

impl Repository {
    /// Stage a working file for the next commit.
    ///
    /// A pending removal for the filename is cancelled first ("unremove").
    /// If the working content matches the version tracked by the head
    /// commit, the filename ends fully untouched: any staged entry is
    /// dropped and nothing new is staged. Staging the same (filename,
    /// content) pair twice stores exactly one blob and one entry.
    pub fn add(&self, filename: &str) -> anyhow::Result<()> {
        if !self.workspace().file_exists(filename) {
            return Err(Error::FileNotFound.into());
        }

        let content = self.workspace().read_file(filename)?;
        let blob = Blob::new(filename.to_string(), content);
        let oid = blob.id();

        self.index().cancel_removal(filename)?;

        let (_, head_commit) = self.head_commit()?;
        if head_commit.tree().get(filename) == Some(&oid) {
            // changed back to the tracked version: nothing to record
            self.index().unstage_file(filename)?;
            return Ok(());
        }

        // restaging identical content reuses the stored blob
        if !self.store().blob_exists(&oid) {
            self.store().put_blob(&blob)?;
        }
        self.index().stage(filename, &oid)?;
        tracing::debug!(%filename, blob = %oid, "staged for addition");

        Ok(())
    }
}
