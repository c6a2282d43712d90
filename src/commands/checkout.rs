use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::sync::Synchronizer;
use crate::errors::Error;

impl Repository {
    /// Switch the working tree and active-branch pointer to another branch.
    ///
    /// The untracked-obstruction check runs over the whole incoming tree
    /// before a single file is written or deleted.
    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(name) {
            return Err(Error::NoSuchBranch.into());
        }
        if self.refs().current_branch()? == name {
            return Err(Error::AlreadyOnBranch.into());
        }

        let (_, leaving) = self.head_commit()?;
        let incoming_oid = self.refs().head(name)?;
        let incoming = self.store().get_commit(&incoming_oid)?;

        let sync = Synchronizer::new(self.workspace(), self.store());
        sync.check_obstructions(leaving.tree(), incoming.tree())?;
        sync.remove_stale(leaving.tree(), incoming.tree())?;
        sync.materialize(incoming.tree())?;

        self.index().clear()?;
        self.refs().set_current_branch(name)?;
        tracing::debug!(branch = name, head = %incoming_oid, "switched branch");

        Ok(())
    }

    /// Restore one file from the head commit
    pub fn checkout_file(&self, filename: &str) -> anyhow::Result<()> {
        let (_, head_commit) = self.head_commit()?;
        self.restore_file(&head_commit, filename)
    }

    /// Restore one file from the commit matching an id fragment
    pub fn checkout_file_at(&self, fragment: &str, filename: &str) -> anyhow::Result<()> {
        let oid = self.store().resolve_commit_prefix(fragment)?;
        let commit = self.store().get_commit(&oid)?;
        self.restore_file(&commit, filename)
    }

    fn restore_file(&self, commit: &Commit, filename: &str) -> anyhow::Result<()> {
        let oid = commit
            .tree()
            .get(filename)
            .ok_or(Error::FileNotInCommit)?;

        Synchronizer::new(self.workspace(), self.store()).write_blob(oid)
    }
}
