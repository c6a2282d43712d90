use crate::areas::repository::Repository;
use crate::errors::Error;

impl Repository {
    /// Delete a branch record; the commits it pointed at stay in the store
    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(name) {
            return Err(Error::BranchNotFound.into());
        }
        if self.refs().current_branch()? == name {
            return Err(Error::CannotRemoveActiveBranch.into());
        }

        self.refs().delete_branch(name)
    }
}
