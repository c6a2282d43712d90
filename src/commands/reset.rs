use crate::areas::repository::Repository;
use crate::artifacts::sync::Synchronizer;

impl Repository {
    /// Move the active branch to an arbitrary commit and sync the tree.
    ///
    /// Writes both the branch head and its override to the target, so a
    /// commit made afterwards chains from the reset target. Indexes are
    /// cleared like any other whole-tree materialization.
    pub fn reset(&self, fragment: &str) -> anyhow::Result<()> {
        let target_oid = self.store().resolve_commit_prefix(fragment)?;
        let target = self.store().get_commit(&target_oid)?;
        let (_, leaving) = self.head_commit()?;

        let sync = Synchronizer::new(self.workspace(), self.store());
        sync.check_obstructions(leaving.tree(), target.tree())?;
        sync.remove_stale(leaving.tree(), target.tree())?;
        sync.materialize(target.tree())?;

        self.index().clear()?;

        let branch = self.refs().current_branch()?;
        self.refs().reset_to(&branch, &target_oid)?;
        tracing::debug!(%branch, target = %target_oid, "reset branch");

        Ok(())
    }
}
