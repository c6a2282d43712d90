use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Tree};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use chrono::Utc;

impl Repository {
    /// Record a snapshot of the staged and removed changes
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.commit_with_merge_parent(message, None)?;
        Ok(())
    }

    /// The single commit-construction path, shared with the merge engine.
    ///
    /// The new tree is the first parent's tree overlaid with every staged
    /// entry minus every queued removal; the removal map records only the
    /// files removed by this commit. The commit object is durable before
    /// the branch head advances, and both indexes are cleared on success.
    pub(crate) fn commit_with_merge_parent(
        &self,
        message: &str,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if message.is_empty() {
            return Err(Error::EmptyMessage.into());
        }

        let branch = self.refs().current_branch()?;
        let parent_oid = self.refs().head(&branch)?;
        let parent = self.store().get_commit(&parent_oid)?;

        let staged = self.index().staged_entries()?;
        let removals = self.index().removal_entries()?;
        if staged.is_empty() && removals.is_empty() {
            return Err(Error::NothingToCommit.into());
        }

        let mut tree = parent.tree().clone();
        for (filename, oid) in staged {
            tree.insert(filename, oid);
        }

        let mut removed = Tree::new();
        for (filename, oid) in removals {
            tree.remove(&filename);
            removed.insert(filename, oid);
        }

        let commit = Commit::new(
            message.to_string(),
            Utc::now(),
            Some(parent_oid),
            merge_parent,
            tree,
            removed,
        );
        let oid = commit.id(&branch);

        // object first, reference after
        self.store().put_commit(&oid, &commit)?;
        self.index().clear()?;
        self.refs().advance(&branch, &oid)?;

        tracing::debug!(commit = %oid, %branch, "recorded commit");
        Ok(oid)
    }
}
