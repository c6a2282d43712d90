use crate::areas::repository::Repository;
use crate::artifacts::graph::SplitPointFinder;
use crate::artifacts::merge::{MergeAction, conflict_content, reconcile};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::sync::Synchronizer;
use crate::errors::Error;
use std::collections::BTreeSet;

impl Repository {
    /// Merge the given branch into the active branch.
    ///
    /// State machine over one invocation: preconditions, obstruction check,
    /// split-point discovery, then either a no-op (given branch already
    /// merged), a fast-forward (no commit created), or a per-file three-way
    /// reconciliation followed by a merge commit through the normal commit
    /// path. A conflict never aborts the merge; it is reported after the
    /// merge commit succeeds.
    pub fn merge(&self, given: &str) -> anyhow::Result<()> {
        if !self.index().is_clean()? {
            return Err(Error::DirtyIndex.into());
        }
        if !self.refs().branch_exists(given) {
            return Err(Error::BranchNotFound.into());
        }
        let current = self.refs().current_branch()?;
        if current == given {
            return Err(Error::SelfMerge.into());
        }

        let current_tip = self.refs().head(&current)?;
        let given_tip = self.refs().head(given)?;
        let current_commit = self.store().get_commit(&current_tip)?;
        let given_commit = self.store().get_commit(&given_tip)?;

        let sync = Synchronizer::new(self.workspace(), self.store());
        sync.check_obstructions(current_commit.tree(), given_commit.tree())?;

        let split = {
            let store = self.store();
            let mut finder = SplitPointFinder::new(|oid| Ok(store.get_commit(oid)?.parents()));
            finder
                .find(&current_tip, &given_tip)?
                .ok_or_else(|| anyhow::anyhow!("no common ancestor between branch tips"))?
        };

        if split == given_tip {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if split == current_tip {
            // fast-forward: move the pointer, create no commit
            sync.remove_stale(current_commit.tree(), given_commit.tree())?;
            sync.materialize(given_commit.tree())?;
            self.index().clear()?;
            self.refs().advance(&current, &given_tip)?;

            tracing::debug!(branch = %current, tip = %given_tip, "fast-forwarded");
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split_commit = self.store().get_commit(&split)?;

        let filenames: BTreeSet<&String> = split_commit
            .tree()
            .keys()
            .chain(current_commit.tree().keys())
            .chain(given_commit.tree().keys())
            .collect();

        let mut conflicted = false;
        for filename in filenames {
            let base = split_commit.tree().get(filename);
            let ours = current_commit.tree().get(filename);
            let theirs = given_commit.tree().get(filename);

            match reconcile(base, ours, theirs) {
                MergeAction::KeepCurrent => {}
                MergeAction::TakeGiven(oid) => {
                    sync.write_blob(&oid)?;
                    self.index().stage(filename, &oid)?;
                }
                MergeAction::RemoveFile => {
                    // base == ours here, so ours carries the tracked hash
                    if let Some(oid) = ours {
                        self.index().queue_removal(filename, oid)?;
                    }
                    self.workspace().delete_file(filename)?;
                }
                MergeAction::Conflict => {
                    conflicted = true;
                    self.write_conflict(filename, ours, theirs)?;
                }
            }
        }

        let message = format!("Merged {} into {}.", given, current);
        self.commit_with_merge_parent(&message, Some(given_tip))?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    fn write_conflict(
        &self,
        filename: &str,
        ours: Option<&ObjectId>,
        theirs: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        let ours_content = match ours {
            Some(oid) => Some(self.store().get_blob(oid)?.content().to_string()),
            None => None,
        };
        let theirs_content = match theirs {
            Some(oid) => Some(self.store().get_blob(oid)?.content().to_string()),
            None => None,
        };

        let merged = conflict_content(ours_content.as_deref(), theirs_content.as_deref());
        let blob = Blob::new(filename.to_string(), merged);
        let oid = self.store().put_blob(&blob)?;

        self.workspace().write_file(filename, blob.content())?;
        self.index().stage(filename, &oid)?;
        tracing::debug!(%filename, "merge conflict recorded");

        Ok(())
    }
}
