use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use std::path::Path;

impl Repository {
    /// Create a fresh repository with its deterministic root commit.
    ///
    /// The root commit carries a fixed epoch timestamp and no parent, so two
    /// repositories initialized independently share the same root id.
    pub fn init(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Repository> {
        let repository = Repository::create(path, writer)?;

        let root = Commit::root();
        let root_oid = root.id(DEFAULT_BRANCH);

        // the object must exist before any reference points at it
        repository.store().put_commit(&root_oid, &root)?;
        repository.refs().create_branch(DEFAULT_BRANCH, &root_oid)?;
        repository.refs().set_current_branch(DEFAULT_BRANCH)?;

        tracing::debug!(root = %root_oid, "repository initialized");
        Ok(repository)
    }
}
