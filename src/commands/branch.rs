use crate::areas::repository::Repository;

impl Repository {
    /// Create a branch pointing at the current head commit
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        let (head_oid, _) = self.head_commit()?;
        self.refs().create_branch(name, &head_oid)
    }
}
