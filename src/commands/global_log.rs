use crate::areas::repository::Repository;

impl Repository {
    /// Print every commit ever recorded, regardless of branch reachability
    pub fn global_log(&self) -> anyhow::Result<()> {
        for oid in self.store().list_commit_ids()? {
            let commit = self.store().get_commit(&oid)?;
            self.print_commit(&oid, &commit)?;
        }

        Ok(())
    }
}
