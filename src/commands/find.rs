use crate::areas::repository::Repository;
use crate::errors::Error;

impl Repository {
    /// Print the ids of every commit whose message matches exactly
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for oid in self.store().list_commit_ids()? {
            let commit = self.store().get_commit(&oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if !found {
            return Err(Error::NoMatchingCommit.into());
        }

        Ok(())
    }
}
