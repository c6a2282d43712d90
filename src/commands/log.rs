use crate::areas::repository::Repository;
use crate::artifacts::graph::AncestorWalk;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Linear history of the active branch, newest first, first parent only
    pub fn log(&self) -> anyhow::Result<()> {
        let (head_oid, _) = self.head_commit()?;

        for entry in AncestorWalk::new(self.store(), head_oid) {
            let (oid, commit) = entry?;
            self.print_commit(&oid, &commit)?;
        }

        Ok(())
    }

    /// The shared log block format:
    ///
    /// ```text
    /// ===
    /// commit <id>
    /// Date: <readable timestamp>
    /// <message>
    /// <blank>
    /// ```
    pub(crate) fn print_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", oid)?;
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
