use crate::areas::repository::Repository;

impl Repository {
    /// Report branches, staged files and removed files, each sorted
    pub fn status(&self) -> anyhow::Result<()> {
        let current = self.refs().current_branch()?;
        let branches = self.refs().list_branches()?;
        let staged = self.index().staged_entries()?;
        let removed = self.index().removal_entries()?;

        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in branches {
            if branch == current {
                writeln!(writer, "*{}", branch)?;
            } else {
                writeln!(writer, "{}", branch)?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for (filename, _) in staged {
            writeln!(writer, "{}", filename)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for (filename, _) in removed {
            writeln!(writer, "{}", filename)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        writeln!(writer)?;
        writeln!(writer, "=== Untracked Files ===")?;
        writeln!(writer)?;

        Ok(())
    }
}
