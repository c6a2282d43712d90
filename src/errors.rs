//! User-facing error kinds
//!
//! Every failure a command can report to the user is a variant here; the
//! `Display` string is the exact one-line message printed by the top-level
//! handler in `main`. Internal I/O failures are propagated as plain `anyhow`
//! errors with context instead.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Not in an initialized jot directory.")]
    NotInitialized,

    #[error("A jot version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No commit with that id exists.")]
    CommitNotFound,

    #[error("Ambiguous commit id prefix.")]
    AmbiguousCommitId,

    #[error("Found no commit with that message.")]
    NoMatchingCommit,

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,

    #[error("Cannot remove the current branch.")]
    CannotRemoveActiveBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedObstruction,

    #[error("You have uncommitted changes.")]
    DirtyIndex,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
}
