//! Three-way reconciliation
//!
//! Given one file's blob hash at the split point (base), the active tip
//! (ours) and the given tip (theirs), [`reconcile`] decides what the merged
//! tree does with that file. The table collapses to four rules:
//!
//! - both sides agree (including both absent): nothing to do
//! - the given side is unchanged against the base: our version stands
//! - our side is unchanged against the base: the given side wins, either as
//!   a new version or as a deletion
//! - both sides changed, differently: conflict
//!
//! "Changed" includes deletion, so one side deleting while the other edits
//! is a conflict. Conflicts never abort a merge; the caller writes the
//! marker template from [`conflict_content`] and stages it like any add.

use crate::artifacts::objects::object_id::ObjectId;

/// What the merged tree does with one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Our version (or shared absence) already matches the outcome
    KeepCurrent,
    /// Materialize and stage the given side's blob
    TakeGiven(ObjectId),
    /// Delete the working file and queue its removal
    RemoveFile,
    /// Irreconcilable: write conflict markers and stage the result
    Conflict,
}

/// Decide the merge outcome for one file from its three tree entries
pub fn reconcile(
    base: Option<&ObjectId>,
    ours: Option<&ObjectId>,
    theirs: Option<&ObjectId>,
) -> MergeAction {
    if ours == theirs {
        return MergeAction::KeepCurrent;
    }
    if base == theirs {
        return MergeAction::KeepCurrent;
    }
    if base == ours {
        return match theirs {
            Some(oid) => MergeAction::TakeGiven(oid.clone()),
            None => MergeAction::RemoveFile,
        };
    }
    MergeAction::Conflict
}

/// Render the conflict marker template for one file.
///
/// Each non-empty side is newline-terminated inside the markers; an absent
/// or empty side contributes nothing between its delimiters.
pub fn conflict_content(ours: Option<&str>, theirs: Option<&str>) -> String {
    let mut merged = String::from("<<<<<<< HEAD\n");
    push_section(&mut merged, ours);
    merged.push_str("=======\n");
    push_section(&mut merged, theirs);
    merged.push_str(">>>>>>>\n");
    merged
}

fn push_section(buffer: &mut String, side: Option<&str>) {
    if let Some(content) = side
        && !content.is_empty()
    {
        buffer.push_str(content);
        if !content.ends_with('\n') {
            buffer.push('\n');
        }
    }
}
