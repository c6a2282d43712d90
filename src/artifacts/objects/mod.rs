//! Immutable repository objects
//!
//! Blobs record one file's content under one name; commits record full
//! snapshots plus ancestry. Both are write-once and content-addressed, but
//! with distinct hash formulas: a blob id covers (content, filename) while a
//! commit id covers (timestamp, message, first parent, branch). The two
//! namespaces are never mixed.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use sha1::{Digest, Sha1};

pub mod blob;
pub mod commit;
pub mod object_id;

/// Length of a hex-encoded object id
pub const OBJECT_ID_LENGTH: usize = 40;

/// Serialize an object into its on-disk byte representation
pub trait Packable {
    fn serialize(&self) -> anyhow::Result<Bytes>;
}

/// Reconstruct an object from its on-disk byte representation
pub trait Unpackable: Sized {
    fn deserialize(content: &str) -> anyhow::Result<Self>;
}

/// Hash a sequence of string parts into an object id.
///
/// Parts are fed to the digest back to back, so the id of `["ab", "c"]`
/// equals the id of `["a", "bc"]`; callers disambiguate by construction
/// (blob and commit inputs never collide since their part shapes differ).
pub(crate) fn sha1_id(parts: &[&str]) -> ObjectId {
    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    ObjectId::from_digest(hasher.finalize().as_slice())
}
