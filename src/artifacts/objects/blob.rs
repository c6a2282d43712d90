//! Blob object
//!
//! A blob records one file's content at one point in time, together with the
//! filename it was recorded under. Identity covers both fields: the same
//! bytes under two different names are two distinct blobs. Removal and
//! restore logic is filename-keyed, which is why the name participates in
//! the hash.
//!
//! ## Format
//!
//! On disk: `filename <name>\n<content>`

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::{Packable, Unpackable, sha1_id};
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Blob {
    filename: String,
    content: String,
}

impl Blob {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content hash of this blob: `sha1(content, filename)`
    pub fn id(&self) -> ObjectId {
        sha1_id(&[&self.content, &self.filename])
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(format!("filename {}\n", self.filename).as_bytes());
        bytes.extend_from_slice(self.content.as_bytes());
        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(content: &str) -> anyhow::Result<Self> {
        let (header, body) = content
            .split_once('\n')
            .context("Invalid blob object: missing filename header")?;
        let filename = header
            .strip_prefix("filename ")
            .context("Invalid blob object: invalid filename header")?;

        Ok(Self::new(filename.to_string(), body.to_string()))
    }
}
