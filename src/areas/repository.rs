//! Repository context
//!
//! One `Repository` value is created at command start and passed to every
//! component; there is no ambient global state. It owns the four areas plus
//! an injected output writer so commands can be exercised against a buffer
//! in tests.

use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::store::ObjectStore;
use crate::areas::workspace::{REPO_DIR_NAME, Workspace};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    store: ObjectStore,
    index: Index,
    refs: Refs,
    workspace: Workspace,
}

impl Repository {
    /// Open an existing repository rooted at `path`
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;

        if !path.join(REPO_DIR_NAME).is_dir() {
            return Err(Error::NotInitialized.into());
        }

        Ok(Self::assemble(path.into_boxed_path(), writer))
    }

    /// Create the on-disk layout for a fresh repository and open it.
    ///
    /// The caller (the `init` command) is responsible for writing the root
    /// commit and default branch afterwards.
    pub fn create(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let repo_dir = path.join(REPO_DIR_NAME);

        if repo_dir.exists() {
            return Err(Error::AlreadyInitialized.into());
        }

        for dir in ["blobs", "commits", "staging", "removal", "refs"] {
            std::fs::create_dir_all(repo_dir.join(dir))?;
        }

        Ok(Self::assemble(path.into_boxed_path(), writer))
    }

    fn assemble(path: Box<Path>, writer: Box<dyn std::io::Write>) -> Self {
        let repo_dir = path.join(REPO_DIR_NAME);

        let store = ObjectStore::new(
            repo_dir.join("blobs").into_boxed_path(),
            repo_dir.join("commits").into_boxed_path(),
        );
        let index = Index::new(
            repo_dir.join("staging").into_boxed_path(),
            repo_dir.join("removal").into_boxed_path(),
        );
        let refs = Refs::new(
            repo_dir.join("refs").into_boxed_path(),
            repo_dir.join("BRANCH").into_boxed_path(),
        );
        let workspace = Workspace::new(path.clone());

        Repository {
            path,
            writer: RefCell::new(writer),
            store,
            index,
            refs,
            workspace,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Effective head commit of the active branch
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let branch = self.refs.current_branch()?;
        let oid = self.refs.head(&branch)?;
        let commit = self.store.get_commit(&oid)?;

        Ok((oid, commit))
    }
}
