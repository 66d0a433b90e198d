use crate::utils::error::Result;
use std::path::Path;

/// Blocking file access used by the feed loader.
pub trait Storage: Send + Sync {
    /// Returns `Ok(None)` when nothing exists at `path`.
    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    fn exists(&self, path: &Path) -> bool;

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        (**self).read_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        (**self).copy_file(from, to)
    }
}
