//! File-backed blob store.

use catalog_engine::{error::Result, BlobStore, Error};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each blob as `<dir>/<key>.json`.
///
/// The directory is created on first write. Nothing coordinates concurrent
/// writers; the last write wins.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// The key is percent-encoded, so separators never leave `dir` and
    /// distinct keys never share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(storage)?;
        fs::write(self.path_for(key), value).map_err(storage)
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage(e)),
        }
    }
}

fn storage(e: std::io::Error) -> Error {
    Error::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path().join("cache"));

        assert_eq!(store.get("bsp-products").unwrap(), None);

        store.set("bsp-products", "{}").unwrap();
        assert_eq!(store.get("bsp-products").unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("cache/bsp-products.json").exists());

        store.remove("bsp-products").unwrap();
        store.remove("bsp-products").unwrap();
        assert_eq!(store.get("bsp-products").unwrap(), None);
    }

    #[test]
    fn keys_stay_inside_dir() {
        let store = FileBlobStore::new("/tmp/x");
        assert_eq!(
            store.path_for("../etc/passwd"),
            PathBuf::from("/tmp/x/..%2Fetc%2Fpasswd.json")
        );
        assert_eq!(
            store.path_for("bsp-products"),
            PathBuf::from("/tmp/x/bsp-products.json")
        );
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path());

        store.set("a.b", "dot").unwrap();
        store.set("a_b", "underscore").unwrap();
        store.set("a b", "space").unwrap();

        assert_eq!(store.get("a.b").unwrap().as_deref(), Some("dot"));
        assert_eq!(store.get("a_b").unwrap().as_deref(), Some("underscore"));
        assert_eq!(store.get("a b").unwrap().as_deref(), Some("space"));
    }
}
