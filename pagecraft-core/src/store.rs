//! Filesystem project storage.
//!
//! Each project is one pretty-printed JSON file `<data_dir>/<name>.json`.
//! Names are sanitized before they touch the filesystem.

use std::path::{Path, PathBuf};

use crate::schema::ProjectDocument;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// No project with this name is stored.
    #[error("Project not found: {0}")]
    NotFound(String),
    /// The name cannot be turned into a file name.
    #[error("Invalid project name: {0:?}")]
    InvalidName(String),
}

/// JSON-file project store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    data_dir: PathBuf,
}

impl ProjectStore {
    /// Open a store, creating `data_dir` if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Directory holding the project files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File path a project name maps to.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidName`] if the name is blank.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        let stem = sanitize_filename(name.trim());
        if stem.is_empty() {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.data_dir.join(format!("{stem}.json")))
    }

    /// Check whether a project is stored under `name`.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.is_file())
    }

    /// Write a project, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the file cannot be written.
    pub fn save(&self, name: &str, document: &ProjectDocument) -> Result<PathBuf, StoreError> {
        let path = self.path_for(name)?;
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(&path, json)?;
        tracing::info!(project = name, path = %path.display(), "Saved project");
        Ok(path)
    }

    /// Read a project.
    ///
    /// The document is parsed but not validated; see [`ProjectDocument::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no file exists for `name`, or an
    /// I/O or serialization error if it cannot be read.
    pub fn load(&self, name: &str) -> Result<ProjectDocument, StoreError> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let contents = std::fs::read_to_string(&path)?;
        let document = serde_json::from_str(&contents)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        tracing::debug!(project = name, path = %path.display(), "Loaded project");
        Ok(document)
    }

    /// Names of every stored project, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory can't be read.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove a stored project.
    ///
    /// Returns `false` if there was nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the file cannot be removed.
    pub fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        tracing::info!(project = name, "Deleted project");
        Ok(true)
    }
}

/// Replace any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageDocument;

    fn sample() -> ProjectDocument {
        let home = PageDocument::starter("Home");
        let id = home.id;
        ProjectDocument::new(vec![home], Some(id))
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::with_data_dir(dir.path()).expect("store");
        let doc = sample();

        let path = store.save("site", &doc).expect("save");
        assert!(path.ends_with("site.json"));
        assert!(store.exists("site"));

        let store2 = ProjectStore::with_data_dir(dir.path()).expect("store2");
        assert_eq!(store2.load("site").expect("load"), doc);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::with_data_dir(dir.path()).expect("store");
        assert!(matches!(store.load("nope"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::with_data_dir(dir.path()).expect("store");
        std::fs::write(dir.path().join("bad.json"), "{ nope").expect("write");
        assert!(matches!(store.load("bad"), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_list_and_delete() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::with_data_dir(dir.path()).expect("store");
        store.save("beta", &sample()).expect("save");
        store.save("alpha", &sample()).expect("save");
        std::fs::write(dir.path().join("notes.txt"), "x").expect("write");

        assert_eq!(store.list().expect("list"), vec!["alpha", "beta"]);
        assert!(store.delete("alpha").expect("delete"));
        assert!(!store.delete("alpha").expect("delete again"));
        assert_eq!(store.list().expect("list"), vec!["beta"]);
    }

    #[test]
    fn test_creates_nested_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b");
        let store = ProjectStore::with_data_dir(&nested).expect("store");
        assert!(nested.is_dir());
        assert_eq!(store.data_dir(), nested.as_path());
    }

    #[test]
    fn test_blank_name_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::with_data_dir(dir.path()).expect("store");
        assert!(matches!(store.path_for("  "), Err(StoreError::InvalidName(_))));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("my-site_2"), "my-site_2");
        assert_eq!(sanitize_filename("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize_filename("a b.c"), "a_b_c");
    }
}
