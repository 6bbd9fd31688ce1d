//! Model file directory
//!
//! Every model lives directly under one root directory; names are plain file
//! names and never resolve outside it.

use asset_viz_common::{AssetError, ModelFormat, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Metadata for a stored model file
#[derive(Debug, Clone, Serialize)]
pub struct StoredModel {
    pub name: String,
    pub format: ModelFormat,
    pub size_bytes: u64,
    #[serde(skip)]
    pub path: PathBuf,
}

/// Flat directory of model files
#[derive(Debug, Clone)]
pub struct ModelStore {
    root: PathBuf,
}

impl ModelStore {
    /// Open (and create if needed) the store at `root`
    pub fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for `name` inside the store; rejects anything that is not a plain file name
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_ok_and(|p| p.is_file())
    }

    /// Write `bytes` as `name`, replacing any existing file
    pub fn save(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.resolve(name)?;
        std::fs::write(&path, bytes)?;
        debug!("Stored {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Path of an existing model
    pub fn existing(&self, name: &str) -> Result<PathBuf> {
        let path = self.resolve(name)?;
        if !path.is_file() {
            return Err(AssetError::NotFound(name.to_string()));
        }
        Ok(path)
    }

    /// Format and size of an existing model
    pub fn info(&self, name: &str) -> Result<StoredModel> {
        let path = self.existing(name)?;
        let format = ModelFormat::from_path(&path)?;
        let size_bytes = std::fs::metadata(&path)?.len();
        Ok(StoredModel {
            name: name.to_string(),
            format,
            size_bytes,
            path,
        })
    }
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty() || name.starts_with('.') || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(AssetError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_root() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::open(dir.path().join("static/models")).unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn test_rejects_path_names() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::open(dir.path()).unwrap();
        for name in ["", "..", "../secret.glb", "a/b.glb", "..\\x.glb", ".hidden.glb"] {
            assert!(
                matches!(store.resolve(name), Err(AssetError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(store.resolve("f16.glb").is_ok());
        assert!(store.resolve("x..glb").is_ok());
        assert!(store.resolve("v2..final.glb").is_ok());
    }

    #[test]
    fn test_save_and_info() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::open(dir.path()).unwrap();
        store.save("tank.glb", b"glTF0000").unwrap();

        assert!(store.exists("tank.glb"));
        let info = store.info("tank.glb").unwrap();
        assert_eq!(info.format, ModelFormat::Gltf);
        assert_eq!(info.size_bytes, 8);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["format"], "gltf");
        assert!(json.get("path").is_none());
    }

    #[test]
    fn test_missing_model() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::open(dir.path()).unwrap();
        assert!(!store.exists("ghost.glb"));
        assert!(matches!(store.info("ghost.glb"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_info_on_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::open(dir.path()).unwrap();
        store.save("notes.txt", b"hello").unwrap();
        assert!(matches!(
            store.info("notes.txt"),
            Err(AssetError::UnsupportedFormat(_))
        ));
    }
}
