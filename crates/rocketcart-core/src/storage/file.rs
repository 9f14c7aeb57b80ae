use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use super::Storage;

/// Stores each key as `<dir>/<sanitized key>.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Keys like `@RocketShoes:cart` are not portable file names; anything
    /// outside `[A-Za-z0-9_-]` becomes `_`.
    fn file_name(key: &str) -> String {
        let stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{}.json", stem)
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(Self::file_name(key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read storage file: {}", path.display()))?;
        Ok(Some(contents))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key);
        std::fs::write(&path, value)
            .with_context(|| format!("Failed to write storage file: {}", path.display()))?;
        debug!(key, path = %path.display(), bytes = value.len(), "Stored item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove storage file: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_sanitizes_key() {
        assert_eq!(FileStorage::file_name("@RocketShoes:cart"), "_RocketShoes_cart.json");
        assert_eq!(FileStorage::file_name("plain-key_1"), "plain-key_1.json");
        assert_eq!(FileStorage::file_name("../etc/passwd"), "___etc_passwd.json");
    }

    #[test]
    fn test_round_trip_survives_new_instance() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("nested")).expect("storage");
        assert!(storage.get_item("@RocketShoes:cart").expect("get").is_none());

        storage.set_item("@RocketShoes:cart", "[]").expect("set");

        let reopened = FileStorage::new(dir.path().join("nested")).expect("storage");
        assert_eq!(
            reopened.get_item("@RocketShoes:cart").expect("get").as_deref(),
            Some("[]")
        );

        reopened.remove_item("@RocketShoes:cart").expect("remove");
        assert!(storage.get_item("@RocketShoes:cart").expect("get").is_none());
        reopened.remove_item("@RocketShoes:cart").expect("remove missing");
    }
}
