//! JSON document connection.
//!
//! `JsonConnection` manages the data directory and the raw read/write of the
//! JSON documents in it. One document per collection:
//!
//! ```text
//! data/
//! ├── services.json              full service collection
//! ├── predefined_services.json   template catalog
//! └── client_plans.json          client plans
//! ```
//!
//! Writes are atomic (temp file + rename) so a crash mid-save never leaves a
//! half-written document behind.

use anyhow::Result;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at the given directory, creating it if
    /// needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }
        Ok(Self { base_directory: base_path })
    }

    /// Create a connection in the default data directory
    /// (`~/Documents/FlowBarber`, falling back to the home directory when no
    /// Documents folder exists).
    pub fn new_default() -> Result<Self> {
        let parent = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Self::new(parent.join("FlowBarber"))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of a named document inside the data directory.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.base_directory.join(name)
    }

    /// Read a document's raw content. `Ok(None)` when it has never been
    /// written.
    pub fn read_document(&self, name: &str) -> Result<Option<String>> {
        let path = self.document_path(name);
        if !path.exists() {
            debug!("Document {} does not exist yet", name);
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(content))
    }

    /// Replace a document's content atomically.
    pub fn write_document(&self, name: &str, content: &str) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }
        let path = self.document_path(name);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &path)?;
        debug!("Saved document {}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_connection() -> (JsonConnection, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        (connection, temp_dir)
    }

    #[test]
    fn test_missing_document_reads_as_none() {
        let (connection, _temp_dir) = create_test_connection();
        assert!(connection.read_document("services.json").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (connection, _temp_dir) = create_test_connection();
        connection.write_document("services.json", "[]").unwrap();
        assert_eq!(
            connection.read_document("services.json").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let (connection, temp_dir) = create_test_connection();
        connection.write_document("client_plans.json", "[]").unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_creates_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("data");
        let connection = JsonConnection::new(&nested).unwrap();
        connection.write_document("services.json", "[]").unwrap();
        assert!(nested.join("services.json").exists());
    }
}
