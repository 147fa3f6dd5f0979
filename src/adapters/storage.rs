use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Filesystem storage rooted at `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        tokio_test::block_on(storage.write_file("reports/projection.json", b"{}")).unwrap();

        assert!(temp_dir.path().join("reports").is_dir());
        let data = std::fs::read(temp_dir.path().join("reports/projection.json")).unwrap();
        assert_eq!(data, b"{}");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        tokio_test::block_on(async {
            storage.write_file("projection.csv", b"old").await.unwrap();
            storage.write_file("projection.csv", b"new").await.unwrap();
        });

        let data = std::fs::read(temp_dir.path().join("projection.csv")).unwrap();
        assert_eq!(data, b"new");
    }

    #[test]
    fn test_write_under_a_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("blocked"), b"").unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        let result = tokio_test::block_on(storage.write_file("blocked/projection.json", b"{}"));
        assert!(matches!(
            result,
            Err(crate::utils::error::ProjectionError::IoError(_))
        ));
    }
}
