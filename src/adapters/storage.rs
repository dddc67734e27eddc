use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

/// 以 `base_path` 為根目錄寫入匯出檔
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage
            .write_file("exports/products.json", b"[]")
            .await
            .unwrap();

        let data = std::fs::read(temp_dir.path().join("exports/products.json")).unwrap();
        assert_eq!(data, b"[]");
    }

    #[tokio::test]
    async fn test_write_replaces_previous_export() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("products.csv", b"old,longer").await.unwrap();
        storage.write_file("products.csv", b"new").await.unwrap();

        let data = std::fs::read(temp_dir.path().join("products.csv")).unwrap();
        assert_eq!(data, b"new");
    }
}
