use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use std::path::PathBuf;

/// Writes output files into an existing directory, replacing files of the same name.
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

    /// Storage rooted at the configured output directory.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.output_path())
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = self.base_path.join(path);
        tokio::fs::write(&full_path, data).await?;
        Ok(full_path.display().to_string())
    }
}
