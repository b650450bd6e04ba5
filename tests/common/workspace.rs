//! Scratch directory plus a service wired to it.

use std::path::PathBuf;

use pixelsmith::models::AppConfig;
use pixelsmith::services::ImageService;
use tempfile::TempDir;

/// Temporary directory holding test images, with an [`ImageService`]
pub struct TestWorkspace {
    dir: TempDir,
    pub service: ImageService,
}

impl TestWorkspace {
    /// Workspace using the default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            service: ImageService::new(config),
        }
    }

    /// Absolute path of `name` inside the workspace
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `bytes` to `name` and return its path
    pub fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, bytes).expect("Failed to write fixture");
        path
    }

    pub fn read(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.path(name)).expect("Failed to read output")
    }
}
