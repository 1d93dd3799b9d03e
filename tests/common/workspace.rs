//! Temporary directory holding corpus, config and dataset files.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::fixtures;

/// Scratch directory for file-based tests, removed on drop
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Workspace pre-filled with the tiny corpus and the three-cluster dataset
    pub fn with_fixtures() -> Self {
        let ws = Self::new();
        ws.write("c3.json", fixtures::TINY_CORPUS);
        ws.write("clusters.json", fixtures::THREE_CLUSTERS);
        ws
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` inside the workspace and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
