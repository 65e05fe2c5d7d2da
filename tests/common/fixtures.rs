// Test fixtures for integration testing

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directory tree fixture with synthetic files
#[allow(dead_code)] // Used in integration tests
pub struct TestTree {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

#[allow(dead_code)] // Used in integration tests
impl TestTree {
    /// Create a tree with one file per relative path
    ///
    /// File content is the relative path itself.
    pub fn with_files(paths: &[&str]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut files = Vec::new();

        for rel in paths {
            let path = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create directories");
            }
            fs::write(&path, rel.as_bytes()).expect("Failed to write file");
            files.push(path);
        }

        Self { dir, files }
    }

    /// `a.txt`, `b.py`, `sub/c.txt`
    pub fn basic() -> Self {
        Self::with_files(&["a.txt", "b.py", "sub/c.txt"])
    }

    /// A home-directory-like tree with noise directories
    pub fn home_like() -> Self {
        Self::with_files(&[
            "Documents/report.pdf",
            "Documents/Notes.TXT",
            "projects/app/main.py",
            "projects/app/.git/HEAD",
            "projects/app/node_modules/lib/index.js",
            "projects/app/__pycache__/main.cpython-312.pyc",
            ".cache/temp.txt",
            "Music/song.mp3",
        ])
    }

    /// `count` files named `file_<n>.txt` directly under the root
    pub fn flat(count: usize) -> Self {
        let names: Vec<String> = (0..count).map(|i| format!("file_{i:04}.txt")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        Self::with_files(&refs)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}
