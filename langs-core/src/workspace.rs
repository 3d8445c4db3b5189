//! Temporary build context handed to the image build tool.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tracing::debug;

/// A temporary directory that holds the generated artifacts for one run.
///
/// The directory and everything in it is removed when the workspace is
/// dropped, whichever way the run ends.
#[derive(Debug)]
pub struct BuildWorkspace {
    dir: TempDir,
}

impl BuildWorkspace {
    /// Create a fresh workspace under the system temp directory.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("langs-").tempdir()?;
        debug!(path = %dir.path().display(), "created build workspace");
        Ok(Self { dir })
    }

    /// Create a fresh workspace under `parent`.
    pub fn new_in(parent: impl AsRef<Path>) -> io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("langs-")
            .tempdir_in(parent)?;
        debug!(path = %dir.path().display(), "created build workspace");
        Ok(Self { dir })
    }

    /// Workspace root, used as the build context.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to a new uniquely named file in the workspace.
    ///
    /// The file name is `prefix`, a random part, then `suffix`.
    pub fn add(&self, prefix: &str, suffix: &str, content: &str) -> io::Result<PathBuf> {
        let mut file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(self.dir.path())?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        let (_, path) = file.keep().map_err(|e| e.error)?;
        debug!(path = %path.display(), bytes = content.len(), "wrote workspace file");
        Ok(path)
    }

    /// Remove the workspace now, reporting any error.
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_add_writes_unique_files() {
        let workspace = BuildWorkspace::new().unwrap();

        let first = workspace.add("langs-", ".sh", "echo one\n").unwrap();
        let second = workspace.add("langs-", ".sh", "echo two\n").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with(workspace.path()));
        assert_eq!(fs::read_to_string(&first).unwrap(), "echo one\n");
        assert_eq!(fs::read_to_string(&second).unwrap(), "echo two\n");

        let name = first.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("langs-"));
        assert!(name.ends_with(".sh"));
    }

    #[test]
    fn test_drop_removes_workspace() {
        let parent = tempfile::tempdir().unwrap();
        let workspace = BuildWorkspace::new_in(parent.path()).unwrap();
        let root = workspace.path().to_path_buf();
        let file = workspace.add("Dockerfile.", "", "FROM scratch\n").unwrap();

        assert!(file.exists());
        drop(workspace);

        assert!(!root.exists());
        assert!(!file.exists());
    }

    #[test]
    fn test_close_removes_workspace() {
        let workspace = BuildWorkspace::new().unwrap();
        let root = workspace.path().to_path_buf();

        workspace.close().unwrap();
        assert!(!root.exists());
    }
}
