//! Writing generated files to disk.

use std::path::PathBuf;

use eyre::{Result, WrapErr};

/// Outcome of [`File::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// An existing file was left alone.
    Skipped,
}

/// What to do when the destination already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    #[default]
    Always,
    IfMissing,
}

/// Bytes destined for one path in a generated project.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: Vec<u8>,
    overwrite: Overwrite,
}

impl File {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite: Overwrite::default(),
        }
    }

    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Write the content, creating missing parent directories.
    ///
    /// Errors name the path that could not be created or written.
    pub fn write(&self) -> Result<WriteResult> {
        if self.overwrite == Overwrite::IfMissing && self.path.exists() {
            return Ok(WriteResult::Skipped);
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
        }
        std::fs::write(&self.path, &self.content)
            .wrap_err_with(|| format!("failed to write '{}'", self.path.display()))?;
        Ok(WriteResult::Written)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("admin").join("css").join("x-admin.css");

        let result = File::new(&path, "body {}").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "body {}");
    }

    #[test]
    fn test_write_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.php");
        fs::write(&path, "original").unwrap();

        let result = File::new(&path, "updated").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_write_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("README.txt");
        fs::write(&path, "original").unwrap();

        let result = File::new(&path, "should not write")
            .with_overwrite(Overwrite::IfMissing)
            .write()
            .unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_write_if_missing_creates_new() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("new.txt");

        let file = File::new(&path, "new content").with_overwrite(Overwrite::IfMissing);

        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new content");
    }

    #[test]
    fn test_write_bytes_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("assets").join("icon.png");
        let bytes = vec![0x89, b'P', b'N', b'G', 0xff, 0x00];

        File::new(&path, bytes.clone()).write().unwrap();

        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_write_error_names_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("includes");
        fs::write(&blocker, "not a directory").unwrap();

        let err = File::new(blocker.join("index.php"), "x").write().unwrap_err();
        assert!(format!("{err:#}").contains("includes"));
    }
}
