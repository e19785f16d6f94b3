//! File discovery: the regular files directly inside a directory.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists candidate files one level deep.
pub struct FileDiscovery;

impl FileDiscovery {
    /// Return every regular file directly inside `dir`.
    ///
    /// Subdirectories are neither returned nor descended into. Symlinks to
    /// files are followed. Fails only if `dir` itself cannot be read;
    /// unreadable entries are logged and left out.
    pub fn discover(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            if entry.file_type().is_file() {
                files.push(entry.into_path());
            } else {
                tracing::debug!("Ignoring non-file entry {:?}", entry.path());
            }
        }

        // Sort by path for deterministic ordering
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_is_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.heic"), b"x").unwrap();
        std::fs::write(dir.path().join("a.nef"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested.d")).unwrap();
        std::fs::write(dir.path().join("nested.d").join("deep.nef"), b"x").unwrap();

        let files = FileDiscovery::discover(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.nef"), dir.path().join("b.heic")]
        );
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileDiscovery::discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(FileDiscovery::discover(&missing).is_err());
    }
}
