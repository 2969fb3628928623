//! File discovery for finding images directly inside a folder.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PipelineError, PipelineResult};

/// Order in which discovered files are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOrder {
    /// Lexicographic by path; used when files become frames.
    Sorted,
    /// Whatever order the filesystem yields; used for independent per-file work.
    Directory,
}

/// Discovers image files in a folder, filtered by an extension allow-list.
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    extensions: Vec<String>,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileDiscovery {
    /// Create a discovery instance accepting the given extensions.
    ///
    /// Extensions may be given with or without a leading dot, in any case.
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// List the supported files directly inside `folder` (non-recursive).
    ///
    /// Fails with `InvalidFolder` if `folder` is missing or not a directory.
    /// An empty result is not an error.
    pub fn discover(&self, folder: &Path, order: FrameOrder) -> PipelineResult<Vec<DiscoveredFile>> {
        if !folder.is_dir() {
            return Err(PipelineError::InvalidFolder(folder.to_path_buf()));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|e| PipelineError::Io {
                path: folder.to_path_buf(),
                source: e.into(),
            })?;
            let entry_path = entry.path();
            if entry.file_type().is_file() && self.is_supported(entry_path) {
                let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                files.push(DiscoveredFile {
                    path: entry_path.to_path_buf(),
                    size,
                });
            }
        }

        if order == FrameOrder::Sorted {
            files.sort_by(|a, b| a.path.cmp(&b.path));
        }
        tracing::debug!("Discovered {} file(s) in {:?}", files.len(), folder);
        Ok(files)
    }

    /// Like [`discover`](Self::discover) but returns only the paths.
    pub fn discover_paths(&self, folder: &Path, order: FrameOrder) -> PipelineResult<Vec<PathBuf>> {
        Ok(self
            .discover(folder, order)?
            .into_iter()
            .map(|f| f.path)
            .collect())
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext_lower)
            })
            .unwrap_or(false)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(&["png", ".JPG", "jpeg"]);

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("IMG.PNG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(!discovery.is_supported(Path::new("test.tiff")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("png")));
    }

    #[test]
    fn test_discover_filters_extensions_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "IMG.PNG", "b.jpeg", "c.Tiff", "notes.txt", "d.gif"] {
            touch(dir.path(), name);
        }

        let discovery = FileDiscovery::new(&["png", "jpg", "jpeg"]);
        let found: HashSet<String> = names(
            &discovery
                .discover_paths(dir.path(), FrameOrder::Directory)
                .unwrap(),
        )
        .into_iter()
        .collect();

        let expected: HashSet<String> = ["a.png", "IMG.PNG", "b.jpeg"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_discover_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "top.png");
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        touch(&nested, "inner.png");
        // A directory whose name looks like an image is skipped too
        std::fs::create_dir(dir.path().join("folder.png")).unwrap();

        let discovery = FileDiscovery::new(&["png"]);
        let found = discovery
            .discover_paths(dir.path(), FrameOrder::Sorted)
            .unwrap();
        assert_eq!(names(&found), ["top.png"]);
    }

    #[test]
    fn test_sorted_order_is_lexicographic() {
        let dir = tempfile::tempdir().unwrap();
        // Created out of order so creation time disagrees with name order
        for name in ["frame_003.png", "frame_001.png", "frame_010.png", "frame_002.png"] {
            touch(dir.path(), name);
        }

        let discovery = FileDiscovery::new(&["png"]);
        let found = discovery
            .discover_paths(dir.path(), FrameOrder::Sorted)
            .unwrap();
        assert_eq!(
            names(&found),
            ["frame_001.png", "frame_002.png", "frame_003.png", "frame_010.png"]
        );
    }

    #[test]
    fn test_missing_folder_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let discovery = FileDiscovery::new(&["png"]);

        let err = discovery
            .discover(&missing, FrameOrder::Sorted)
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidFolder(p) if p == missing));
    }

    #[test]
    fn test_file_instead_of_folder_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.png");
        let discovery = FileDiscovery::new(&["png"]);

        assert!(discovery
            .discover(&dir.path().join("a.png"), FrameOrder::Sorted)
            .is_err());
    }

    #[test]
    fn test_empty_folder_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let discovery = FileDiscovery::new(&["png"]);
        assert!(discovery
            .discover(dir.path(), FrameOrder::Directory)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_total_size() {
        let files = vec![
            DiscoveredFile {
                path: PathBuf::from("a.jpg"),
                size: 100,
            },
            DiscoveredFile {
                path: PathBuf::from("b.jpg"),
                size: 200,
            },
        ];

        assert_eq!(FileDiscovery::total_size(&files), 300);
    }
}
