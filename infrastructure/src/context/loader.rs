//! Local file system context loader
//!
//! This module provides the [`LocalContextLoader`] implementation of
//! [`ContextLoaderPort`] that reads the shared context files:
//!
//! 1. `<project>/.claude/CLAUDE.md` - project instructions
//! 2. `~/.claude/projects/<slug>/memory/MEMORY.md` - per-project memory
//!
//! Missing, empty and unreadable files are skipped; the loader never fails.

use council_application::ContextLoaderPort;
use council_domain::{KnownContextFile, LoadedContextFile};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Context loader that reads from the local file system.
#[derive(Debug, Clone, Default)]
pub struct LocalContextLoader {
    home: Option<PathBuf>,
}

impl LocalContextLoader {
    /// Creates a loader that resolves the home directory via `dirs`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `home` instead of the user's home directory.
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone().or_else(dirs::home_dir)
    }

    /// Loads a single file from a path.
    ///
    /// Returns `None` if the file doesn't exist, is not a regular file,
    /// is blank, or can't be read. Content is trimmed.
    fn load_single_file(
        &self,
        file_type: KnownContextFile,
        path: &Path,
    ) -> Option<LoadedContextFile> {
        if !path.is_file() {
            return None;
        }
        match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => {
                debug!("Skipping empty file: {:?}", path);
                None
            }
            Ok(content) => {
                debug!("Loaded context file: {:?}", path);
                Some(LoadedContextFile::new(file_type, path, content.trim()))
            }
            Err(e) => {
                warn!("Failed to read file {:?}: {}", path, e);
                None
            }
        }
    }
}

impl ContextLoaderPort for LocalContextLoader {
    fn load_known_files(&self, project_root: &Path) -> Vec<LoadedContextFile> {
        let Some(home) = self.home_dir() else {
            warn!("No home directory; project memory will not be loaded");
            let file_type = KnownContextFile::ProjectInstructions;
            let path = file_type.path_for(project_root, Path::new(""));
            return self.load_single_file(file_type, &path).into_iter().collect();
        };

        let files: Vec<LoadedContextFile> = KnownContextFile::all()
            .into_iter()
            .filter_map(|file_type| {
                let path = file_type.path_for(project_root, &home);
                self.load_single_file(file_type, &path)
            })
            .collect();

        debug!(
            "Loaded {} context files for {:?}",
            files.len(),
            project_root
        );
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::context::project_slug;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_loads_instructions_and_memory() {
        let project = tempdir().unwrap();
        let home = tempdir().unwrap();
        write(
            &project.path().join(".claude/CLAUDE.md"),
            "\n  Use tabs.  \n",
        );
        write(
            &home
                .path()
                .join(".claude/projects")
                .join(project_slug(project.path()))
                .join("memory/MEMORY.md"),
            "Prefers short answers",
        );

        let loader = LocalContextLoader::new().with_home(home.path());
        let files = loader.load_known_files(project.path());

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_type, KnownContextFile::ProjectInstructions);
        assert_eq!(files[0].content, "Use tabs.");
        assert_eq!(files[1].file_type, KnownContextFile::ProjectMemory);

        let preamble = loader.load_preamble(project.path()).unwrap();
        assert!(preamble.text().contains("[CLAUDE.md]\nUse tabs."));
        assert!(preamble.text().contains("[MEMORY.md]\nPrefers short answers"));
    }

    #[test]
    fn test_missing_and_blank_files_are_skipped() {
        let project = tempdir().unwrap();
        let home = tempdir().unwrap();
        write(&project.path().join(".claude/CLAUDE.md"), "   \n");

        let loader = LocalContextLoader::new().with_home(home.path());
        assert!(loader.load_known_files(project.path()).is_empty());
        assert!(loader.load_preamble(project.path()).is_none());
    }

    #[test]
    fn test_directory_in_place_of_file_is_skipped() {
        let project = tempdir().unwrap();
        let home = tempdir().unwrap();
        fs::create_dir_all(project.path().join(".claude/CLAUDE.md")).unwrap();

        let loader = LocalContextLoader::new().with_home(home.path());
        assert!(loader.load_known_files(project.path()).is_empty());
    }
}
