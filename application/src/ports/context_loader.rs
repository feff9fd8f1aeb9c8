//! Context loader port
//!
//! Supplies the shared read-only preamble prepended to outbound prompts.

use council_domain::{ContextPreamble, LoadedContextFile};
use std::path::Path;

/// Loads shared project context files.
pub trait ContextLoaderPort: Send + Sync {
    /// Read every known context file that exists and is non-empty.
    ///
    /// Unreadable files are skipped, never reported as errors.
    fn load_known_files(&self, project_root: &Path) -> Vec<LoadedContextFile>;

    /// Build the preamble for a project, if any context exists.
    fn load_preamble(&self, project_root: &Path) -> Option<ContextPreamble> {
        ContextPreamble::from_files(&self.load_known_files(project_root))
    }
}

/// Context loader that never finds anything.
pub struct NoContext;

impl ContextLoaderPort for NoContext {
    fn load_known_files(&self, _project_root: &Path) -> Vec<LoadedContextFile> {
        Vec::new()
    }
}
