//! Value objects for the shared context preamble

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PREAMBLE_HEADER: &str = "=== Shared Project Context (read-only) ===";
const PREAMBLE_FOOTER: &str = "=== End Shared Context ===";

/// Context files that feed the preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownContextFile {
    /// Project instructions, kept inside the project tree.
    ProjectInstructions,
    /// Per-project memory, kept under the user's home directory.
    ProjectMemory,
}

impl KnownContextFile {
    pub fn all() -> [KnownContextFile; 2] {
        [
            KnownContextFile::ProjectInstructions,
            KnownContextFile::ProjectMemory,
        ]
    }

    /// Label used as the section heading in the preamble.
    pub fn label(&self) -> &'static str {
        match self {
            KnownContextFile::ProjectInstructions => "CLAUDE.md",
            KnownContextFile::ProjectMemory => "MEMORY.md",
        }
    }

    /// Resolve the on-disk location of this file for a project.
    ///
    /// `home` is passed in so the resolution stays pure.
    pub fn path_for(&self, project_root: &Path, home: &Path) -> PathBuf {
        match self {
            KnownContextFile::ProjectInstructions => {
                project_root.join(".claude").join("CLAUDE.md")
            }
            KnownContextFile::ProjectMemory => home
                .join(".claude")
                .join("projects")
                .join(project_slug(project_root))
                .join("memory")
                .join("MEMORY.md"),
        }
    }
}

impl std::fmt::Display for KnownContextFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Memory directory slug for a project: every `/` becomes `-`, leading
/// dashes stripped (`/home/user/app` → `home-user-app`).
pub fn project_slug(project_root: &Path) -> String {
    project_root
        .to_string_lossy()
        .replace('/', "-")
        .trim_start_matches('-')
        .to_string()
}

/// A context file that was found and read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedContextFile {
    pub file_type: KnownContextFile,
    pub path: PathBuf,
    pub content: String,
}

impl LoadedContextFile {
    pub fn new(
        file_type: KnownContextFile,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            file_type,
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Rendered read-only preamble prepended to outbound prompts.
///
/// Loaded once per call and shared by every invocation of that call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPreamble {
    text: String,
}

impl ContextPreamble {
    /// Render the preamble from the instruction and memory file contents.
    ///
    /// Blank sections are skipped. Returns `None` when both are blank.
    pub fn from_sections(instructions: Option<&str>, memory: Option<&str>) -> Option<Self> {
        let sections: Vec<(KnownContextFile, &str)> = [
            (KnownContextFile::ProjectInstructions, instructions),
            (KnownContextFile::ProjectMemory, memory),
        ]
        .into_iter()
        .filter_map(|(kind, content)| {
            content
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(|c| (kind, c))
        })
        .collect();

        if sections.is_empty() {
            return None;
        }

        let mut lines = vec![PREAMBLE_HEADER.to_string(), String::new()];
        for (kind, content) in sections {
            lines.push(format!("[{}]\n{}\n", kind.label(), content));
        }
        lines.push(PREAMBLE_FOOTER.to_string());

        Some(Self {
            text: lines.join("\n"),
        })
    }

    /// Build the preamble from loaded files (order-insensitive).
    pub fn from_files(files: &[LoadedContextFile]) -> Option<Self> {
        let find = |kind: KnownContextFile| {
            files
                .iter()
                .find(|f| f.file_type == kind)
                .map(|f| f.content.as_str())
        };
        Self::from_sections(
            find(KnownContextFile::ProjectInstructions),
            find(KnownContextFile::ProjectMemory),
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
