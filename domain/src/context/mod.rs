//! Shared project context
//!
//! Every outbound prompt may be prefixed with a read-only preamble built
//! from two caller-maintained files:
//!
//! - [`KnownContextFile::ProjectInstructions`] — `<project>/.claude/CLAUDE.md`
//! - [`KnownContextFile::ProjectMemory`] — `~/.claude/projects/<slug>/memory/MEMORY.md`
//!
//! The files are read by an infrastructure loader; this module only knows
//! their locations and how to render them.
//!
//! # Example
//!
//! ```
//! use council_domain::context::ContextPreamble;
//!
//! let preamble = ContextPreamble::from_sections(Some("Build with cargo."), None).unwrap();
//! assert!(preamble.text().contains("[CLAUDE.md]\nBuild with cargo."));
//! ```

mod value_objects;

pub use value_objects::{ContextPreamble, KnownContextFile, LoadedContextFile, project_slug};
