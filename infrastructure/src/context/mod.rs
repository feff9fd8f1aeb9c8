//! Context loading infrastructure
//!
//! - [`LocalContextLoader`] - reads the shared context files from disk
//!
//! It implements the [`ContextLoaderPort`] trait defined in the
//! application layer.
//!
//! [`ContextLoaderPort`]: council_application::ContextLoaderPort

mod loader;

pub use loader::LocalContextLoader;
