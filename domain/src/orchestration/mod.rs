//! Orchestration domain
//!
//! Per-agent results and the records each multi-agent pattern produces:
//! consensus, debate and council.

pub mod consensus;
pub mod council;
pub mod debate;
pub mod entities;
pub mod value_objects;
