//! Use cases - one per orchestration pattern

pub mod ask;
pub mod consensus;
pub mod council;
pub mod debate;
pub(crate) mod shared;
