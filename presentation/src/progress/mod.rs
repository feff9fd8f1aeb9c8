//! Progress reporters implementing the `ProgressNotifier` port

pub mod reporter;
