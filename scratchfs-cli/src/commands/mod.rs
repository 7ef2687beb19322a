//! CLI command implementations.
//!
//! - `cleanup`: Unmount and delete a scratch tree
//! - `mounts`: List mount points inside a tree
//! - `stat`: Show metadata for a path
//! - `ls`: List a directory
//! - `mktemp`: Create a scratch directory
//! - `exists`: Test whether a path exists
//! - `completions`: Generate shell completion scripts

pub mod cleanup;
pub mod completions;
pub mod exists;
pub mod ls;
pub mod mktemp;
pub mod mounts;
pub mod stat;

pub use cleanup::CleanupCommand;
pub use completions::CompletionsCommand;
pub use exists::ExistsCommand;
pub use ls::LsCommand;
pub use mktemp::MktempCommand;
pub use mounts::MountsCommand;
pub use stat::StatCommand;
