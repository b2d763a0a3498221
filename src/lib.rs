//! zipls - ls inside of a zip file
//!
//! This library reads the central directory of a zip archive, indexes its entries as a
//! directory tree, and renders listings the way `ls` would for a real directory.

pub mod archive;
pub mod cli;
pub mod error;
pub mod filter;
pub mod format;
pub mod list;
pub mod style;
pub mod tree;
pub mod utils;

// re-export main types for convenience
pub use error::Result;
pub use format::ListOptions;
