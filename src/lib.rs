//! Layered YAML Configuration Store
//!
//! Loads an ordered list of YAML files, deep-merges them into one working
//! tree, and reads or mutates values by dotted (or custom-separator) path.
//! Mutations are mirrored into a persist tree that `save` writes back to the
//! last file in the list, so earlier files stay read-only inputs.

pub mod cli;
pub mod error;
pub mod merge;
pub mod path;
pub mod store;

pub use error::{ConfigError, Result};
pub use merge::{deep_merge, deep_merge_all};
pub use store::{ConfigStore, DEFAULT_SEPARATOR, LoadOptions};
