//! Layered configuration store with write-back persistence tracking.
//!
//! A [`ConfigStore`] loads an ordered list of YAML files and deep-merges them
//! into a single working tree; later files override earlier ones. Two trees
//! are kept per store:
//!
//! - the **working tree**: the fully merged view, used for all reads
//! - the **persist tree**: the last file's own contents, which is what
//!   [`ConfigStore::save`] writes back to disk
//!
//! Every `set`/`delete` is applied to both trees, so values mutated after
//! load survive a save while values merged in from earlier files do not leak
//! into the last file.

use crate::error::{ConfigError, Result};
use crate::merge::deep_merge_all;
use crate::path::{delete_path, get_path, set_path, split};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default key-path separator.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Options for [`ConfigStore::load`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Skip configuration files that do not exist instead of failing
    /// with [`ConfigError::NonExistent`].
    pub ignore_non_existing: bool,
}

/// Layered configuration store.
///
/// The file list is fixed at construction; the last entry is the save
/// target. Construction never touches the filesystem.
///
/// # Example
/// ```no_run
/// use confstack::{ConfigStore, LoadOptions};
///
/// # async fn demo() -> confstack::Result<()> {
/// let mut store = ConfigStore::new(["defaults.yaml", "local.yaml"])?;
/// store.load(LoadOptions::default()).await?;
///
/// let _port = store.get("server.port");
/// store.set("server.port", 9000);
/// store.save()?; // writes local.yaml only
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigStore {
    /// Configured files in merge precedence order; the last is the save target.
    files: Vec<PathBuf>,
    /// Fully merged view across all loaded files.
    working: Value,
    /// Contents destined for the save target.
    persist: Value,
}

impl ConfigStore {
    /// Create a store over an ordered list of configuration files.
    ///
    /// Accepts anything iterable into paths, so a single file works too:
    /// `ConfigStore::new(["config.yaml"])`. Fails with
    /// [`ConfigError::NoFiles`] when the list is empty.
    pub fn new<I, P>(files: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let files: Vec<PathBuf> = files.into_iter().map(Into::into).collect();
        if files.is_empty() {
            return Err(ConfigError::NoFiles);
        }

        Ok(Self {
            files,
            working: Value::Object(Map::new()),
            persist: Value::Object(Map::new()),
        })
    }

    /// The configured file list, in merge precedence order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The file that [`ConfigStore::save`] writes to.
    pub fn target_file(&self) -> &Path {
        // files is non-empty by construction
        &self.files[self.files.len() - 1]
    }

    /// The fully merged working tree.
    pub fn working(&self) -> &Value {
        &self.working
    }

    /// The tree that [`ConfigStore::save`] would write.
    pub fn persist_tree(&self) -> &Value {
        &self.persist
    }

    /// Read every configured file, parse it as YAML, and deep-merge the
    /// results in list order into the working tree.
    ///
    /// The persist tree is reset to the raw (pre-merge) contents of the last
    /// successfully loaded file; when trailing files are skipped via
    /// `ignore_non_existing`, that designation shifts back to the previous
    /// existing file.
    ///
    /// Nothing is committed on failure: the trees keep their pre-call state.
    /// Calling `load` again re-reads from disk and discards any in-memory
    /// mutations made since the previous load.
    pub async fn load(&mut self, options: LoadOptions) -> Result<&Value> {
        let mut contents: Vec<Value> = Vec::with_capacity(self.files.len());

        // Await strictly in list order: merge precedence and the
        // "last successfully loaded" designation depend on it.
        for file in &self.files {
            let text = match tokio::fs::read_to_string(file).await {
                Ok(text) => text,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    if options.ignore_non_existing {
                        warn!("skipping missing configuration file {}", file.display());
                        continue;
                    }
                    return Err(ConfigError::NonExistent { path: file.clone() });
                }
                Err(err) => {
                    return Err(ConfigError::Io {
                        path: file.clone(),
                        source: err,
                    });
                }
            };

            let parsed: Value =
                serde_yaml::from_str(&text).map_err(|err| ConfigError::Syntax {
                    path: file.clone(),
                    source: err,
                })?;

            debug!("loaded configuration file {}", file.display());
            contents.push(parsed);
        }

        // Every file parsed; commit both trees at once.
        self.persist = match contents.last() {
            Some(last) => last.clone(),
            None => Value::Object(Map::new()),
        };
        self.working = if contents.is_empty() {
            Value::Object(Map::new())
        } else {
            deep_merge_all(contents)
        };

        Ok(&self.working)
    }

    /// Get the value at a `.`-separated path, or the whole working tree for
    /// an empty path. Missing paths return `None`, never an error.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.get_with(path, DEFAULT_SEPARATOR)
    }

    /// [`ConfigStore::get`] with a custom separator.
    pub fn get_with(&self, path: &str, separator: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.working);
        }
        get_path(&self.working, &split(path, separator))
    }

    /// Get the value at a path deserialized into a concrete type.
    ///
    /// Returns `None` when the path is absent or the value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.get_as_with(path, DEFAULT_SEPARATOR)
    }

    /// [`ConfigStore::get_as`] with a custom separator.
    pub fn get_as_with<T: DeserializeOwned>(&self, path: &str, separator: &str) -> Option<T> {
        self.get_with(path, separator)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Set the value at a `.`-separated path in both the working tree and
    /// the persist tree, creating intermediate mappings as needed on each
    /// tree independently. An empty path is a no-op.
    ///
    /// Returns the updated working tree.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> &Value {
        self.set_with(path, value, DEFAULT_SEPARATOR)
    }

    /// [`ConfigStore::set`] with a custom separator.
    pub fn set_with(&mut self, path: &str, value: impl Into<Value>, separator: &str) -> &Value {
        if !path.is_empty() {
            let value = value.into();
            let segments = split(path, separator);
            set_path(&mut self.working, &segments, value.clone());
            set_path(&mut self.persist, &segments, value);
        }
        &self.working
    }

    /// Delete the value at a `.`-separated path from both trees. An empty
    /// path, or a path whose intermediate levels do not exist, is a silent
    /// no-op, consistent with [`ConfigStore::get`]'s absence tolerance.
    ///
    /// Returns the updated working tree.
    pub fn delete(&mut self, path: &str) -> &Value {
        self.delete_with(path, DEFAULT_SEPARATOR)
    }

    /// [`ConfigStore::delete`] with a custom separator.
    pub fn delete_with(&mut self, path: &str, separator: &str) -> &Value {
        if !path.is_empty() {
            let segments = split(path, separator);
            delete_path(&mut self.working, &segments);
            delete_path(&mut self.persist, &segments);
        }
        &self.working
    }

    /// Serialize the persist tree to YAML and overwrite the last configured
    /// file. The other configured files are never written.
    ///
    /// Explicit and idempotent; no write ever happens automatically.
    pub fn save(&self) -> Result<()> {
        let yaml = serde_yaml::to_string(&self.persist).map_err(ConfigError::Serialize)?;

        let target = self.target_file();
        std::fs::write(target, yaml).map_err(|err| ConfigError::Io {
            path: target.to_path_buf(),
            source: err,
        })?;

        debug!("saved configuration to {}", target.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_file_list_rejected() {
        let result = ConfigStore::new(Vec::<PathBuf>::new());
        assert!(matches!(result, Err(ConfigError::NoFiles)));
    }

    #[test]
    fn test_single_file_accepted() {
        let store = ConfigStore::new(["config.yaml"]).unwrap();
        assert_eq!(store.files().len(), 1);
        assert_eq!(store.target_file(), Path::new("config.yaml"));
    }

    #[test]
    fn test_target_file_is_last() {
        let store = ConfigStore::new(["a.yaml", "b.yaml", "c.yaml"]).unwrap();
        assert_eq!(store.target_file(), Path::new("c.yaml"));
    }

    #[test]
    fn test_set_empty_path_is_noop() {
        let mut store = ConfigStore::new(["config.yaml"]).unwrap();
        store.set("top", 1);
        let before = store.working().clone();
        store.set("", 99);
        assert_eq!(store.working(), &before);
    }

    #[test]
    fn test_set_updates_both_trees() {
        let mut store = ConfigStore::new(["config.yaml"]).unwrap();
        store.set("a.b", json!([1, 2]));
        assert_eq!(store.working(), &json!({"a": {"b": [1, 2]}}));
        assert_eq!(store.persist_tree(), &json!({"a": {"b": [1, 2]}}));
    }

    #[test]
    fn test_delete_missing_path_is_noop() {
        let mut store = ConfigStore::new(["config.yaml"]).unwrap();
        store.set("a.b", 1);
        store.delete("a.x.y");
        assert_eq!(store.working(), &json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_get_with_custom_separator() {
        let mut store = ConfigStore::new(["config.yaml"]).unwrap();
        store.set("a.b.c", 3);
        assert_eq!(store.get_with("a/b/c", "/"), Some(&json!(3)));
        assert_eq!(store.get("a.b.c"), Some(&json!(3)));
    }

    #[test]
    fn test_get_as_typed() {
        let mut store = ConfigStore::new(["config.yaml"]).unwrap();
        store.set("server.port", 9000);
        assert_eq!(store.get_as::<u16>("server.port"), Some(9000));
        assert_eq!(store.get_as::<String>("server.port"), None);
        assert_eq!(store.get_as::<u16>("server.missing"), None);
    }
}
