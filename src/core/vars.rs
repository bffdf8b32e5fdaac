//! Typed variable store for tuneq.
//!
//! The store is the single source of truth for band gains: the panel reads and writes
//! through [VarStore] on every access and never caches values itself.
//!
//! [Vars] is the shipped implementation. It keeps variables in memory and persists
//! only the keys it is explicitly asked to save, merged into a flat TOML file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// Errors raised while persisting the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access variable file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse variable file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize variables: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Key → typed value store, read and written by key name.
pub trait VarStore {
    /// Returns the value of `name` as a float. Missing or non-numeric values read as `0.0`.
    fn get_float(&self, name: &str) -> f32;

    fn set_float(&mut self, name: &str, val: f32);

    /// Writes the listed variables to durable storage in one go.
    fn save_vars(&mut self, names: &[&str]) -> Result<(), StoreError>;
}

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Var {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Var {
    fn as_float(&self) -> Option<f64> {
        match self {
            Var::Float(f) => Some(*f),
            Var::Int(i) => Some(*i as f64),
            Var::Str(s) => s.trim().parse().ok(),
            Var::Bool(_) => None,
        }
    }
}

/// In-memory variable map with an optional backing TOML file.
#[derive(Debug, Default)]
pub struct Vars {
    vars: BTreeMap<String, Var>,
    path: Option<PathBuf>,
}

impl Vars {
    /// A store with no backing file. Saving is a no-op.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the store from `path`.
    ///
    /// A missing file yields an empty store bound to `path`, so the first save creates it.
    /// A malformed file is reported through the log and also yields an empty store.
    pub fn load(path: &Path) -> Self {
        let vars = match read_table(path) {
            Ok(vars) => vars,
            Err(e) => {
                log::warn!("{}; starting with empty variables", e);
                BTreeMap::new()
            }
        };
        log::debug!("loaded {} variables from {:?}", vars.len(), path);
        Self {
            vars,
            path: Some(path.to_path_buf()),
        }
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Var> {
        self.vars.get(name)
    }

    pub fn set(&mut self, name: &str, var: Var) {
        self.vars.insert(name.to_string(), var);
    }
}

impl VarStore for Vars {
    fn get_float(&self, name: &str) -> f32 {
        self.vars
            .get(name)
            .and_then(Var::as_float)
            .unwrap_or(0.0) as f32
    }

    fn set_float(&mut self, name: &str, val: f32) {
        self.set(name, Var::Float(val as f64));
    }

    fn save_vars(&mut self, names: &[&str]) -> Result<(), StoreError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        // Re-read so keys written by others since load survive the save. A file that no
        // longer parses is replaced, matching what `load` already fell back to.
        let mut on_disk = match read_table(path) {
            Ok(table) => table,
            Err(e @ StoreError::Parse { .. }) => {
                log::warn!("{}; overwriting it", e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        for name in names {
            if let Some(var) = self.vars.get(*name) {
                on_disk.insert((*name).to_string(), var.clone());
            }
        }

        let content = toml::to_string(&on_disk)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("saved {} variables to {:?}", names.len(), path);
        Ok(())
    }
}

fn read_table(path: &Path) -> Result<BTreeMap<String, Var>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use tempfile::tempdir;

    #[test]
    fn missing_values_read_as_zero() {
        let store = Vars::in_memory();
        assert_eq!(store.get_float("eq-preamp"), 0.0);
    }

    #[test]
    fn typed_values_coerce_to_float() {
        let mut store = Vars::in_memory();
        store.set("a", Var::Int(-3));
        store.set("b", Var::Str(" 4.5 ".into()));
        store.set("c", Var::Bool(true));
        assert_eq!(store.get_float("a"), -3.0);
        assert_eq!(store.get_float("b"), 4.5);
        assert_eq!(store.get_float("c"), 0.0);
    }

    #[test]
    fn save_writes_only_named_keys() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("vars.toml");

        let mut store = Vars::load(&path);
        store.set_float("eq-preamp", 6.0);
        store.set_float("volume", 40.0);
        store.save_vars(&["eq-preamp"])?;

        let reloaded = Vars::load(&path);
        assert_eq!(reloaded.get_float("eq-preamp"), 6.0);
        assert!(reloaded.get("volume").is_none());
        Ok(())
    }

    #[test]
    fn save_preserves_unrelated_keys_on_disk() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("vars.toml");
        fs::write(&path, "player-name = \"deck\"\nvolume = 70\n")?;

        let mut store = Vars::load(&path);
        store.set_float("eq-band3", -8.0);
        store.save_vars(&["eq-band3"])?;

        let reloaded = Vars::load(&path);
        assert_eq!(reloaded.get("player-name"), Some(&Var::Str("deck".into())));
        assert_eq!(reloaded.get_float("volume"), 70.0);
        assert_eq!(reloaded.get_float("eq-band3"), -8.0);
        Ok(())
    }

    #[test]
    fn malformed_file_loads_empty() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("vars.toml");
        fs::write(&path, "this is = = not toml")?;

        let store = Vars::load(&path);
        assert_eq!(store.get_float("eq-preamp"), 0.0);
        assert_eq!(store.path(), Some(path.as_path()));
        Ok(())
    }

    #[test]
    fn save_replaces_malformed_file() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("vars.toml");
        fs::write(&path, "this is = = not toml")?;

        let mut store = Vars::load(&path);
        store.set_float("eq-preamp", 2.0);
        store.save_vars(&["eq-preamp"])?;

        let reloaded = Vars::load(&path);
        assert_eq!(reloaded.get_float("eq-preamp"), 2.0);
        Ok(())
    }

    #[test]
    fn in_memory_save_is_noop() -> Result<(), Box<dyn error::Error>> {
        let mut store = Vars::in_memory();
        store.set_float("eq-preamp", 1.0);
        store.save_vars(&["eq-preamp"])?;
        assert_eq!(store.get_float("eq-preamp"), 1.0);
        Ok(())
    }
}
