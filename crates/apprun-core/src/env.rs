//! Environment composition for the launched program.
//!
//! Search-path variables are only ever extended at the front: whatever the host
//! or a previous stage put there stays byte-for-byte at the tail.

use std::collections::BTreeMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::Path;

use tracing::debug;

/// Separator between entries of a search-path variable.
pub const PATH_LIST_SEPARATOR: &str = ":";

/// Read/write access to a set of environment variables.
pub trait Environment {
    fn var(&self, name: &str) -> Option<OsString>;
    fn set_var(&mut self, name: &str, value: &OsStr);
    fn remove_var(&mut self, name: &str);
}

/// The environment of the current process, inherited through `execv`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<OsString> {
        env::var_os(name)
    }

    fn set_var(&mut self, name: &str, value: &OsStr) {
        // SAFETY: the launchers never start a second thread.
        unsafe { env::set_var(name, value) };
    }

    fn remove_var(&mut self, name: &str) {
        // SAFETY: the launchers never start a second thread.
        unsafe { env::remove_var(name) };
    }
}

/// In-memory environment for composing without side effects.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, OsString>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl AsRef<OsStr>) -> Self {
        self.set_var(name, value.as_ref());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_os_str()))
    }
}

impl Environment for MemoryEnv {
    fn var(&self, name: &str) -> Option<OsString> {
        self.vars.get(name).cloned()
    }

    fn set_var(&mut self, name: &str, value: &OsStr) {
        self.vars.insert(name.to_owned(), value.to_owned());
    }

    fn remove_var(&mut self, name: &str) {
        self.vars.remove(name);
    }
}

/// Puts `dir` in front of the search path `name`.
///
/// An unset variable becomes exactly `dir`; otherwise the old value follows
/// the separator unchanged.
pub fn prepend_search_path(env: &mut impl Environment, name: &str, dir: &Path) {
    let value = match env.var(name) {
        None => dir.as_os_str().to_owned(),
        Some(old) => {
            let mut value = dir.as_os_str().to_owned();
            value.push(PATH_LIST_SEPARATOR);
            value.push(old);
            value
        }
    };
    debug!(var = name, value = %value.to_string_lossy(), "prepended search path");
    env.set_var(name, &value);
}

pub fn set_fixed(env: &mut impl Environment, name: &str, value: impl AsRef<OsStr>) {
    env.set_var(name, value.as_ref());
}

/// Records the current value of `name` under `marker`.
///
/// Always overwrites, so the marker holds what this stage inherited. An unset
/// variable is recorded as the empty string.
pub fn save_search_path(env: &mut impl Environment, name: &str, marker: &str) {
    let original = env.var(name).unwrap_or_default();
    env.set_var(marker, &original);
}

/// Resets `name` to the value saved under `marker` and prepends `dir`.
///
/// Without a marker the current value is saved first. Running this any number
/// of times leaves exactly one `dir` in front of the saved value.
pub fn restore_and_prepend(env: &mut impl Environment, name: &str, marker: &str, dir: &Path) {
    if env.var(marker).is_none() {
        save_search_path(env, name, marker);
    }

    match env.var(marker) {
        Some(saved) if !saved.is_empty() => env.set_var(name, &saved),
        _ => env.remove_var(name),
    }
    prepend_search_path(env, name, dir);
}
