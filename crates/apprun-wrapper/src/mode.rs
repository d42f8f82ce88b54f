//! How the real program gets started.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use apprun_core::{BundleContext, Error, LaunchPlan, Result};

/// Launch mode chosen at packaging time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchKind {
    Dynamic,
    Static,
    Script,
}

impl LaunchKind {
    /// Parses a build-time mode name. Unset or empty means [`LaunchKind::Dynamic`].
    ///
    /// # Panics
    ///
    /// On any other name. Evaluated in a `const`, that stops the build.
    pub const fn from_build(mode: Option<&str>) -> Self {
        let name = match mode {
            Some(name) => name,
            None => return Self::Dynamic,
        };
        if name.is_empty() || same(name, "dynamic") {
            Self::Dynamic
        } else if same(name, "static") {
            Self::Static
        } else if same(name, "script") {
            Self::Script
        } else {
            panic!("unknown launch mode in APPRUN_LAUNCH_MODE (expected dynamic, static or script)")
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Dynamic => "dynamic",
            Self::Static => "static",
            Self::Script => "script",
        }
    }
}

const fn same(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Packaging-time choices baked into this wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    pub real_exe: Option<&'static str>,
    pub mode: LaunchKind,
}

impl BuildConfig {
    pub const CURRENT: Self = Self {
        real_exe: option_env!("APPRUN_REAL_EXE"),
        mode: LaunchKind::from_build(option_env!("APPRUN_LAUNCH_MODE")),
    };

    /// Name of the wrapped program under `usr/bin`.
    ///
    /// Without `APPRUN_REAL_EXE` this is the file name of `argv0`, so whoever
    /// starts the wrapper picks the bundled program by the name it passes.
    pub fn real_exe(&self, argv0: &OsStr) -> Result<String> {
        if let Some(name) = self.real_exe.filter(|n| !n.is_empty()) {
            return Ok(name.to_owned());
        }
        Path::new(argv0)
            .file_name()
            .and_then(OsStr::to_str)
            .map(str::to_owned)
            .ok_or_else(|| {
                Error::environment(format!(
                    "cannot derive the wrapped program from '{}'",
                    argv0.to_string_lossy()
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchMode {
    /// Interpreted by the bundled python, itself started through the loader.
    Script { interpreter: PathBuf, script: PathBuf },
    /// Started directly; there is nothing to redirect.
    StaticBinary { path: PathBuf },
    /// Started through the bundle's dynamic loader.
    DynamicBinary { path: PathBuf },
}

impl LaunchMode {
    pub fn new(kind: LaunchKind, real_exe: &str, bundle: &BundleContext) -> Self {
        let path = bundle.binary(real_exe);
        match kind {
            LaunchKind::Dynamic => Self::DynamicBinary { path },
            LaunchKind::Static => Self::StaticBinary { path },
            LaunchKind::Script => Self::Script {
                interpreter: bundle.interpreter(),
                script: path,
            },
        }
    }

    pub fn kind(&self) -> LaunchKind {
        match self {
            Self::Script { .. } => LaunchKind::Script,
            Self::StaticBinary { .. } => LaunchKind::Static,
            Self::DynamicBinary { .. } => LaunchKind::Dynamic,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether the program resolves shared libraries through the bundle.
    pub fn uses_loader(&self) -> bool {
        !matches!(self, Self::StaticBinary { .. })
    }

    pub fn plan(&self, bundle: &BundleContext, args: &[OsString]) -> Result<LaunchPlan> {
        let mut plan = match self {
            Self::Script {
                interpreter,
                script,
            } => {
                let mut plan = LaunchPlan::new(&bundle.dynamic_linker())?;
                plan.arg(interpreter)?.arg(script)?;
                plan
            }
            Self::StaticBinary { path } => LaunchPlan::new(path)?,
            Self::DynamicBinary { path } => {
                let mut plan = LaunchPlan::new(&bundle.dynamic_linker())?;
                plan.arg(path)?;
                plan
            }
        };
        plan.args_from(args)?;
        Ok(plan)
    }
}
