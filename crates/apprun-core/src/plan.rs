use std::convert::Infallible;
use std::ffi::{CString, OsStr};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use nix::unistd;

use crate::error::{Error, Result};

/// Argument vector for the replacement process.
///
/// The first element is the absolute path that gets executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    args: Vec<CString>,
}

impl LaunchPlan {
    pub fn new(program: &Path) -> Result<Self> {
        if !program.is_absolute() {
            return Err(Error::environment(format!(
                "launch target is not absolute: {}",
                program.display()
            )));
        }
        Ok(Self {
            args: vec![to_cstring(program.as_os_str())?],
        })
    }

    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> Result<&mut Self> {
        self.args.push(to_cstring(arg.as_ref())?);
        Ok(self)
    }

    pub fn args_from<I, S>(&mut self, args: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.arg(arg)?;
        }
        Ok(self)
    }

    pub fn program(&self) -> PathBuf {
        PathBuf::from(OsStr::from_bytes(self.args[0].as_bytes()))
    }

    pub fn args(&self) -> &[CString] {
        &self.args
    }

    /// Replaces the current process image. Returns only on failure.
    ///
    /// The whole argument vector, argv[0] included, is passed as is; `execv`
    /// appends the terminating null pointer.
    pub fn exec(&self) -> Result<Infallible> {
        unistd::execv(&self.args[0], &self.args).map_err(|source| Error::Handoff {
            program: self.program(),
            source,
        })
    }
}

fn to_cstring(value: &OsStr) -> Result<CString> {
    Ok(CString::new(value.as_bytes())?)
}
