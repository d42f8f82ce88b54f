//! Error types shared by the launchers.

use std::ffi::NulError;
use std::path::PathBuf;

use console::style;
use nix::errno::Errno;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Environment(String),

    #[error("unknown argument '{0}'")]
    Usage(String),

    #[error("execv failed for {}: {source}", program.display())]
    Handoff {
        program: PathBuf,
        #[source]
        source: Errno,
    },

    #[error("argument contains an interior NUL byte: {0}")]
    InvalidArgument(#[from] NulError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }
}

/// Prints a fatal error to stderr.
///
/// The caller decides the exit status.
pub fn report(err: &Error) {
    eprintln!(
        "{} {}",
        style("FATAL ERROR:").red().bold(),
        style(err).bold()
    );
}
