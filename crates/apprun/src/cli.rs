//! Parsing of the launcher's own `--apprun-*` flags.
//!
//! Flags are only recognised in front of the forwarded command line: the first
//! argument without the prefix ends the scan and everything from it on belongs
//! to the selected tool.

use std::ffi::OsString;

use apprun_core::{Error, Result, Verbosity};

pub const SELF_PREFIX: &str = "--apprun";

pub const HELP_FLAG: &str = "--apprun-help";
pub const VERSION_FLAG: &str = "--apprun-version";
pub const VERBOSE_FLAG: &str = "--apprun-verbose";

/// A bundled program the selector can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub name: &'static str,
    pub description: &'static str,
}

impl Tool {
    pub fn flag(&self) -> String {
        format!("{SELF_PREFIX}-{}", self.name)
    }
}

/// Selectable tools. The first entry is the default.
pub const TOOLS: &[Tool] = &[
    Tool {
        name: "meson",
        description: "Call meson",
    },
    Tool {
        name: "ninja",
        description: "Call ninja",
    },
    Tool {
        name: "cmake",
        description: "Call CMake",
    },
    Tool {
        name: "pkg-config",
        description: "Call pkg-config",
    },
    Tool {
        name: "python3",
        description: "Call python",
    },
];

pub fn default_tool() -> Tool {
    TOOLS[0]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    Launch(Selection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub tool: Tool,
    pub verbosity: Verbosity,
    pub forwarded: Vec<OsString>,
}

/// Scans the arguments following argv[0].
pub fn scan<I>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter().peekable();
    let mut tool = default_tool();
    let mut verbosity = Verbosity::QUIET;

    while let Some(arg) = args.next_if(is_self_prefixed) {
        let flag = arg.to_string_lossy();
        match &*flag {
            HELP_FLAG => return Ok(Invocation::Help),
            VERSION_FLAG => return Ok(Invocation::Version),
            VERBOSE_FLAG => verbosity = Verbosity::VERBOSE,
            other => {
                tool = TOOLS
                    .iter()
                    .find(|t| t.flag() == other)
                    .copied()
                    .ok_or_else(|| Error::Usage(other.to_owned()))?;
            }
        }
    }

    Ok(Invocation::Launch(Selection {
        tool,
        verbosity,
        forwarded: args.collect(),
    }))
}

fn is_self_prefixed(arg: &OsString) -> bool {
    arg.as_encoded_bytes().starts_with(SELF_PREFIX.as_bytes())
}
