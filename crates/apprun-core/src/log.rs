//! Verbose logging for the launchers.

use std::ffi::OsStr;

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::plan::LaunchPlan;
use crate::vars;

/// Whether the launchers narrate what they are doing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Verbosity(bool);

impl Verbosity {
    pub const QUIET: Self = Self(false);
    pub const VERBOSE: Self = Self(true);

    /// Interprets an inherited marker: set and not starting with `0`.
    pub fn from_marker(value: Option<&OsStr>) -> Self {
        match value {
            Some(v) => Self(!v.as_encoded_bytes().starts_with(b"0")),
            None => Self::QUIET,
        }
    }

    pub fn is_verbose(self) -> bool {
        self.0
    }
}

/// Installs the stdout subscriber.
///
/// `MESON_AppRun_LOG` takes precedence over the verbosity default.
pub fn init(verbosity: Verbosity) {
    let default = if verbosity.is_verbose() {
        LevelFilter::INFO
    } else {
        LevelFilter::OFF
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(vars::LOG_FILTER)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .try_init();
}

pub fn log_plan(plan: &LaunchPlan) {
    info!("");
    info!("Arguments:");
    for line in describe(plan) {
        info!("{line}");
    }
    info!("");
}

/// One line per argument, index first.
pub fn describe(plan: &LaunchPlan) -> Vec<String> {
    plan.args()
        .iter()
        .enumerate()
        .map(|(i, arg)| format!(" {i:>2}: {}", arg.to_string_lossy()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_marker_unset_is_quiet() {
        assert_eq!(Verbosity::from_marker(None), Verbosity::QUIET);
    }

    #[test]
    fn test_marker_values() {
        assert!(Verbosity::from_marker(Some(OsStr::new("1"))).is_verbose());
        assert!(Verbosity::from_marker(Some(OsStr::new("yes"))).is_verbose());
        assert!(!Verbosity::from_marker(Some(OsStr::new("0"))).is_verbose());
        assert!(!Verbosity::from_marker(Some(OsStr::new("00"))).is_verbose());
    }

    #[test]
    fn test_describe_numbers_arguments() {
        let mut plan = LaunchPlan::new(Path::new("/b/usr/lib/ld-linux.so")).unwrap();
        plan.arg("/b/usr/bin/ninja").unwrap();
        plan.arg("-C").unwrap();

        assert_eq!(
            describe(&plan),
            vec![
                "  0: /b/usr/lib/ld-linux.so".to_string(),
                "  1: /b/usr/bin/ninja".to_string(),
                "  2: -C".to_string(),
            ]
        );
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Verbosity::QUIET);
        init(Verbosity::VERBOSE);
    }
}
