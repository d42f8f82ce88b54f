//! Environment variable names read and written by the launchers.

/// Prefix shared by every variable owned by the launchers.
pub const VAR_PREFIX: &str = "MESON_AppRun_";

/// Absolute bundle root, exported by the selector.
pub const APPDIR: &str = "MESON_AppRun_APPDIR";
/// Path of the package file that was originally invoked.
pub const APPIMAGE: &str = "MESON_AppRun_APPIMAGE";
/// Set to `1` when verbose logging was requested.
pub const VERBOSE: &str = "MESON_AppRun_VERBOSE";
/// Host `LD_LIBRARY_PATH` before any bundle directory was prepended.
pub const SAVED_LD_LIBRARY_PATH: &str = "MESON_AppRun_LD_LIBRARY_PATH";
/// `EnvFilter` directives overriding the verbosity default.
pub const LOG_FILTER: &str = "MESON_AppRun_LOG";

pub const PATH: &str = "PATH";
pub const LD_LIBRARY_PATH: &str = "LD_LIBRARY_PATH";
pub const PYTHONHOME: &str = "PYTHONHOME";
pub const PYTHONDONTWRITEBYTECODE: &str = "PYTHONDONTWRITEBYTECODE";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_vars_share_prefix() {
        for var in [APPDIR, APPIMAGE, VERBOSE, SAVED_LD_LIBRARY_PATH, LOG_FILTER] {
            assert!(var.starts_with(VAR_PREFIX), "{var}");
        }
    }
}
