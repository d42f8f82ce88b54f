//! Bundle root discovery and bundle-relative paths.

use std::env;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};

use crate::env::Environment;
use crate::error::{Error, Result};
use crate::{layout, vars};

/// Where the bundle lives, resolved once per process.
///
/// Only the root is stored; every runtime location is derived from it on
/// access so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleContext {
    root: PathBuf,
    invoking_image: Option<PathBuf>,
}

impl BundleContext {
    pub fn new(root: PathBuf, invoking_image: Option<PathBuf>) -> Result<Self> {
        if !root.is_absolute() {
            return Err(Error::environment(format!(
                "bundle root is not absolute: {}",
                root.display()
            )));
        }
        Ok(Self {
            root,
            invoking_image,
        })
    }

    /// Locates the bundle around the running executable.
    pub fn locate(argv0: &OsStr) -> Result<Self> {
        let root = resolve_self()?;
        Self::new(root, resolve_invoking_image(argv0))
    }

    /// Reads the bundle root left behind by a previous stage.
    pub fn from_env(env: &impl Environment) -> Result<Self> {
        let root = env
            .var(vars::APPDIR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::environment(format!("{} is not set", vars::APPDIR)))?;
        let invoking_image = env.var(vars::APPIMAGE).map(PathBuf::from);
        Self::new(PathBuf::from(root), invoking_image)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn invoking_image(&self) -> Option<&Path> {
        self.invoking_image.as_deref()
    }

    pub fn tool_dir(&self) -> PathBuf {
        absolute(&self.root, layout::TOOL_DIR)
    }

    pub fn dynamic_linker(&self) -> PathBuf {
        absolute(&self.root, layout::DYNAMIC_LINKER)
    }

    pub fn library_dir(&self) -> PathBuf {
        absolute(&self.root, layout::LIBRARY_DIR)
    }

    pub fn interpreter_home(&self) -> PathBuf {
        absolute(&self.root, layout::INTERPRETER_HOME)
    }

    pub fn interpreter(&self) -> PathBuf {
        absolute(&self.root, layout::INTERPRETER)
    }

    /// Entry point of a tool exposed by the selector.
    pub fn tool(&self, name: &str) -> PathBuf {
        absolute(&self.root, &format!("{}/{name}", layout::TOOL_DIR))
    }

    /// A real program shipped in the bundle.
    pub fn binary(&self, name: &str) -> PathBuf {
        absolute(&self.root, &format!("{}/{name}", layout::BINARY_DIR))
    }
}

/// Joins `root` and a relative suffix with exactly one separator.
///
/// Purely lexical: nothing is checked on disk.
pub fn absolute(root: &Path, relative: &str) -> PathBuf {
    let mut bytes = root.as_os_str().as_bytes();
    while let [rest @ .., b'/'] = bytes {
        bytes = rest;
    }

    let mut joined = Vec::with_capacity(bytes.len() + relative.len() + 1);
    joined.extend_from_slice(bytes);
    joined.push(b'/');
    joined.extend_from_slice(relative.as_bytes());
    PathBuf::from(OsString::from_vec(joined))
}

/// Directory holding the running executable, with all symlinks resolved.
pub fn resolve_self() -> Result<PathBuf> {
    let exe = env::current_exe()
        .and_then(|p| p.canonicalize())
        .map_err(|e| Error::environment(format!("could not resolve own executable: {e}")))?;

    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::environment(format!("executable has no parent: {}", exe.display()))
    })
}

/// Canonical path of the file the user actually invoked.
///
/// A bare command name is looked up on `PATH` first, the way the shell found it.
pub fn resolve_invoking_image(argv0: &OsStr) -> Option<PathBuf> {
    if argv0.is_empty() {
        return None;
    }

    let candidate = if argv0.as_bytes().contains(&b'/') {
        PathBuf::from(argv0)
    } else {
        which::which(argv0).ok()?
    };

    candidate.canonicalize().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryEnv;

    fn bundle() -> BundleContext {
        BundleContext::new(PathBuf::from("/tmp/.mount_meson"), None).unwrap()
    }

    #[test]
    fn test_absolute_single_separator() {
        assert_eq!(
            absolute(Path::new("/opt/bundle"), "usr/lib"),
            PathBuf::from("/opt/bundle/usr/lib")
        );
        assert_eq!(
            absolute(Path::new("/opt/bundle/"), "usr/lib"),
            PathBuf::from("/opt/bundle/usr/lib")
        );
        assert_eq!(
            absolute(Path::new("/opt/bundle//"), "fakebin"),
            PathBuf::from("/opt/bundle/fakebin")
        );
    }

    #[test]
    fn test_absolute_filesystem_root() {
        assert_eq!(absolute(Path::new("/"), "fakebin"), PathBuf::from("/fakebin"));
    }

    #[test]
    fn test_absolute_prefix_and_injective() {
        let root = Path::new("/opt/bundle");
        let suffixes = [
            layout::TOOL_DIR,
            layout::DYNAMIC_LINKER,
            layout::LIBRARY_DIR,
            layout::INTERPRETER_HOME,
            layout::INTERPRETER,
            "usr/lib/",
        ];

        let joined: Vec<PathBuf> = suffixes.iter().map(|s| absolute(root, s)).collect();
        for (i, a) in joined.iter().enumerate() {
            assert!(a.as_os_str().as_bytes().starts_with(b"/opt/bundle/"));
            for b in &joined[i + 1..] {
                assert_ne!(a.as_os_str(), b.as_os_str());
            }
        }
    }

    #[test]
    fn test_absolute_does_not_touch_disk() {
        let p = absolute(Path::new("/definitely/not/here"), "usr/bin/meson");
        assert_eq!(p, PathBuf::from("/definitely/not/here/usr/bin/meson"));
    }

    #[test]
    fn test_derived_paths() {
        let b = bundle();
        assert_eq!(b.tool_dir(), PathBuf::from("/tmp/.mount_meson/fakebin"));
        assert_eq!(
            b.dynamic_linker(),
            PathBuf::from("/tmp/.mount_meson/usr/lib/ld-linux.so")
        );
        assert_eq!(b.library_dir(), PathBuf::from("/tmp/.mount_meson/usr/lib"));
        assert_eq!(b.interpreter_home(), PathBuf::from("/tmp/.mount_meson/usr"));
        assert_eq!(
            b.interpreter(),
            PathBuf::from("/tmp/.mount_meson/usr/bin/python3")
        );
        assert_eq!(b.tool("ninja"), PathBuf::from("/tmp/.mount_meson/fakebin/ninja"));
        assert_eq!(b.binary("cmake"), PathBuf::from("/tmp/.mount_meson/usr/bin/cmake"));
    }

    #[test]
    fn test_relative_root_rejected() {
        let err = BundleContext::new(PathBuf::from("bundle"), None).unwrap_err();
        assert!(matches!(err, Error::Environment(_)));
    }

    #[test]
    fn test_from_env_missing_marker() {
        let err = BundleContext::from_env(&MemoryEnv::new()).unwrap_err();
        assert!(err.to_string().contains(vars::APPDIR));
    }

    #[test]
    fn test_from_env_empty_marker() {
        let env = MemoryEnv::new().with(vars::APPDIR, "");
        assert!(BundleContext::from_env(&env).is_err());
    }

    #[test]
    fn test_from_env_reads_markers() {
        let env = MemoryEnv::new()
            .with(vars::APPDIR, "/tmp/.mount_meson")
            .with(vars::APPIMAGE, "/home/user/meson.AppImage");
        let b = BundleContext::from_env(&env).unwrap();
        assert_eq!(b.root(), Path::new("/tmp/.mount_meson"));
        assert_eq!(
            b.invoking_image(),
            Some(Path::new("/home/user/meson.AppImage"))
        );
    }

    #[test]
    fn test_resolve_self_is_absolute() {
        let root = resolve_self().unwrap();
        assert!(root.is_absolute());
        assert!(root.is_dir());
    }

    #[test]
    fn test_resolve_invoking_image_empty() {
        assert_eq!(resolve_invoking_image(OsStr::new("")), None);
    }

    #[test]
    fn test_resolve_invoking_image_missing() {
        assert_eq!(
            resolve_invoking_image(OsStr::new("/fake/nonexistent/meson.AppImage")),
            None
        );
    }
}
