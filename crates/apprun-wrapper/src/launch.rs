use std::ffi::{OsStr, OsString};

use apprun_core::env::{restore_and_prepend, set_fixed};
use apprun_core::{BundleContext, Environment, LaunchPlan, Result, vars};
use tracing::info;

use crate::mode::{BuildConfig, LaunchMode};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolves the bundle from `env`, picks the launch mode and composes the
/// environment for it.
///
/// Nothing is built or written unless the bundle root marker is present.
pub fn prepare(
    env: &mut impl Environment,
    config: &BuildConfig,
    argv0: &OsStr,
    args: &[OsString],
) -> Result<LaunchPlan> {
    let bundle = BundleContext::from_env(env)?;
    let real_exe = config.real_exe(argv0)?;
    let mode = LaunchMode::new(config.mode, &real_exe, &bundle);

    info!("Meson exe wrapper {VERSION}");
    info!("Running {real_exe}");
    info!("Extracted AppDir:  {}", bundle.root().display());
    info!("Launch mode:       {}", mode.name());

    let plan = mode.plan(&bundle, args)?;
    compose_environment(env, &bundle, &mode);
    Ok(plan)
}

pub fn compose_environment(env: &mut impl Environment, bundle: &BundleContext, mode: &LaunchMode) {
    if mode.uses_loader() {
        restore_and_prepend(
            env,
            vars::LD_LIBRARY_PATH,
            vars::SAVED_LD_LIBRARY_PATH,
            &bundle.library_dir(),
        );
    }

    set_fixed(env, vars::PYTHONHOME, bundle.interpreter_home());
    set_fixed(env, vars::PYTHONDONTWRITEBYTECODE, "1");
}
