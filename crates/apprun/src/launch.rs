use apprun_core::env::{prepend_search_path, save_search_path, set_fixed};
use apprun_core::{BundleContext, Environment, LaunchPlan, Result, vars};

use crate::cli::Selection;

/// Exports what the selected tool and any wrapper below it rely on.
pub fn compose_environment(env: &mut impl Environment, bundle: &BundleContext, selection: &Selection) {
    set_fixed(env, vars::APPDIR, bundle.root());
    if let Some(image) = bundle.invoking_image() {
        set_fixed(env, vars::APPIMAGE, image);
    }

    save_search_path(env, vars::LD_LIBRARY_PATH, vars::SAVED_LD_LIBRARY_PATH);
    prepend_search_path(env, vars::PATH, &bundle.tool_dir());

    if selection.verbosity.is_verbose() {
        set_fixed(env, vars::VERBOSE, "1");
    }
}

pub fn build_plan(bundle: &BundleContext, selection: &Selection) -> Result<LaunchPlan> {
    let mut plan = LaunchPlan::new(&bundle.tool(selection.tool.name))?;
    plan.args_from(&selection.forwarded)?;
    Ok(plan)
}
