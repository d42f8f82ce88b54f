use std::convert::Infallible;
use std::env;
use std::ffi::OsString;
use std::process::ExitCode;

use apprun_core::{Environment, ProcessEnv, Result, Verbosity, log, report, vars};

use mode::BuildConfig;

mod launch;
mod mode;

fn main() -> ExitCode {
    match run() {
        Ok(never) => match never {},
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<Infallible> {
    let mut args = env::args_os();
    let argv0 = args.next().unwrap_or_default();
    let forwarded: Vec<OsString> = args.collect();

    let mut env = ProcessEnv;
    log::init(Verbosity::from_marker(env.var(vars::VERBOSE).as_deref()));

    let plan = launch::prepare(&mut env, &BuildConfig::CURRENT, &argv0, &forwarded)?;
    log::log_plan(&plan);

    plan.exec()
}
