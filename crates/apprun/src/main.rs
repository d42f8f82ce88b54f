use std::env;
use std::ffi::OsString;
use std::process::ExitCode;

use apprun_core::{BundleContext, Error, ProcessEnv, Result, log, report};
use console::style;
use tracing::info;

use cli::Invocation;

mod cli;
mod help;
mod launch;

fn main() -> ExitCode {
    let mut args = env::args_os();
    let argv0 = args.next().unwrap_or_default();

    match run(&argv0, args) {
        Ok(code) => code,
        Err(Error::Usage(arg)) => {
            eprintln!(
                "{} {}\n",
                style("ERROR:").red().bold(),
                style(format!("Unknown argument '{arg}'")).bold()
            );
            print!("{}", help::help_text(&argv0.to_string_lossy()));
            ExitCode::FAILURE
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(argv0: &OsString, args: impl Iterator<Item = OsString>) -> Result<ExitCode> {
    let selection = match cli::scan(args)? {
        Invocation::Help => {
            print!("{}", help::help_text(&argv0.to_string_lossy()));
            return Ok(ExitCode::SUCCESS);
        }
        Invocation::Version => {
            println!("{}", help::VERSION);
            return Ok(ExitCode::SUCCESS);
        }
        Invocation::Launch(selection) => selection,
    };

    log::init(selection.verbosity);

    let bundle = BundleContext::locate(argv0)?;

    info!("Meson AppRun {}", help::VERSION);
    info!("Selected {}", selection.tool.name);
    info!("");
    info!("AppDir:   {}", bundle.root().display());
    match bundle.invoking_image() {
        Some(image) => info!("AppImage: {}", image.display()),
        None => info!("AppImage: <unresolved>"),
    }

    launch::compose_environment(&mut ProcessEnv, &bundle, &selection);
    let plan = launch::build_plan(&bundle, &selection)?;
    log::log_plan(&plan);

    match plan.exec()? {}
}
