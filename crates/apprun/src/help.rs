use std::fmt::Write;

use crate::cli::{self, TOOLS};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn help_text(argv0: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Usage {argv0} [AppRun/AppImage options] [program options]\n");
    out.push_str(
        "All AppRun and AppImage options start with the --apprun and\n\
         --appimage prefix and are NOT passed to the selected binary.\n\n\
         The Meson program is executed by default, however, this can\n\
         be changed by choosing a different program selector. See the\n\
         list below for all supported options.\n\n\
         See --appimage-help for all supported AppImage runtime flags.\n\n\
         AppRun options:\n",
    );
    option(&mut out, cli::HELP_FLAG, "Print this help message and exit");
    option(&mut out, cli::VERSION_FLAG, "Print the AppRun version and exit");
    option(&mut out, cli::VERBOSE_FLAG, "Enable verbose logging (AppRun only)");

    out.push_str("\nProgram selectors:\n");
    for (i, tool) in TOOLS.iter().enumerate() {
        let description = if i == 0 {
            format!("{} [default]", tool.description)
        } else {
            tool.description.to_owned()
        };
        option(&mut out, &tool.flag(), &description);
    }
    out
}

fn option(out: &mut String, flag: &str, description: &str) {
    let _ = writeln!(out, "  {flag:<21} | {description}");
}
