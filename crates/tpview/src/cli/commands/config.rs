//! Implementation of `tpview config`.

use std::process::ExitCode;

use tpview_config::format_path_for_display;
use tpview_style::Highlighter;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings and the files they came from.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    let settings = match config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut out = String::new();
    if config.sources.is_empty() {
        out.push_str("# no configuration files found, showing defaults\n");
    } else {
        out.push_str("# merged from (highest precedence first):\n");
        for path in &config.sources {
            out.push_str("#   ");
            out.push_str(&format_path_for_display(path, &ctx.cwd));
            out.push('\n');
        }
    }
    out.push('\n');
    out.push_str(&settings);

    if ctx.palette.is_colored() {
        print!("{}", Highlighter::new().highlight_toml(&out));
    } else {
        print!("{out}");
    }

    for warning in config.validate() {
        eprintln!("{}", ctx.palette.warning(&format!("warning: {warning}")));
    }

    ExitCode::SUCCESS
}
