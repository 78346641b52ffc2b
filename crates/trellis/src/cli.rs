//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;

use crate::output::ColorMode;

/// Trellis - Build a Golang web application
///
/// Commands are resolved against the command registry rather than by clap,
/// so everything after the command name is handed to the command untouched.
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase diagnostic verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report diagnostic errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Omit the date and time from output lines
    #[arg(long)]
    pub no_timestamps: bool,

    /// Project directory containing project.toml
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<Utf8PathBuf>,

    /// Command to run followed by its arguments
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub fn project_dir(&self) -> Utf8PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from("."))
    }

    pub fn color_mode(&self) -> ColorMode {
        if self.no_color {
            ColorMode::Never
        } else {
            ColorMode::Auto
        }
    }
}
