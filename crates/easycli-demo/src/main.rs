//! easycli - sample CLI built on easycli-dispatch.
//!
//! Everything after the options is handed to the dispatcher as one command
//! line, so command flags pass straight through:
//!
//! ```text
//! easycli multiply 6 7
//! easycli --output json echo hello -upper
//! easycli            # lists the available commands on stderr
//! ```

mod commands;
mod logging;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use easycli_dispatch::OutputMode;

const PROGRAM_NAME: &str = "easycli";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Plain result text
    Text,
    /// One JSON object per result
    Json,
}

impl From<Format> for OutputMode {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputMode::Text,
            Format::Json => OutputMode::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = PROGRAM_NAME, version, about = "Sample commands routed through easycli-dispatch")]
struct Cli {
    /// How results are written
    #[arg(long, value_enum, default_value_t = Format::Text)]
    output: Format,

    /// Log filter directive, e.g. `debug` or `easycli_dispatch=trace`.
    /// Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Command name followed by its arguments and flags
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_stderr_logging(cli.log_level.as_deref());

    let mut dispatcher = commands::dispatcher(cli.output.into());
    let args = std::iter::once(PROGRAM_NAME.to_string()).chain(cli.words);
    dispatcher
        .run(args)
        .context("failed to write command output")?;
    Ok(())
}
