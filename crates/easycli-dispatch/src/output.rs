//! Result delivery.
//!
//! The dispatcher has a single core, `execute`, that produces a
//! [`CommandResult`]. Everything else is a matter of where that result ends up,
//! and each of those destinations is a small adapter in this module:
//!
//! | Adapter | Success | Failure |
//! |---------|---------|---------|
//! | [`report_failure`] | nothing | `text` to err, no line break |
//! | [`write_split`] | `text` + newline to out | `text` + newline to err |
//! | [`fill_slot`] | `text` into the slot | `text` into the slot |
//!
//! Sinks are plain [`std::io::Write`] values. The process streams are only
//! the defaults in [`OutputConfig`], never an implicit fallback.

use crate::error::{DispatchError, Result, SinkKind};
use crate::handler::CommandResult;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header of the usage listing printed when no command is given.
pub const DEFAULT_USAGE_HEADER: &str = "Available commands:";

/// How a result is rendered onto a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Write the result text as is
    #[default]
    Text,
    /// Write the whole result as a single-line JSON object
    Json,
}

impl OutputMode {
    /// Renders `result` according to this mode.
    ///
    /// JSON keys come out sorted: `{"succeeded":..,"text":..}`.
    pub fn render(&self, result: &CommandResult) -> String {
        match self {
            OutputMode::Text => result.text.clone(),
            OutputMode::Json => serde_json::json!({
                "text": result.text,
                "succeeded": result.succeeded,
            })
            .to_string(),
        }
    }
}

/// Destination for rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    /// Write to standard output
    Stdout,
    /// Write to standard error
    Stderr,
    /// Append to a specific file, creating it if needed
    File(PathBuf),
}

impl OutputDestination {
    /// Opens this destination for writing.
    pub fn open(&self) -> Result<Box<dyn Write>> {
        match self {
            OutputDestination::Stdout => Ok(Box::new(std::io::stdout())),
            OutputDestination::Stderr => Ok(Box::new(std::io::stderr())),
            OutputDestination::File(path) => {
                let file = validate_path(path)
                    .and_then(|_| OpenOptions::new().create(true).append(true).open(path))
                    .map_err(|source| DispatchError::Open {
                        path: path.clone(),
                        source,
                    })?;
                Ok(Box::new(file))
            }
        }
    }
}

/// Validates that a file path's parent directory exists.
fn validate_path(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }
    }
    Ok(())
}

/// Where and how a dispatcher delivers results when no sinks are passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Receives successful results
    pub out: OutputDestination,
    /// Receives failures and the usage listing
    pub err: OutputDestination,
    pub mode: OutputMode,
    /// First line of the usage listing
    pub usage_header: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out: OutputDestination::Stdout,
            err: OutputDestination::Stderr,
            mode: OutputMode::Text,
            usage_header: DEFAULT_USAGE_HEADER.to_string(),
        }
    }
}

fn emit<W>(sink: &mut W, kind: SinkKind, text: &str, newline: bool) -> Result<()>
where
    W: Write + ?Sized,
{
    let written = if newline {
        writeln!(sink, "{}", text)
    } else {
        write!(sink, "{}", text)
    };
    written
        .and_then(|_| sink.flush())
        .map_err(DispatchError::write(kind))
}

/// Writes a failed result to `err`. Successful results are not written.
pub fn report_failure<E: Write + ?Sized>(
    err: &mut E,
    result: &CommandResult,
    mode: OutputMode,
) -> Result<()> {
    if result.succeeded {
        return Ok(());
    }
    emit(err, SinkKind::Error, &mode.render(result), false)
}

/// Writes a successful result to `out` and a failed one to `err`, each
/// followed by a line break.
pub fn write_split<O, E>(
    out: &mut O,
    err: &mut E,
    result: &CommandResult,
    mode: OutputMode,
) -> Result<()>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let rendered = mode.render(result);
    if result.succeeded {
        emit(out, SinkKind::Output, &rendered, true)
    } else {
        emit(err, SinkKind::Error, &rendered, true)
    }
}

/// Writes the usage listing: `header`, then one tab-indented line per name.
pub fn write_usage<E, I, S>(err: &mut E, header: &str, names: I) -> Result<()>
where
    E: Write + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut listing = String::from(header);
    listing.push('\n');
    for name in names {
        listing.push_str("\t- ");
        listing.push_str(name.as_ref());
        listing.push('\n');
    }
    emit(err, SinkKind::Error, &listing, false)
}

/// Replaces the contents of `slot` with the result text.
pub fn fill_slot(slot: &mut String, result: CommandResult) {
    *slot = result.text;
}
