//! Whitespace tokenizer and name-keyed command dispatch for small CLIs.
//!
//! `easycli-dispatch` turns an input line such as `echo hello world -loud`
//! into an [`Invocation`], looks up the handler registered under the command
//! name, and hands back a [`CommandResult`]: a piece of text plus a success
//! flag.
//!
//! # Features
//!
//! - **Tokenizer**: shell-like whitespace splitting, `-`-prefixed flags
//! - **Command routing**: map command names to handlers (closures or structs)
//! - **Result routing**: return the result, write it to output/error sinks,
//!   store it in a string, or drop it
//! - **Process entry point**: run straight from `std::env::args()`, with a
//!   usage listing when no command is given
//!
//! # Usage
//!
//! ```rust
//! use easycli_dispatch::{CommandResult, Dispatcher};
//!
//! let mut cli = Dispatcher::builder()
//!     .command("multiply", |inv| {
//!         let a: i64 = inv.argument(0).unwrap_or_default().parse()?;
//!         let b: i64 = inv.argument(1).unwrap_or_default().parse()?;
//!         Ok::<_, anyhow::Error>(a * b)
//!     })
//!     .command("flagcheck", |inv| {
//!         CommandResult::success(if inv.has_flag("flag") { "set" } else { "unset" })
//!     })
//!     .build();
//!
//! assert_eq!(cli.execute("multiply 2 3"), CommandResult::success("6"));
//! assert_eq!(cli.execute("flagcheck -flag").text, "set");
//! ```
//!
//! For a binary, hand the process arguments to [`Dispatcher::run`]:
//!
//! ```rust,ignore
//! fn main() -> anyhow::Result<()> {
//!     let mut cli = build_cli();
//!     cli.run(std::env::args())?;
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! Registration and dispatch emit `tracing` events at `debug` level (and
//! tokenization at `trace`). The crate never installs a subscriber.

mod dispatch;
mod error;
mod handler;
mod output;
mod tokenize;

pub use dispatch::{Dispatcher, DispatcherBuilder};

pub use error::{DispatchError, Result, SinkKind};

pub use handler::{CommandResult, FnHandler, Handler, IntoCommandResult};

pub use output::{
    fill_slot, report_failure, write_split, write_usage, OutputConfig, OutputDestination,
    OutputMode, DEFAULT_USAGE_HEADER,
};

pub use tokenize::{tokenize, Invocation, FLAG_PREFIX};
