//! Command dispatch logic.
//!
//! [`Dispatcher`] owns the registry mapping command names to handlers. Every
//! way of running a command goes through the same core:
//!
//! ```text
//! input line
//!   → tokenize
//!   → registry lookup
//!   → handler (or the synthetic "Unknown command" failure)
//!   → CommandResult → returned / written to a sink / stored / dropped
//! ```
//!
//! The routing variants only differ in the last step, which is delegated to
//! the adapters in [`crate::output`].

use crate::error::Result;
use crate::handler::{CommandResult, FnHandler, Handler, IntoCommandResult};
use crate::output::{
    fill_slot, report_failure, write_split, write_usage, OutputConfig, OutputDestination,
    OutputMode,
};
use crate::tokenize::{tokenize, Invocation};
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

/// A name-keyed registry of command handlers.
///
/// Single-threaded by contract: handlers are not required to be `Send`, and
/// both registration and execution need `&mut self`.
///
/// # Example
///
/// ```rust
/// use easycli_dispatch::{CommandResult, Dispatcher};
///
/// let mut cli = Dispatcher::new();
/// cli.register_fn("greet", |inv| {
///     let name = inv.argument(0).unwrap_or("world");
///     CommandResult::success(format!("Hello, {}!", name))
/// });
///
/// let result = cli.execute("greet Ada");
/// assert!(result.succeeded);
/// assert_eq!(result.text, "Hello, Ada!");
///
/// let missing = cli.execute("nosuchcmd a b");
/// assert_eq!(missing.text, "Unknown command: \"nosuchcmd\"");
/// ```
#[derive(Default)]
pub struct Dispatcher {
    commands: HashMap<String, Box<dyn Handler>>,
    config: OutputConfig,
}

impl Dispatcher {
    /// Creates a dispatcher with no commands and the default output config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher pre-populated with `commands`.
    ///
    /// Later entries win when a name repeats.
    pub fn with_commands<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = (S, Box<dyn Handler>)>,
        S: Into<String>,
    {
        let mut dispatcher = Self::new();
        for (name, handler) in commands {
            dispatcher.insert(name.into(), handler);
        }
        dispatcher
    }

    /// Returns a builder for configuring commands and output together.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut OutputConfig {
        &mut self.config
    }

    /// Registers `handler` under `name`, replacing any previous handler.
    ///
    /// The name is not validated. A name containing whitespace can be
    /// registered but never reached from text input, since the tokenizer
    /// splits it apart.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H)
    where
        H: Handler + 'static,
    {
        self.insert(name.into(), Box::new(handler));
    }

    /// Registers a closure under `name`. See [`FnHandler`] for the accepted
    /// return types.
    pub fn register_fn<F, R>(&mut self, name: impl Into<String>, f: F)
    where
        F: FnMut(&Invocation) -> R + 'static,
        R: IntoCommandResult + 'static,
    {
        self.register(name, FnHandler::new(f));
    }

    fn insert(&mut self, name: String, handler: Box<dyn Handler>) {
        tracing::debug!(command = %name, "registering command");
        if self.commands.insert(name.clone(), handler).is_some() {
            tracing::debug!(command = %name, "replaced existing handler");
        }
    }

    /// Tokenizes `input`, runs the matching handler and returns its result
    /// unmodified.
    ///
    /// An unregistered command yields a failed result with the text
    /// `Unknown command: "<name>"`.
    pub fn execute(&mut self, input: &str) -> CommandResult {
        self.execute_invocation(&tokenize(input))
    }

    /// Like [`execute`](Self::execute), for input that is already tokenized.
    pub fn execute_invocation(&mut self, invocation: &Invocation) -> CommandResult {
        self.dispatch(invocation)
            .unwrap_or_else(|| CommandResult::unknown_command(&invocation.command))
    }

    /// Like [`execute`](Self::execute), but returns `None` instead of a
    /// synthetic failure when the command is not registered.
    pub fn try_execute(&mut self, input: &str) -> Option<CommandResult> {
        self.dispatch(&tokenize(input))
    }

    fn dispatch(&mut self, invocation: &Invocation) -> Option<CommandResult> {
        match self.commands.get_mut(&invocation.command) {
            Some(handler) => {
                tracing::debug!(
                    command = %invocation.command,
                    arguments = invocation.arguments.len(),
                    flags = invocation.flags.len(),
                    "dispatching command"
                );
                let result = handler.handle(invocation);
                tracing::debug!(
                    command = %invocation.command,
                    succeeded = result.succeeded,
                    "command finished"
                );
                Some(result)
            }
            None => {
                tracing::debug!(command = %invocation.command, "unknown command");
                None
            }
        }
    }

    /// Executes `input` and writes the text of a failed result to `err`.
    ///
    /// Unknown commands count as failures. The result is returned either way.
    pub fn execute_reporting<E>(&mut self, input: &str, err: &mut E) -> Result<CommandResult>
    where
        E: Write + ?Sized,
    {
        let result = self.execute(input);
        report_failure(err, &result, self.config.mode)?;
        Ok(result)
    }

    /// Executes `input`, writing a successful result to `out` and a failed
    /// one to `err`, each on its own line. The result is returned either way.
    pub fn execute_streaming<O, E>(
        &mut self,
        input: &str,
        out: &mut O,
        err: &mut E,
    ) -> Result<CommandResult>
    where
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        let result = self.execute(input);
        write_split(out, err, &result, self.config.mode)?;
        Ok(result)
    }

    /// Executes `input` and discards the result. Unknown commands are
    /// silently ignored.
    pub fn execute_silent(&mut self, input: &str) {
        let _ = self.try_execute(input);
    }

    /// Executes `input` and stores the result text in `slot`, whatever the
    /// outcome. An unknown command leaves `slot` untouched.
    pub fn execute_into(&mut self, input: &str, slot: &mut String) {
        if let Some(result) = self.try_execute(input) {
            fill_slot(slot, result);
        }
    }

    /// Executes `input` against the configured destinations, success to the
    /// output destination and failure to the error destination.
    ///
    /// The command runs first. Only the destination the result is written
    /// to gets opened.
    pub fn run_line(&mut self, input: &str) -> Result<()> {
        let result = self.execute(input);
        let mode = self.config.mode;
        if result.succeeded {
            let mut out = self.config.out.open()?;
            write_split(&mut out, &mut io::sink(), &result, mode)
        } else {
            let mut err = self.config.err.open()?;
            write_split(&mut io::sink(), &mut err, &result, mode)
        }
    }

    /// Runs a command from process arguments using the configured
    /// destinations.
    ///
    /// The first argument (the program name) is always skipped. See
    /// [`run_with`](Self::run_with). The usage listing only opens the error
    /// destination.
    pub fn run<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match command_line(args) {
            Some(line) => self.run_line(&line),
            None => {
                let mut err = self.config.err.open()?;
                self.write_usage_to(&mut err)
            }
        }
    }

    /// Runs a command from process arguments against explicit sinks.
    ///
    /// The remaining arguments are joined with single spaces and executed as
    /// one input line. With no arguments beyond the program name, the usage
    /// listing (header plus one line per command, sorted) goes to `err`.
    pub fn run_with<I, S, O, E>(&mut self, args: I, out: &mut O, err: &mut E) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        match command_line(args) {
            Some(line) => self.execute_streaming(&line, out, err).map(drop),
            None => self.write_usage_to(err),
        }
    }

    fn write_usage_to<E: Write + ?Sized>(&self, err: &mut E) -> Result<()> {
        let mut names = self.command_names();
        names.sort();
        write_usage(err, &self.config.usage_header, names)
    }

    /// Returns the registered command names, in no particular order.
    pub fn command_names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Returns the registered handlers, in no particular order.
    ///
    /// The order matches [`command_names`](Self::command_names) only while
    /// the registry is left unchanged. Use [`commands`](Self::commands) to
    /// get names and handlers together.
    pub fn handlers(&self) -> Vec<&dyn Handler> {
        self.commands.values().map(|h| &**h).collect()
    }

    /// Returns the registered handlers mutably, so they can be invoked
    /// directly. Same ordering rules as [`handlers`](Self::handlers).
    pub fn handlers_mut(&mut self) -> Vec<&mut (dyn Handler + 'static)> {
        self.commands.values_mut().map(|h| &mut **h).collect()
    }

    /// Iterates over `(name, handler)` pairs, in no particular order.
    pub fn commands(&self) -> impl Iterator<Item = (&str, &dyn Handler)> + '_ {
        self.commands
            .iter()
            .map(|(name, handler)| (name.as_str(), &**handler))
    }

    /// Iterates over `(name, handler)` pairs with callable handlers.
    pub fn commands_mut(
        &mut self,
    ) -> impl Iterator<Item = (&str, &mut (dyn Handler + 'static))> + '_ {
        self.commands
            .iter_mut()
            .map(|(name, handler)| (name.as_str(), &mut **handler))
    }

    /// Returns true if a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Skips the program name and joins the rest with single spaces. `None` when
/// nothing follows the program name.
fn command_line<I, S>(args: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let words: Vec<String> = args.into_iter().skip(1).map(Into::into).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`Dispatcher`].
///
/// ```rust
/// use easycli_dispatch::{Dispatcher, OutputMode};
///
/// let mut cli = Dispatcher::builder()
///     .command("ping", |_inv| Ok::<_, anyhow::Error>("pong"))
///     .mode(OutputMode::Json)
///     .build();
///
/// assert_eq!(cli.execute("ping").text, "pong");
/// ```
#[derive(Default)]
pub struct DispatcherBuilder {
    commands: Vec<(String, Box<dyn Handler>)>,
    config: OutputConfig,
}

impl DispatcherBuilder {
    /// Adds a closure command.
    pub fn command<F, R>(self, name: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&Invocation) -> R + 'static,
        R: IntoCommandResult + 'static,
    {
        self.command_handler(name, FnHandler::new(f))
    }

    /// Adds a struct handler.
    pub fn command_handler<H>(mut self, name: impl Into<String>, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.commands.push((name.into(), Box::new(handler)));
        self
    }

    /// Sets where successful results go.
    pub fn output(mut self, destination: OutputDestination) -> Self {
        self.config.out = destination;
        self
    }

    /// Sets where failures and the usage listing go.
    pub fn errors(mut self, destination: OutputDestination) -> Self {
        self.config.err = destination;
        self
    }

    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn usage_header(mut self, header: impl Into<String>) -> Self {
        self.config.usage_header = header.into();
        self
    }

    /// Replaces the whole output configuration.
    pub fn config(mut self, config: OutputConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Dispatcher {
        let mut dispatcher = Dispatcher::with_commands(self.commands);
        dispatcher.config = self.config;
        dispatcher
    }
}
