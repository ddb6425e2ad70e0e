//! Command handler types.
//!
//! A handler receives the tokenized [`Invocation`] and reports back a
//! [`CommandResult`]: some human-readable text plus a success flag. The two
//! are independent. A handler may succeed with empty text or fail with
//! empty text, and the dispatcher never second-guesses the combination.
//!
//! Handlers own their failures. Anything that goes wrong inside a handler
//! (bad arguments, I/O errors) should come back as a failed result rather
//! than a panic. [`FnHandler`] does that conversion for closures that return
//! `Result<T, E>`:
//!
//! ```rust
//! use easycli_dispatch::{FnHandler, Handler, tokenize};
//!
//! let mut multiply = FnHandler::new(|inv: &easycli_dispatch::Invocation| {
//!     let a: i64 = inv.argument(0).unwrap_or_default().parse()?;
//!     let b: i64 = inv.argument(1).unwrap_or_default().parse()?;
//!     Ok::<_, anyhow::Error>(a * b)
//! });
//!
//! let result = multiply.handle(&tokenize("multiply 2 3"));
//! assert!(result.succeeded);
//! assert_eq!(result.text, "6");
//! ```

use crate::tokenize::Invocation;
use serde::Serialize;
use std::fmt::Display;

/// What a handler produces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommandResult {
    /// Output on success, diagnostic on failure.
    pub text: String,
    /// Whether the command succeeded.
    pub succeeded: bool,
}

impl CommandResult {
    pub fn new(text: impl Into<String>, succeeded: bool) -> Self {
        Self {
            text: text.into(),
            succeeded,
        }
    }

    /// A successful result carrying `text`.
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    /// A failed result carrying `text`.
    pub fn failure(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    /// The result the dispatcher synthesizes when no handler is registered
    /// under `name`.
    pub fn unknown_command(name: &str) -> Self {
        Self::failure(format!("Unknown command: \"{}\"", name))
    }

    /// Returns true if the command failed.
    pub fn failed(&self) -> bool {
        !self.succeeded
    }
}

/// Trait for types that can be converted into a [`CommandResult`].
///
/// Lets closure handlers return `Result<T, E>` directly: `Ok(value)` becomes
/// a success whose text is `value.to_string()`, and `Err(e)` becomes a
/// failure carrying the error message. A [`CommandResult`] passes through
/// unchanged.
pub trait IntoCommandResult {
    fn into_command_result(self) -> CommandResult;
}

impl IntoCommandResult for CommandResult {
    fn into_command_result(self) -> CommandResult {
        self
    }
}

impl<T, E> IntoCommandResult for Result<T, E>
where
    T: Display,
    E: Into<anyhow::Error>,
{
    fn into_command_result(self) -> CommandResult {
        match self {
            Ok(value) => CommandResult::success(value.to_string()),
            // Alternate formatting keeps any `.context()` chain in the message.
            Err(err) => CommandResult::failure(format!("{:#}", err.into())),
        }
    }
}

/// Trait for command handlers.
///
/// Handlers take `&mut self`, so a struct handler can keep state across
/// invocations without interior mutability.
///
/// # Example
///
/// ```rust
/// use easycli_dispatch::{CommandResult, Handler, Invocation};
///
/// struct Counter { count: u32 }
///
/// impl Handler for Counter {
///     fn handle(&mut self, _inv: &Invocation) -> CommandResult {
///         self.count += 1;
///         CommandResult::success(self.count.to_string())
///     }
/// }
/// ```
pub trait Handler {
    /// Execute the command described by `invocation`.
    fn handle(&mut self, invocation: &Invocation) -> CommandResult;
}

impl Handler for Box<dyn Handler> {
    fn handle(&mut self, invocation: &Invocation) -> CommandResult {
        (**self).handle(invocation)
    }
}

/// A wrapper that implements [`Handler`] for `FnMut` closures.
///
/// The closure can return either:
/// - a [`CommandResult`], used as is
/// - `Result<T, E>` with `T: Display`, converted via [`IntoCommandResult`]
pub struct FnHandler<F, R = CommandResult> {
    f: F,
    _phantom: std::marker::PhantomData<fn() -> R>,
}

impl<F, R> FnHandler<F, R>
where
    F: FnMut(&Invocation) -> R,
    R: IntoCommandResult,
{
    /// Creates a new FnHandler wrapping the given closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<F, R> Handler for FnHandler<F, R>
where
    F: FnMut(&Invocation) -> R,
    R: IntoCommandResult,
{
    fn handle(&mut self, invocation: &Invocation) -> CommandResult {
        (self.f)(invocation).into_command_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    #[test]
    fn test_command_result_constructors() {
        assert_eq!(
            CommandResult::success("ok"),
            CommandResult {
                text: "ok".into(),
                succeeded: true
            }
        );
        let failed = CommandResult::failure("");
        assert!(failed.failed());
        assert!(failed.text.is_empty());
    }

    #[test]
    fn test_unknown_command_message() {
        let result = CommandResult::unknown_command("nosuchcmd");
        assert!(!result.succeeded);
        assert_eq!(result.text, "Unknown command: \"nosuchcmd\"");
    }

    #[test]
    fn test_unknown_command_empty_name() {
        assert_eq!(
            CommandResult::unknown_command("").text,
            "Unknown command: \"\""
        );
    }

    #[test]
    fn test_into_command_result_passthrough() {
        let result = CommandResult::new("", true).into_command_result();
        assert!(result.succeeded);
        assert!(result.text.is_empty());
    }

    #[test]
    fn test_into_command_result_from_ok() {
        let result: Result<i32, anyhow::Error> = Ok(6);
        assert_eq!(result.into_command_result(), CommandResult::success("6"));
    }

    #[test]
    fn test_into_command_result_from_err() {
        let result: Result<String, anyhow::Error> = Err(anyhow::anyhow!("boom"));
        assert_eq!(result.into_command_result(), CommandResult::failure("boom"));
    }

    #[test]
    fn test_into_command_result_keeps_context_chain() {
        use anyhow::Context;

        let result: Result<i32, anyhow::Error> =
            "x".parse::<i32>().context("first operand");
        let converted = result.into_command_result();
        assert!(converted.failed());
        assert!(converted.text.starts_with("first operand: "));
        assert!(converted.text.contains("invalid digit"));
    }

    #[test]
    fn test_fn_handler_with_command_result() {
        let mut handler = FnHandler::new(|inv: &Invocation| {
            if inv.has_flag("flag") {
                CommandResult::success("set")
            } else {
                CommandResult::success("unset")
            }
        });

        assert_eq!(handler.handle(&tokenize("flagcheck -flag")).text, "set");
        assert_eq!(handler.handle(&tokenize("flagcheck")).text, "unset");
    }

    #[test]
    fn test_fn_handler_with_custom_error_type() {
        #[derive(Debug)]
        struct CustomError(String);

        impl std::fmt::Display for CustomError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "CustomError: {}", self.0)
            }
        }

        impl std::error::Error for CustomError {}

        let mut handler = FnHandler::new(|_inv: &Invocation| {
            Err::<String, CustomError>(CustomError("oops".to_string()))
        });

        let result = handler.handle(&Invocation::default());
        assert!(result.failed());
        assert_eq!(result.text, "CustomError: oops");
    }

    #[test]
    fn test_fn_handler_mutation() {
        let mut counter = 0u32;
        let mut handler = FnHandler::new(|_inv: &Invocation| {
            counter += 1;
            Ok::<_, anyhow::Error>(counter)
        });

        let inv = Invocation::default();
        let _ = handler.handle(&inv);
        let _ = handler.handle(&inv);
        let result = handler.handle(&inv);

        assert_eq!(result.text, "3");
    }

    #[test]
    fn test_struct_handler_keeps_state() {
        struct Counter {
            count: u32,
        }

        impl Handler for Counter {
            fn handle(&mut self, _inv: &Invocation) -> CommandResult {
                self.count += 10;
                CommandResult::success(self.count.to_string())
            }
        }

        let mut handler: Box<dyn Handler> = Box::new(Counter { count: 0 });
        let inv = Invocation::default();
        assert_eq!(handler.handle(&inv).text, "10");
        assert_eq!(handler.handle(&inv).text, "20");
    }
}
