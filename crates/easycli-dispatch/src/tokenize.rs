//! Input tokenization.
//!
//! Turns a raw input line into an [`Invocation`]: the command name, its
//! positional arguments and its flags. Splitting is shell-like in that runs of
//! whitespace collapse into a single delimiter, but there is no quoting or
//! escaping.
//!
//! ```text
//! "echo hello world -oneline"
//!   → command:   "echo"
//!     arguments: ["hello", "world"]
//!     flags:     ["oneline"]
//! ```

use serde::Serialize;

/// Character that marks a token as a flag.
///
/// Exactly one occurrence is stripped, so `--verbose` is stored as the flag
/// `-verbose`.
pub const FLAG_PREFIX: char = '-';

/// A tokenized input line.
///
/// Classification is purely positional: the first token is always the
/// command, and every later token is a flag iff it starts with
/// [`FLAG_PREFIX`]. Nothing here knows which flags a handler accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Invocation {
    /// The first token, or empty if the input had none.
    pub command: String,
    /// Tokens without the flag prefix, in input order.
    pub arguments: Vec<String>,
    /// Flag tokens with one prefix character removed, in input order.
    pub flags: Vec<String>,
}

impl Invocation {
    /// Returns true if `flag` (without its prefix) was given.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Returns true if `argument` appears among the positional arguments.
    pub fn has_argument(&self, argument: &str) -> bool {
        self.arguments.iter().any(|a| a == argument)
    }

    /// Returns the positional argument at `index`, if present.
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(String::as_str)
    }

    /// Returns true if the input contained no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.command.is_empty() && self.arguments.is_empty() && self.flags.is_empty()
    }
}

/// Parses a raw input line into an [`Invocation`].
///
/// Never fails. Empty or all-whitespace input yields an empty invocation.
///
/// Whitespace is Unicode whitespace ([`char::is_whitespace`]), so a
/// non-breaking space (U+00A0) or an ideographic space (U+3000) separates
/// tokens just like an ASCII space or tab.
pub fn tokenize(input: &str) -> Invocation {
    let mut tokens = input.split_whitespace();
    let mut invocation = Invocation {
        command: tokens.next().unwrap_or_default().to_string(),
        ..Invocation::default()
    };

    for token in tokens {
        match token.strip_prefix(FLAG_PREFIX) {
            Some(flag) => invocation.flags.push(flag.to_string()),
            None => invocation.arguments.push(token.to_string()),
        }
    }

    tracing::trace!(
        command = %invocation.command,
        arguments = invocation.arguments.len(),
        flags = invocation.flags.len(),
        "tokenized input"
    );

    invocation
}
