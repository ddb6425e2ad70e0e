//! Sample commands.

use anyhow::{anyhow, Context};
use easycli_dispatch::{CommandResult, Dispatcher, Invocation, OutputMode};

/// Builds the dispatcher with every sample command registered.
pub fn dispatcher(mode: OutputMode) -> Dispatcher {
    Dispatcher::builder()
        .command("multiply", multiply)
        .command("echo", echo)
        .command("greet", greet)
        .mode(mode)
        .build()
}

fn operand(inv: &Invocation, index: usize) -> anyhow::Result<i64> {
    let raw = inv
        .argument(index)
        .ok_or_else(|| anyhow!("multiply expects two integers"))?;
    raw.parse()
        .with_context(|| format!("not an integer: {}", raw))
}

/// `multiply <a> <b>`
pub fn multiply(inv: &Invocation) -> anyhow::Result<i64> {
    let a = operand(inv, 0)?;
    let b = operand(inv, 1)?;
    a.checked_mul(b)
        .ok_or_else(|| anyhow!("{} * {} overflows", a, b))
}

/// `echo [words...] [-upper]`
pub fn echo(inv: &Invocation) -> CommandResult {
    let text = inv.arguments.join(" ");
    if inv.has_flag("upper") {
        CommandResult::success(text.to_uppercase())
    } else {
        CommandResult::success(text)
    }
}

/// `greet [name]`
pub fn greet(inv: &Invocation) -> CommandResult {
    let name = inv.argument(0).unwrap_or("world");
    CommandResult::success(format!("Hello, {}!", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply() {
        let mut cli = dispatcher(OutputMode::Text);
        assert_eq!(cli.execute("multiply 6 7"), CommandResult::success("42"));
    }

    #[test]
    fn test_multiply_bad_operand() {
        let mut cli = dispatcher(OutputMode::Text);
        let result = cli.execute("multiply 6 seven");
        assert!(!result.succeeded);
        assert_eq!(
            result.text,
            "not an integer: seven: invalid digit found in string"
        );
    }

    #[test]
    fn test_multiply_missing_operand() {
        let mut cli = dispatcher(OutputMode::Text);
        let result = cli.execute("multiply 6");
        assert_eq!(result, CommandResult::failure("multiply expects two integers"));
    }

    #[test]
    fn test_multiply_overflow() {
        let mut cli = dispatcher(OutputMode::Text);
        let result = cli.execute(&format!("multiply {} 2", i64::MAX));
        assert!(!result.succeeded);
        assert!(result.text.ends_with("overflows"));
    }

    #[test]
    fn test_echo() {
        let mut cli = dispatcher(OutputMode::Text);
        assert_eq!(cli.execute("echo a   b").text, "a b");
        assert_eq!(cli.execute("echo a -upper b").text, "A B");
        assert_eq!(cli.execute("echo").text, "");
    }

    #[test]
    fn test_greet() {
        let mut cli = dispatcher(OutputMode::Text);
        assert_eq!(cli.execute("greet").text, "Hello, world!");
        assert_eq!(cli.execute("greet Ada").text, "Hello, Ada!");
    }

    #[test]
    fn test_usage_lists_sample_commands() {
        let mut cli = dispatcher(OutputMode::Text);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        cli.run_with(["easycli"], &mut out, &mut err).unwrap();
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Available commands:\n\t- echo\n\t- greet\n\t- multiply\n"
        );
        assert!(out.is_empty());
    }
}
