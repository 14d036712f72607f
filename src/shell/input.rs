//! Prompting and input parsing for the interactive shell

use std::io::{BufRead, Write};

use crate::error::{ExpenseError, ExpenseResult};

/// Print `prompt` and read one trimmed line; `None` at end of input
///
/// Bytes that are not valid UTF-8 are replaced rather than treated as an
/// I/O failure, so the caller sees ordinary (invalid) text.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> ExpenseResult<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
}

/// Ask a yes/no question; anything but "y"/"yes" (or end of input) is no
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> ExpenseResult<bool> {
    let answer = prompt_line(input, output, question)?.unwrap_or_default();
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// Parse a decimal amount such as "12.50" or "$12.50"
///
/// Only syntax is checked here; range and finiteness are validated when the
/// expense is built.
pub fn parse_amount(s: &str) -> ExpenseResult<f64> {
    let s = s.trim();
    let s = s.strip_prefix('$').unwrap_or(s);

    if s.is_empty() {
        return Err(ExpenseError::Input("an amount is required".into()));
    }

    s.parse::<f64>()
        .map_err(|_| ExpenseError::Input(format!("'{}' is not a valid amount", s)))
}

/// Parse a month number in 1-12
pub fn parse_month(s: &str) -> ExpenseResult<u32> {
    let month: u32 = s
        .trim()
        .parse()
        .map_err(|_| ExpenseError::Input(format!("'{}' is not a valid month", s.trim())))?;

    if !(1..=12).contains(&month) {
        return Err(ExpenseError::Input(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(month)
}

pub fn parse_year(s: &str) -> ExpenseResult<i32> {
    s.trim()
        .parse()
        .map_err(|_| ExpenseError::Input(format!("'{}' is not a valid year", s.trim())))
}
