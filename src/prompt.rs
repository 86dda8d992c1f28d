//! Interactive service selection.

use anyhow::{Result, bail};
use std::io::{BufRead, Write};

/// Asks the user to pick one of `options` by number or by name.
///
/// Empty input selects `default` when it is one of the options. Anything
/// else that does not match is reported and asked again.
pub fn select_with_io<R: BufRead, W: Write>(
    message: &str,
    options: &[String],
    default: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    if options.is_empty() {
        bail!("Nothing to choose from");
    }
    let default = default.filter(|d| options.iter().any(|o| o == d));

    for (index, option) in options.iter().enumerate() {
        writeln!(output, "{:>3}) {}", index + 1, option)?;
    }

    loop {
        match default {
            Some(default) => write!(output, "{} [{}] ", message, default)?,
            None => write!(output, "{} ", message)?,
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("No selection made");
        }

        let answer = line.trim();
        if answer.is_empty() {
            if let Some(default) = default {
                return Ok(default.to_string());
            }
        } else if let Some(option) = options.iter().find(|o| o.eq_ignore_ascii_case(answer)) {
            return Ok(option.clone());
        } else if let Ok(number) = answer.parse::<usize>() {
            if let Some(option) = number.checked_sub(1).and_then(|i| options.get(i)) {
                return Ok(option.clone());
            }
        }

        writeln!(output, "Please enter a number between 1 and {} or a name.", options.len())?;
    }
}
