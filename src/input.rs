//! Interactive prompts. Generic over the reader and writer so the re-prompt
//! loops can be driven from tests with in-memory buffers.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::time::Duration;

use crate::alphabet::Alphabet;
use crate::validation::{parse_time_limit, validate_password};

const RULE: &str = "***************************************";

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("input closed before a valid value was entered");
    }
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Prompt until a valid password is entered; each rejection prints its reason.
pub fn prompt_password<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    alphabet: &Alphabet,
    min_length: usize,
    max_length: usize,
) -> Result<String> {
    loop {
        writeln!(output, "{}", RULE)?;
        writeln!(
            output,
            "Enter a password ({} - {} characters): ",
            min_length, max_length
        )?;
        output.flush()?;
        let password = read_line(input)?;
        writeln!(output)?;
        match validate_password(&password, alphabet, min_length, max_length) {
            Ok(()) => return Ok(password),
            Err(e) => writeln!(output, "{}\n", e)?,
        }
    }
}

/// Prompt until a valid `hh:mm:ss` time limit is entered.
pub fn prompt_time_limit<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Duration> {
    loop {
        writeln!(output, "{}", RULE)?;
        writeln!(output, "Time Limit (hh:mm:ss): ")?;
        output.flush()?;
        let line = read_line(input)?;
        match parse_time_limit(&line) {
            Ok(limit) => {
                writeln!(output)?;
                return Ok(limit);
            }
            Err(e) => writeln!(output, "{}\n", e)?,
        }
    }
}
