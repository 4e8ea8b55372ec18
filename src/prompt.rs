use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

pub const INVALID_INPUT: &str = "Invalid Input, Try Again.";

/// Prints `question` and returns the trimmed answer.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}").context("write prompt")?;
    output.flush().context("flush prompt")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("read answer")?;
    if read == 0 {
        bail!("input closed while waiting for an answer");
    }
    Ok(line.trim().to_string())
}

/// Asks until the answer is one of `valid`.
pub fn ask_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    valid: &[&str],
) -> Result<String> {
    loop {
        let answer = ask(input, output, question)?;
        if valid.contains(&answer.as_str()) {
            return Ok(answer);
        }
        writeln!(output, "{INVALID_INPUT}").context("write prompt")?;
    }
}

/// Empty answers fall back to `default` when there is one.
pub fn ask_with_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: Option<&str>,
) -> Result<String> {
    let answer = ask(input, output, question)?;
    match default {
        Some(default) if answer.is_empty() => Ok(default.to_string()),
        _ => Ok(answer),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{INVALID_INPUT, ask_choice, ask_with_default};

    #[test]
    fn choice_retries_until_valid() {
        let mut input = Cursor::new("3\nyes\n 2 \n");
        let mut output = Vec::new();
        let answer = ask_choice(&mut input, &mut output, "Pick: ", &["1", "2"]).expect("answer");
        assert_eq!(answer, "2");
        let printed = String::from_utf8(output).expect("utf8");
        assert_eq!(printed.matches(INVALID_INPUT).count(), 2);
        assert_eq!(printed.matches("Pick: ").count(), 3);
    }

    #[test]
    fn choice_fails_when_input_runs_out() {
        let mut input = Cursor::new("9\n");
        let mut output = Vec::new();
        assert!(ask_choice(&mut input, &mut output, "Pick: ", &["1"]).is_err());
    }

    #[test]
    fn empty_answer_uses_default() {
        let mut input = Cursor::new("\nChelsea\n");
        let mut output = Vec::new();
        let first = ask_with_default(&mut input, &mut output, "Season: ", Some("2024")).unwrap();
        let second = ask_with_default(&mut input, &mut output, "Team: ", None).unwrap();
        assert_eq!(first, "2024");
        assert_eq!(second, "Chelsea");
    }
}
