// Yes/no/quit prompt for each candidate
// Generic over reader and writer so it can be driven from tests

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use super::size::format_size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Quit,
}

/// Anything that isn't a yes or a quit is a no.
pub fn parse_answer(line: &str) -> Answer {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Answer::Yes,
        "q" | "quit" => Answer::Quit,
        _ => Answer::No,
    }
}

/// Write `question`, then read one line. End of input counts as quit.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<Answer> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(Answer::Quit);
    }

    Ok(parse_answer(&line))
}

pub fn delete_question(path: &Path, size: u64) -> String {
    format!(
        "({}) delete {}? [y/n/q] ",
        format_size(size).as_str().yellow(),
        path.display().to_string().as_str().bold()
    )
}
