//! Yes/no confirmation prompts.

use console::Term;
use std::io;

/// Ask a yes/no question on stderr and wait for an answer.
///
/// An empty answer picks `default`. When stdin is not a terminal the
/// default is returned without waiting.
pub fn confirm(question: &str, default: bool) -> io::Result<bool> {
    let term = Term::stderr();
    if !term.is_term() {
        return Ok(default);
    }

    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        term.write_str(&format!("{} {} ", question, hint))?;
        let answer = term.read_line()?;
        match parse_answer(&answer, default) {
            Some(choice) => return Ok(choice),
            None => term.write_line("Please respond with 'yes', 'no', 'y', or 'n'.")?,
        }
    }
}

fn parse_answer(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("", false), Some(false));
        assert_eq!(parse_answer("\n", true), Some(true));
        assert_eq!(parse_answer("Y", false), Some(true));
        assert_eq!(parse_answer(" yes ", false), Some(true));
        assert_eq!(parse_answer("No", true), Some(false));
        assert_eq!(parse_answer("maybe", true), None);
    }
}
