//! Interactive yes/no confirmation.

use std::io::{self, BufRead, Write};

/// Answers accepted as yes.
pub const YES_RESPONSES: &[&str] = &["y", "yes"];
/// Answers accepted as no. An empty answer also means no.
pub const NO_RESPONSES: &[&str] = &["n", "no"];

/// Asks the user to confirm an action.
pub trait Confirm {
    /// Returns `Ok(true)` if the user accepted `question`.
    ///
    /// # Errors
    /// Returns an IO error if the question cannot be asked or answered.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Accepts every question without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        tracing::debug!("auto-confirmed: {}", question);
        Ok(true)
    }
}

/// Line-based prompt: writes the question, reads one answer per line.
///
/// Unrecognised answers repeat the question; end of input counts as no.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Creates a prompt over the given reader and writer.
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Creates a prompt reading stdin and writing stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut line = String::new();
        loop {
            write!(self.output, "{question} (y/N) ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }

            let answer = line.trim().to_lowercase();
            if answer.is_empty() || NO_RESPONSES.contains(&answer.as_str()) {
                return Ok(false);
            }
            if YES_RESPONSES.contains(&answer.as_str()) {
                return Ok(true);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let mut prompt = TerminalPrompt::new(Cursor::new(input.as_bytes()), &mut output);
        let answer = prompt.confirm("Write?").expect("prompt failed");
        (answer, String::from_utf8(output).expect("non UTF-8 prompt"))
    }

    #[test]
    fn test_yes_answers() {
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(ask("  Yes  \n").0);
    }

    #[test]
    fn test_no_answers() {
        assert!(!ask("n\n").0);
        assert!(!ask("No\n").0);
        assert!(!ask("\n").0);
    }

    #[test]
    fn test_end_of_input_is_no() {
        assert!(!ask("").0);
    }

    #[test]
    fn test_unrecognised_answer_reprompts() {
        let (answer, output) = ask("maybe\nsure\ny\n");
        assert!(answer);
        assert_eq!(output.matches("Write? (y/N) ").count(), 3);
    }

    #[test]
    fn test_assume_yes() {
        assert!(AssumeYes.confirm("Delete everything?").expect("prompt failed"));
    }
}
