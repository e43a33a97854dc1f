//! # Shell
//!
//! Reads lines, turns each into a [`ShellCommand`] and prints what the
//! command returns.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Shell Line                                       │
//! │                                                                         │
//! │  product add --name "Kopi Susu" --price 8rb   # comment                 │
//! │         │                                                               │
//! │         │ split_line: quotes, escapes, `#` comments                     │
//! │         ▼                                                               │
//! │  ["product", "add", "--name", "Kopi Susu", "--price", "8rb"]            │
//! │         │                                                               │
//! │         │ ShellLine::try_parse_from (clap)                              │
//! │         ▼                                                               │
//! │  ShellCommand ──► commands::execute ──► Out ──► writer                  │
//! │                                                                         │
//! │  help / --help ──► clap's help text ──► writer                          │
//! │  anything clap rejects ──► CliError::Usage                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, warn};

use crate::args::{ShellCommand, ShellLine};
use crate::commands;
use crate::error::{CliError, CliResult};
use crate::state::Session;

const PROMPT: &str = "warung> ";

/// Whether the shell keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Splits a line into words the way a POSIX shell would, minus expansion.
///
/// ## Rules
/// ```text
/// plain words        split on whitespace
/// "double quoted"    one word; \" and \\ are escapes
/// 'single quoted'    one word; taken literally
/// \x outside quotes  the character x
/// # at word start    rest of the line is a comment
/// ```
pub fn split_line(line: &str) -> CliResult<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '#' if !in_word => break,
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => word.push(c),
                        None => return Err(CliError::usage("Unterminated ' quote")),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => word.push(c),
                            Some(c) => {
                                word.push('\\');
                                word.push(c);
                            }
                            None => return Err(CliError::usage("Unterminated \" quote")),
                        },
                        Some(c) => word.push(c),
                        None => return Err(CliError::usage("Unterminated \" quote")),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(c) => word.push(c),
                    None => return Err(CliError::usage("Trailing backslash")),
                }
            }
            c => {
                in_word = true;
                word.push(c);
            }
        }
    }

    if in_word {
        words.push(word);
    }
    Ok(words)
}

/// The line-driven front end over one [`Session`].
pub struct Shell<W: Write> {
    session: Session,
    out: W,
    json: bool,
}

impl<W: Write> Shell<W> {
    pub fn new(session: Session, out: W, json: bool) -> Self {
        Shell { session, out, json }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn out(&self) -> &W {
        &self.out
    }

    /// Runs one typed line.
    pub fn handle_line(&mut self, line: &str) -> CliResult<Flow> {
        let words = split_line(line)?;
        if words.is_empty() {
            return Ok(Flow::Continue);
        }
        self.run_words(&words)
    }

    /// Runs one command given as separate words, e.g. from the process
    /// arguments after `--`.
    pub fn run_words<S: AsRef<str>>(&mut self, words: &[S]) -> CliResult<Flow> {
        let words: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();
        let parsed = ShellLine::try_parse_from(words);
        let command = match parsed {
            Ok(line) => line.command,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                | ErrorKind::DisplayVersion => {
                    write!(self.out, "{}", err.render())?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    let rendered = err.render().to_string();
                    let message = rendered.trim_end();
                    let message = message.strip_prefix("error: ").unwrap_or(message);
                    return Err(CliError::usage(message));
                }
            },
        };

        let flow = match command {
            ShellCommand::Exit => Flow::Exit,
            _ => Flow::Continue,
        };
        let output = commands::execute(&mut self.session, command)?;
        writeln!(self.out, "{}", output.render(self.json)?)?;
        Ok(flow)
    }

    /// Reads lines until end of input or `exit`.
    ///
    /// Errors caused by a line are printed and the next line is read.
    /// Returns how many lines failed.
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> CliResult<usize> {
        let mut failures = 0;
        let mut lines = input.lines();

        loop {
            if interactive {
                write!(self.out, "{}", PROMPT)?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match self.handle_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) if err.is_recoverable() => {
                    failures += 1;
                    debug!(%line, "Line failed");
                    writeln!(self.out, "error: {}", err)?;
                }
                Err(err) => {
                    warn!(error = %err, "Stopping shell");
                    return Err(err);
                }
            }
        }

        self.out.flush()?;
        Ok(failures)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WarungConfig;
    use chrono::NaiveDate;

    fn shell() -> Shell<Vec<u8>> {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        Shell::new(Session::new(WarungConfig::default(), today), Vec::new(), false)
    }

    fn printed(shell: &Shell<Vec<u8>>) -> String {
        String::from_utf8(shell.out().clone()).unwrap()
    }

    #[test]
    fn test_split_plain_and_quoted() {
        assert_eq!(
            split_line(r#"product add --name "Kopi Susu" --category 'Minuman Panas'"#).unwrap(),
            vec!["product", "add", "--name", "Kopi Susu", "--category", "Minuman Panas"]
        );
        assert_eq!(split_line(r#"a\ b "x\"y""#).unwrap(), vec!["a b", "x\"y"]);
        assert_eq!(split_line(r#"--reference """#).unwrap(), vec!["--reference", ""]);
    }

    #[test]
    fn test_split_comments() {
        assert!(split_line("   # just a note").unwrap().is_empty());
        assert_eq!(split_line("cart show # peek").unwrap(), vec!["cart", "show"]);
        assert_eq!(split_line("journal add --reference INV#7").unwrap().len(), 4);
    }

    #[test]
    fn test_split_unterminated_quote() {
        let err = split_line(r#"product add --name "Kopi"#).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_handle_line_runs_command() {
        let mut sh = shell();
        let flow = sh
            .handle_line(r#"product add --name "Kopi Susu" --category Minuman --price 8rb --cost 5rb --stock 10"#)
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(sh.session().books().store().products().len(), 1);
        assert!(printed(&sh).contains("Kopi Susu"));
    }

    #[test]
    fn test_unknown_command_is_usage_error() {
        let mut sh = shell();
        let err = sh.handle_line("laporan").unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_help_is_printed() {
        let mut sh = shell();
        assert_eq!(sh.handle_line("help").unwrap(), Flow::Continue);
        assert!(printed(&sh).contains("product"));
    }

    #[test]
    fn test_run_continues_after_errors_and_stops_at_exit() {
        let mut sh = shell();
        let script = "\
# demo
product add --name Kopi --category Minuman --price 8rb --cost 5rb --stock 3
cart add Kopi --qty 9
cart add Kopi --qty 2
exit
cart clear
";
        let failures = sh.run(script.as_bytes(), false).unwrap();

        assert_eq!(failures, 1);
        assert_eq!(sh.session().cart().total_quantity(), 2);
        let text = printed(&sh);
        assert!(text.contains("error: "));
        assert!(text.trim_end().ends_with("Sampai jumpa!"));
    }

    #[test]
    fn test_oversized_amounts_are_rejected_and_reports_still_run() {
        let mut sh = shell();
        let script = "\
expense add --description a --amount 9223372036854775807
expense add --description b --amount 1000001jt
expense add --description c --amount 1000000jt
expense add --description d --amount 1
product add --name Kopi --category Minuman --price 8rb --cost 5rb --stock 999999999999
report summary
";
        let failures = sh.run(script.as_bytes(), false).unwrap();

        assert_eq!(failures, 3);
        assert_eq!(sh.session().books().store().expenses().len(), 2);
        assert!(sh.session().books().store().products().is_empty());
        assert!(printed(&sh).contains("Rp 1.000.000.000.001"));
    }

    #[test]
    fn test_json_output() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let mut sh = Shell::new(Session::new(WarungConfig::default(), today), Vec::new(), true);
        sh.handle_line("cart clear").unwrap();
        assert!(printed(&sh).contains("\"message\": \"Cart cleared\""));
    }
}
