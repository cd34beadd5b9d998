//! Line-based terminal input
//!
//! [`SuggestPrompt`] drives an autocomplete [`Suggestions`] widget from plain
//! lines of input, so it works on any terminal and in tests:
//!
//! - any text replaces the value and re-filters the list
//! - `>` / `<` move the highlight down / up
//! - `#N` picks suggestion N
//! - `!` closes the list, as a pointer-down outside it would
//! - an empty line commits the highlighted suggestion, or accepts the
//!   current value when no list is open

use std::io::{BufRead, Write};

use crate::autocomplete::{Field, Key, Suggestions};
use crate::error::Result;

pub struct SuggestPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> SuggestPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one line without its line ending; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask for a free-text value with no suggestions.
    pub fn text(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    /// y/N question; anything but `y`/`yes` declines.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    /// Ask for `field` with suggestions drawn from `candidates`.
    ///
    /// End of input accepts whatever has been typed so far. The outside-click
    /// listener is registered for the duration of the prompt unless the
    /// caller already holds one.
    pub fn suggest(
        &mut self,
        label: &str,
        field: Field,
        candidates: &[String],
        suggestions: &mut Suggestions,
    ) -> Result<String> {
        let attached = suggestions.attach_outside_listener();
        let result = self.suggest_loop(label, field, candidates, suggestions);
        if attached {
            suggestions.detach_outside_listener();
        }
        result
    }

    fn suggest_loop(
        &mut self,
        label: &str,
        field: Field,
        candidates: &[String],
        suggestions: &mut Suggestions,
    ) -> Result<String> {
        suggestions.focus(field, candidates);
        let mut value = String::new();

        loop {
            if value.is_empty() {
                write!(self.output, "{label}: ")?;
            } else {
                write!(self.output, "{label} [{value}]: ")?;
            }
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                suggestions.clear();
                return Ok(value);
            };

            match line.as_str() {
                "" => {
                    if !suggestions.is_open() {
                        return Ok(value);
                    }
                    if let Some(commit) = suggestions.key(Key::Enter) {
                        return Ok(commit.value);
                    }
                }
                ">" => {
                    suggestions.key(Key::Down);
                }
                "<" => {
                    suggestions.key(Key::Up);
                }
                "!" => suggestions.pointer_down(false),
                pick if pick.starts_with('#') => {
                    let commit = pick[1..]
                        .trim()
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|index| suggestions.click(index));
                    match commit {
                        Some(commit) => return Ok(commit.value),
                        None => writeln!(self.output, "  no such suggestion: {pick}")?,
                    }
                }
                typed => {
                    value = typed.to_string();
                    suggestions.input(&value);
                }
            }

            self.render(suggestions)?;
        }
    }

    fn render(&mut self, suggestions: &Suggestions) -> Result<()> {
        for (i, item) in suggestions.suggestions().iter().enumerate() {
            let marker = if suggestions.highlighted() == Some(i) {
                '>'
            } else {
                ' '
            };
            writeln!(self.output, " {marker} {}. {item}", i + 1)?;
        }
        Ok(())
    }
}
