//! Interactive console prompts.
//!
//! [`Prompter`] owns the input and output streams for a run. Every line the
//! download flow prints goes through it, so the flow can be driven from a
//! terminal or from in-memory buffers alike.

use std::io::{self, BufRead, Write};

use console::{measure_text_width, style};

use crate::error::FetchError;

/// Console context: reads answers from `R`, writes prompts and messages to `W`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Borrow the output stream.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consume the prompter and return its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line.
    pub fn say(&mut self, message: impl AsRef<str>) -> Result<(), FetchError> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Ask the user to pick one of `choices`; empty input picks the last one.
    ///
    /// The list is shown as a table headed `Available {label}s`, with the
    /// default row highlighted. Input must match a choice exactly
    /// (case-sensitive). A mismatch re-displays the table and asks again.
    ///
    /// # Errors
    ///
    /// An empty `choices` list has no default to fall back on and is
    /// reported as [`FetchError::Input`] with [`io::ErrorKind::InvalidInput`]
    /// before anything is printed. Callers that fetch the list from the API
    /// reject an empty one earlier, as [`FetchError::Parse`]. Console I/O
    /// errors, including end of input, are also [`FetchError::Input`].
    pub fn choose(
        &mut self,
        label: &str,
        prompt: &str,
        choices: &[String],
    ) -> Result<String, FetchError> {
        let Some(default) = choices.last() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no {label}s to choose from"),
            )
            .into());
        };

        let table = render_table(&format!("Available {label}s"), choices);
        loop {
            self.output.write_all(table.as_bytes())?;
            let answer = self.ask(&format!("{prompt} ({}): ", style(default).cyan()))?;

            if answer.is_empty() {
                return Ok(default.clone());
            }
            if let Some(choice) = choices.iter().find(|c| **c == answer) {
                return Ok(choice.clone());
            }

            tracing::debug!(%answer, "rejected {label}");
            writeln!(
                self.output,
                "{}",
                style("Please select one of the available options").red()
            )?;
        }
    }

    /// Ask a yes/no question. Empty input returns `default`.
    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool, FetchError> {
        let hint = if default { "y" } else { "n" };
        loop {
            let answer = self.ask(&format!("{question} [y/n] ({}): ", style(hint).cyan()))?;
            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "{}", style("Please enter Y or N").red())?,
            }
        }
    }

    /// Print `prompt` and read one trimmed line.
    fn ask(&mut self, prompt: &str) -> Result<String, FetchError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed at prompt").into());
        }
        Ok(line.trim().to_owned())
    }
}

/// Render a one-column box table. The header is magenta and the last row,
/// the default choice, is cyan.
pub fn render_table(header: &str, rows: &[String]) -> String {
    let width = rows
        .iter()
        .map(|r| measure_text_width(r))
        .chain(std::iter::once(measure_text_width(header)))
        .max()
        .unwrap_or(0);
    let heavy = "━".repeat(width + 2);
    let light = "─".repeat(width + 2);

    let mut out = String::new();
    out.push_str(&format!("┏{heavy}┓\n"));
    out.push_str(&format!(
        "┃ {} ┃\n",
        style(pad(header, width)).magenta().bold()
    ));
    out.push_str(&format!("┡{heavy}┩\n"));
    for (i, row) in rows.iter().enumerate() {
        let cell = pad(row, width);
        if i + 1 == rows.len() {
            out.push_str(&format!("│ {} │\n", style(cell).cyan()));
        } else {
            out.push_str(&format!("│ {cell} │\n"));
        }
    }
    out.push_str(&format!("└{light}┘\n"));
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(measure_text_width(text));
    format!("{text}{}", " ".repeat(fill))
}
