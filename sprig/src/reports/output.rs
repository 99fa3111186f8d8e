//! Where reports are rendered.

use std::io::{self, Write};

/// Target output for reports.
///
/// Reports say what to show through these methods; the implementation
/// decides the layout.
pub trait Output {
    /// Underlined heading.
    fn title(&mut self, text: &str);

    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    fn key_value_indented(&mut self, key: &str, value: &str);

    fn list_item(&mut self, text: &str);

    /// A file that was created.
    fn added_item(&mut self, text: &str);

    /// A line printed as-is.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain-text output, stdout unless another writer is given.
pub struct TerminalOutput<W: Write = io::Stdout> {
    writer: W,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalOutput<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    // A closed pipe (`sprig plan x | head`) is not worth failing the run over.
    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.writer, "{}", text);
    }
}

impl<W: Write> Output for TerminalOutput<W> {
    fn title(&mut self, text: &str) {
        self.line(format_args!("{}", text));
        self.line(format_args!("{}", "=".repeat(text.chars().count())));
    }

    fn section(&mut self, name: &str) {
        self.line(format_args!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.line(format_args!("{}: {}", key, value));
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        self.line(format_args!("  {:<14} {}", format!("{}:", key), value));
    }

    fn list_item(&mut self, text: &str) {
        self.line(format_args!("  - {}", text));
    }

    fn added_item(&mut self, text: &str) {
        self.line(format_args!("  + {}", text));
    }

    fn preformatted(&mut self, text: &str) {
        self.line(format_args!("{}", text));
    }

    fn newline(&mut self) {
        self.line(format_args!(""));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_layout() {
        let mut out = TerminalOutput::with_writer(Vec::new());
        out.title("São Paulo");
        out.key_value("input", "São Paulo");
        out.key_value_indented("file", "sao-paulo");
        out.section("Files (1)");
        out.added_item("sao-paulo.php");
        out.newline();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(
            text,
            "São Paulo\n\
             =========\n\
             input: São Paulo\n  \
             file:          sao-paulo\n\
             Files (1):\n  \
             + sao-paulo.php\n\
             \n"
        );
    }
}
