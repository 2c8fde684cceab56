//! Indenting text buffer shared by the emitters.
//!
//! The JavaScript emitter indents with tabs; the declaration writer uses
//! four spaces through [`SourceWriter::with_indent`].
//!
//! Indentation is written lazily: `write_line` only marks the next line as
//! pending, and the indent is emitted by the first non-empty `write` on that
//! line. Blank lines therefore never carry trailing tabs.

const TAB: &str = "\t";

#[derive(Clone, Debug)]
pub struct SourceWriter {
    output: String,
    /// Text written once per indent level.
    indent_unit: &'static str,
    indent_level: u32,
    pending_indent: bool,
}

impl Default for SourceWriter {
    fn default() -> Self {
        SourceWriter::with_indent(TAB)
    }
}

impl SourceWriter {
    pub fn new() -> Self {
        SourceWriter::default()
    }

    pub fn with_indent(indent_unit: &'static str) -> Self {
        SourceWriter {
            output: String::new(),
            indent_unit,
            indent_level: 0,
            pending_indent: false,
        }
    }

    /// Write text. Must not contain newlines; use [`Self::write_line`].
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.pending_indent {
            for _ in 0..self.indent_level {
                self.output.push_str(self.indent_unit);
            }
            self.pending_indent = false;
        }
        self.output.push_str(text);
    }

    pub fn write_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.write(ch.encode_utf8(&mut buf));
    }

    pub fn write_space(&mut self) {
        self.write(" ");
    }

    /// End the current line.
    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.pending_indent = true;
    }

    /// Write a pre-rendered fragment that may span several lines, keeping
    /// the current indentation on each.
    pub fn write_fragment(&mut self, fragment: &str) {
        let mut lines = fragment.split('\n').peekable();
        while let Some(line) = lines.next() {
            self.write(line);
            if lines.peek().is_some() {
                self.write_line();
            }
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> u32 {
        self.indent_level
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    /// Take the text written so far and reset the writer.
    pub fn take_output(&mut self) -> String {
        self.indent_level = 0;
        self.pending_indent = false;
        std::mem::take(&mut self.output)
    }
}

#[cfg(test)]
#[path = "tests/source_writer_tests.rs"]
mod tests;
