//! ANSI escape stripping built on the VTE parser.

use vte::{Params, Parser, Perform};

/// Removes terminal control sequences from captured output.
pub struct OutputSanitizer;

impl OutputSanitizer {
    /// Strip ANSI escape codes from raw bytes.
    ///
    /// Printable text, newlines, carriage returns and tabs are kept.
    /// Invalid UTF-8 comes out as U+FFFD.
    pub fn strip_ansi(input: &[u8]) -> String {
        let mut text = TextCollector::default();
        let mut parser = Parser::new();
        parser.advance(&mut text, input);
        text.output
    }

    /// Strip ANSI codes from a string.
    pub fn strip_ansi_str(input: &str) -> String {
        Self::strip_ansi(input.as_bytes())
    }
}

/// Collects only what would be drawn as text.
#[derive(Default)]
struct TextCollector {
    output: String,
}

impl Perform for TextCollector {
    fn print(&mut self, c: char) {
        self.output.push(c);
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\n' | b'\r' | b'\t') {
            self.output.push(byte as char);
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {}

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn csi_dispatch(
        &mut self,
        _params: &Params,
        _intermediates: &[u8],
        _ignore: bool,
        _action: char,
    ) {
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}
}
