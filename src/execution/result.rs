//! Relay result and line types.

use std::time::Duration;

/// Which pipe a line was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// One decoded line of child output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayLine {
    /// Stream source.
    pub source: OutputSource,
    /// Decoded text, without the line terminator.
    pub text: String,
}

impl RelayLine {
    /// Decode raw line bytes, replacing invalid UTF-8 with U+FFFD.
    ///
    /// A trailing `\n` or `\r\n` is removed.
    pub fn decode(raw: &[u8], source: OutputSource) -> Self {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        Self {
            source,
            text: String::from_utf8_lossy(raw).into_owned(),
        }
    }
}

/// Options controlling how captured output is flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOptions {
    /// Separator used to join accumulated lines.
    pub separator: String,
    /// Strip ANSI escape sequences from accumulated lines.
    ///
    /// The live terminal mirror always receives the raw line.
    pub strip_ansi: bool,
}

/// Default join separator for accumulated lines.
pub const DEFAULT_SEPARATOR: &str = " ";

impl Default for RelayOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            strip_ansi: false,
        }
    }
}

impl RelayOptions {
    /// Set the join separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set whether to strip ANSI sequences from captured text.
    pub fn strip_ansi(mut self, strip: bool) -> Self {
        self.strip_ansi = strip;
        self
    }
}

/// Captured output of one relay call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayOutput {
    /// Joined stdout lines.
    pub stdout: String,
    /// Joined stderr lines.
    pub stderr: String,
    /// Exit code, `None` when the child was killed by a signal.
    pub exit_code: Option<i32>,
    /// Wall time from spawn to exit.
    pub duration: Duration,
}

impl RelayOutput {
    /// Check if the child exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Split into `(stdout_text, stderr_text)`.
    pub fn into_pair(self) -> (String, String) {
        (self.stdout, self.stderr)
    }
}
