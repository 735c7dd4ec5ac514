//! Processing of captured child output.
//!
//! Interpreters and compilers often colorize diagnostics. The relay
//! mirrors those bytes untouched, but captured text can be cleaned
//! before it is used to build a search query.
//!
//! # Example
//!
//! ```
//! use rebound::output::OutputSanitizer;
//!
//! let raw = b"\x1b[1;31merror\x1b[0m: expected `;`";
//! assert_eq!(OutputSanitizer::strip_ansi(raw), "error: expected `;`");
//! ```

mod sanitizer;

pub use sanitizer::OutputSanitizer;
