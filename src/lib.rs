//! # rebound
//!
//! Run a program, watch its output live, and look up the error it dies with.
//!
//! The heart of the crate is the process relay in [`execution`]: it
//! launches a child with both output pipes captured, mirrors every line
//! to the terminal as it arrives, and returns the captured stdout and
//! stderr once the child has exited. The remaining modules turn the
//! captured stderr into a search query and show the results.
//!
//! ## Features
//!
//! - **Live relay**: stdout and stderr are drained concurrently and
//!   mirrored in arrival order
//! - **No shell**: arguments go straight to process creation
//! - **Lossless capture**: every line lands exactly once in the result,
//!   invalid UTF-8 is replaced rather than fatal
//! - **Structured shutdown**: reader and printer threads are all joined
//!   before the relay returns
//!
//! ## Quick Start
//!
//! ```no_run
//! use rebound::{execute, extract_error, Command, Language, SearchQuery};
//!
//! fn main() -> rebound::Result<()> {
//!     rebound::logging::try_init().ok();
//!
//!     let cmd = Command::new("python3").arg("app.py");
//!     let output = execute(&cmd)?;
//!
//!     if let Some(message) = extract_error(&output.stderr, Some(Language::Python)) {
//!         let query = SearchQuery::new(message, Some(Language::Python));
//!         println!("{}", query.to_url("https://stackoverflow.com/search"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod execution;
pub mod extract;
pub mod language;
pub mod logging;
pub mod output;
pub mod search;

// Re-export commonly used types
pub use display::{PlainPresenter, Presenter};
pub use error::{ReboundError, Result};
pub use execution::{
    execute, execute_async, execute_with, Command, OutputSource, RelayOptions, RelayOutput,
};
pub use extract::extract_error;
pub use language::Language;
pub use output::OutputSanitizer;
pub use search::{SearchBackend, SearchQuery, SearchResult, UrlBackend};
