//! Child process execution with live output relay.
//!
//! This module provides:
//! - Argument-vector commands (no shell interpretation)
//! - Concurrent draining of stdout and stderr
//! - Live mirroring of both streams to the terminal
//! - Captured output returned once the child exits
//!
//! # Example
//!
//! ```no_run
//! use rebound::execution::{execute, Command};
//!
//! let cmd = Command::new("python3").arg("script.py");
//! let output = execute(&cmd).unwrap();
//! println!("stderr was: {}", output.stderr);
//! ```

mod command;
mod relay;
mod result;

pub use command::Command;
pub use relay::{execute, execute_async, execute_with};
pub use result::{OutputSource, RelayLine, RelayOptions, RelayOutput, DEFAULT_SEPARATOR};
