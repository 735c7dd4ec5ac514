//! The process relay.
//!
//! A child is spawned with both output pipes captured. Two reader
//! threads drain the pipes line by line, accumulating what they read
//! and pushing every line onto a shared print queue. A printer thread
//! pops the queue and mirrors each line to the terminal. The calling
//! thread waits for the child, joins both readers, sends the shutdown
//! sentinel and joins the printer before handing back the captured text.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{ExitStatus, Stdio};
use std::thread;
use std::time::Instant;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace, warn};

use super::command::Command;
use super::result::{OutputSource, RelayLine, RelayOptions, RelayOutput};
use crate::error::ReboundError;
use crate::output::OutputSanitizer;
use crate::Result;

/// Item carried by the print queue.
#[derive(Debug)]
enum PrintItem {
    Line(RelayLine),
    /// Sentinel: no more lines will be queued.
    Shutdown,
}

/// Run `command`, mirroring its output to stdout, and return what it wrote.
///
/// Lines are joined with a single space. See [`execute_with`] to choose
/// the separator or the mirror target.
///
/// # Errors
///
/// Returns [`ReboundError::Launch`] if the program cannot be started.
pub fn execute(command: &Command) -> Result<RelayOutput> {
    execute_with(command, &RelayOptions::default(), io::stdout())
}

/// Run `command`, mirroring every output line into `sink`.
///
/// Blocks until the child exits and all three relay threads have been
/// joined, so everything written to `sink` is flushed on return.
pub fn execute_with<W>(command: &Command, options: &RelayOptions, sink: W) -> Result<RelayOutput>
where
    W: Write + Send,
{
    let start = Instant::now();

    let mut child = command
        .to_std()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ReboundError::Launch {
            program: command.program.clone(),
            source,
        })?;

    debug!(
        command = %command.display_line(),
        pid = child.id(),
        "spawned child process"
    );

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("child stderr was not captured"))?;

    let (tx, rx) = mpsc::unbounded_channel();
    let strip = options.strip_ansi;

    let (status, out_lines, err_lines) = thread::scope(|scope| {
        let printer = scope.spawn(move || print_lines(rx, sink));

        let out_tx = tx.clone();
        let out_reader =
            scope.spawn(move || read_lines(stdout, OutputSource::Stdout, out_tx, strip));
        let err_tx = tx.clone();
        let err_reader =
            scope.spawn(move || read_lines(stderr, OutputSource::Stderr, err_tx, strip));

        let status = wait_child(&mut child);

        let out_lines = out_reader.join();
        let err_lines = err_reader.join();

        // Readers are done, so the sentinel is queued behind every line.
        let _ = tx.send(PrintItem::Shutdown);
        drop(tx);
        let printed = printer.join();

        match &printed {
            Ok(count) => debug!(lines = count, "printer finished"),
            Err(_) => warn!("printer thread panicked"),
        }

        let out_lines = out_lines.map_err(|_| ReboundError::TaskPanicked("stdout reader"))?;
        let err_lines = err_lines.map_err(|_| ReboundError::TaskPanicked("stderr reader"))?;
        printed.map_err(|_| ReboundError::TaskPanicked("printer"))?;

        Ok::<_, ReboundError>((status?, out_lines, err_lines))
    })?;

    let duration = start.elapsed();
    debug!(?status, ?duration, "child exited");

    Ok(RelayOutput {
        stdout: out_lines.join(&options.separator),
        stderr: err_lines.join(&options.separator),
        exit_code: status.code(),
        duration,
    })
}

/// Run [`execute_with`] on the blocking pool, mirroring to stdout.
pub async fn execute_async(command: Command, options: RelayOptions) -> Result<RelayOutput> {
    tokio::task::spawn_blocking(move || execute_with(&command, &options, io::stdout()))
        .await
        .map_err(|_| ReboundError::TaskPanicked("relay"))?
}

fn wait_child(child: &mut std::process::Child) -> Result<ExitStatus> {
    match child.wait() {
        Ok(status) => Ok(status),
        Err(e) => {
            // Readers only finish once the pipes close.
            let _ = child.kill();
            Err(ReboundError::Wait(e))
        }
    }
}

/// Drain one pipe until EOF, returning the accumulated lines.
fn read_lines<R: Read>(
    pipe: R,
    source: OutputSource,
    tx: UnboundedSender<PrintItem>,
    strip_ansi: bool,
) -> Vec<String> {
    let mut reader = BufReader::new(pipe);
    let mut accumulated = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                debug!(?source, lines = accumulated.len(), "reader: EOF");
                break;
            }
            Ok(_) => {
                let line = RelayLine::decode(&buf, source);
                trace!(?source, "{}", line.text);
                if strip_ansi {
                    accumulated.push(OutputSanitizer::strip_ansi_str(&line.text));
                } else {
                    accumulated.push(line.text.clone());
                }
                // Only fails if the printer is gone; capture continues regardless.
                let _ = tx.send(PrintItem::Line(line));
            }
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(?source, "reader error: {}", e);
                break;
            }
        }
    }

    accumulated
}

/// Pop the print queue until the sentinel, writing each line to `sink`.
fn print_lines<W: Write>(mut rx: UnboundedReceiver<PrintItem>, mut sink: W) -> usize {
    let mut printed = 0;
    let mut sink_ok = true;

    while let Some(item) = rx.blocking_recv() {
        let line = match item {
            PrintItem::Line(line) => line,
            PrintItem::Shutdown => break,
        };
        if !sink_ok {
            continue;
        }
        let written = writeln!(sink, "{}", line.text).and_then(|_| sink.flush());
        match written {
            Ok(()) => printed += 1,
            Err(e) => {
                // Keep draining so readers never stall on a dead terminal.
                warn!("printer: write failed, dropping further output: {}", e);
                sink_ok = false;
            }
        }
    }

    printed
}
