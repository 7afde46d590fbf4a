//! Child processes with streamed output.

use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;

use crate::error::{KettleError, Result};
use crate::reporter::Reporter;

/// Run `program` with `args`, forwarding every stdout and stderr line to
/// `reporter` as it arrives.
///
/// Returns once both streams are closed and the child has exited. A non-zero
/// exit is [`KettleError::CommandFailed`].
pub fn run_streamed<I, S>(program: &str, args: I, reporter: &dyn Reporter) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let command_line = format!("{cmd:?}");
    tracing::debug!(command = %command_line, "spawning");

    let mut child = cmd.spawn().map_err(|e| KettleError::CommandFailed {
        command: command_line.clone(),
        status: e.to_string(),
    })?;

    let (tx, rx) = mpsc::channel::<String>();
    let mut readers = Vec::with_capacity(2);
    if let Some(stdout) = child.stdout.take() {
        readers.push(forward_lines(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(forward_lines(stderr, tx.clone()));
    }
    drop(tx);

    for line in rx {
        reporter.output_line(&line);
    }
    for reader in readers {
        let _ = reader.join();
    }

    let status = child.wait().map_err(|e| KettleError::CommandFailed {
        command: command_line.clone(),
        status: e.to_string(),
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(KettleError::CommandFailed {
            command: command_line,
            status: status.to_string(),
        })
    }
}

fn forward_lines<R: Read + Send + 'static>(
    stream: R,
    tx: mpsc::Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        // Keep draining until EOF so the child never sees a closed pipe.
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\n', '\r']);
                    if tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
            }
        }
    })
}
