//! External process execution.
//!
//! Runs a program to completion, streaming its output to the log while
//! capturing it, and turns a non-zero exit into [`ActionError::CommandFailed`].

use crate::cli::OutputManager;
use crate::error::{ActionError, Result};
use anyhow::Context;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Options for a single process run
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecOptions<'a> {
    /// Working directory; inherits ours when `None`
    pub cwd: Option<&'a Path>,
    /// Where to echo the command line and its output; silent when `None`
    pub echo: Option<&'a OutputManager>,
}

impl<'a> ExecOptions<'a> {
    /// Run without echoing anything
    pub fn silent() -> Self {
        Self::default()
    }

    /// Echo the command and its output
    pub fn echo(output: &'a OutputManager) -> Self {
        Self {
            cwd: None,
            echo: Some(output),
        }
    }

    /// Run in a specific directory
    pub fn in_dir(mut self, cwd: &'a Path) -> Self {
        self.cwd = Some(cwd);
        self
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Both streams, line by line in the order they were read
    pub combined: String,
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

type LineEvent = std::io::Result<(Stream, String)>;

/// Run `program` with `args` and wait for it to exit.
///
/// Output is decoded lossily: bytes that are not valid UTF-8 become
/// `U+FFFD` and both pipes are drained to EOF.
///
/// # Errors
///
/// * `Spawn` - the program could not be started
/// * `CommandFailed` - the program exited with a non-zero status
/// * `Anyhow` - reading the pipes or waiting for the exit status failed
pub async fn execute<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    options: ExecOptions<'_>,
) -> Result<CommandOutput> {
    if let Some(echo) = options.echo {
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.as_ref().to_string_lossy().into_owned())
            .collect();
        let _ = echo.println(&format!("[command]{} {}", program, rendered.join(" ")));
    }
    log::debug!("Spawning {program}");

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = options.cwd {
        command.current_dir(cwd);
    }

    let mut child = command.spawn().map_err(|source| ActionError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let (tx, mut rx) = mpsc::unbounded_channel::<LineEvent>();
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_lines(stdout, Stream::Stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_lines(stderr, Stream::Stderr, tx.clone()));
    }
    drop(tx);

    let mut captured = CommandOutput::default();
    let mut read_error = None;
    while let Some(event) = rx.recv().await {
        match event {
            Ok((stream, line)) => {
                if let Some(echo) = options.echo {
                    let _ = echo.println(&line);
                }
                let target = match stream {
                    Stream::Stdout => &mut captured.stdout,
                    Stream::Stderr => &mut captured.stderr,
                };
                target.push_str(&line);
                target.push('\n');
                captured.combined.push_str(&line);
                captured.combined.push('\n');
            }
            Err(e) => {
                read_error.get_or_insert(e);
            }
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to wait for {program}"))?;
    if let Some(e) = read_error {
        return Err(anyhow::Error::new(e)
            .context(format!("Failed to read output of {program}"))
            .into());
    }
    if !status.success() {
        return Err(ActionError::CommandFailed {
            program: program.to_string(),
            exit_code: status.code().unwrap_or(-1),
        });
    }

    Ok(captured)
}

/// Run a program and return its combined output.
pub async fn execute_command<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    output: &OutputManager,
) -> Result<String> {
    let captured = execute(program, args, ExecOptions::echo(output)).await?;
    Ok(captured.combined)
}

/// Run a program silently and report only whether it exited cleanly.
pub async fn probe<S: AsRef<OsStr>>(program: &str, args: &[S]) -> std::io::Result<bool> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await?;
    Ok(status.success())
}

/// Send each line of `reader` until EOF, or until the first read error.
async fn forward_lines<R>(reader: R, stream: Stream, tx: mpsc::UnboundedSender<LineEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\n', '\r'])
                    .to_string();
                if tx.send(Ok((stream, line))).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = tx.send(Err(e));
                break;
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_and_stderr() {
        let out = execute("sh", &["-c", "echo out; echo err >&2"], ExecOptions::silent())
            .await
            .unwrap();
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[tokio::test]
    async fn combined_output_follows_arrival_order() {
        let out = execute(
            "sh",
            &["-c", "echo first >&2; sleep 0.2; echo second"],
            ExecOptions::silent(),
        )
        .await
        .unwrap();
        assert_eq!(out.combined, "first\nsecond\n");
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced_and_reading_continues() {
        let out = execute(
            "sh",
            &["-c", r"printf 'a \377 b\r\n'; seq 1 20000; echo last"],
            ExecOptions::silent(),
        )
        .await
        .unwrap();

        let lines: Vec<&str> = out.stdout.lines().collect();
        assert_eq!(lines[0], "a \u{FFFD} b");
        assert_eq!(lines.len(), 20002);
        assert_eq!(lines[20001], "last");
    }

    #[tokio::test]
    async fn non_zero_exit_is_command_failed() {
        let err = execute("sh", &["-c", "exit 3"], ExecOptions::silent())
            .await
            .unwrap_err();
        match err {
            ActionError::CommandFailed { program, exit_code } => {
                assert_eq!(program, "sh");
                assert_eq!(exit_code, 3);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let err = execute("definitely-not-a-real-program-xyz", &["x"], ExecOptions::silent())
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Spawn { .. }));
    }

    #[tokio::test]
    async fn echo_includes_command_line_and_output() {
        let (output, lines) = OutputManager::capturing();
        let combined = execute_command("sh", &["-c", "echo hi"], &output).await.unwrap();
        assert_eq!(combined, "hi\n");

        let lines = lines.lock().unwrap();
        assert_eq!(lines[0], "[command]sh -c echo hi");
        assert_eq!(lines[1], "hi");
    }

    #[tokio::test]
    async fn cwd_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let out = execute("pwd", &[] as &[&str], ExecOptions::silent().in_dir(dir.path()))
            .await
            .unwrap();
        let reported = std::fs::canonicalize(out.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[tokio::test]
    async fn probe_reports_exit_status() {
        assert!(probe("sh", &["-c", "exit 0"]).await.unwrap());
        assert!(!probe("sh", &["-c", "exit 1"]).await.unwrap());
        assert!(probe("definitely-not-a-real-program-xyz", &["x"]).await.is_err());
    }
}
