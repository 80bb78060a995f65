//! Colored terminal output for action runs
//!
//! Provides consistent, colored CLI output. Workflow commands (`::name::data`)
//! are written uncolored so the runner can parse them.

use std::io::Write;
use std::sync::{Arc, Mutex};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Where output ends up
#[derive(Debug)]
enum Sink {
    /// Colored stdout
    Terminal(BufferWriter),
    /// Plain lines kept in memory
    Capture(Arc<Mutex<Vec<String>>>),
}

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    sink: Sink,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        let sink = match &self.sink {
            Sink::Terminal(_) => Sink::Terminal(BufferWriter::stdout(ColorChoice::Auto)),
            Sink::Capture(lines) => Sink::Capture(Arc::clone(lines)),
        };
        Self {
            sink,
            quiet: self.quiet,
        }
    }
}

impl OutputManager {
    /// Create a new output manager writing to stdout
    pub fn new(quiet: bool) -> Self {
        Self {
            sink: Sink::Terminal(BufferWriter::stdout(ColorChoice::Auto)),
            quiet,
        }
    }

    /// Create an output manager that records lines instead of printing them.
    ///
    /// Returns the shared line buffer alongside the manager.
    pub fn capturing() -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let manager = Self {
            sink: Sink::Capture(Arc::clone(&lines)),
            quiet: false,
        };
        (manager, lines)
    }

    fn emit(&self, marker: Option<(&str, ColorSpec)>, message: &str) -> std::io::Result<()> {
        match &self.sink {
            Sink::Capture(lines) => {
                let line = match marker {
                    Some((symbol, _)) => format!("{symbol} {message}"),
                    None => message.to_string(),
                };
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
                Ok(())
            }
            Sink::Terminal(bufwtr) => {
                let mut buffer = bufwtr.buffer();
                if let Some((symbol, spec)) = marker {
                    let _ = buffer.set_color(&spec);
                    let _ = write!(&mut buffer, "{symbol}");
                    let _ = buffer.reset();
                    let _ = write!(&mut buffer, " ");
                }
                let _ = writeln!(&mut buffer, "{message}");
                bufwtr.print(&buffer)
            }
        }
    }

    /// Print an info message (normal output)
    pub fn info(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.emit(Some(("ℹ", ColorSpec::new().set_fg(Some(Color::Cyan)).clone())), message)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.emit(
            Some((
                "✓",
                ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true).clone(),
            )),
            message,
        )
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.emit(None, &format!("    {message}"))
    }

    /// Print a plain message (respects quiet mode)
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.emit(None, message)
    }

    /// Write a workflow command line verbatim (never suppressed)
    pub fn command(&self, line: &str) -> std::io::Result<()> {
        self.emit(None, line)
    }
}
