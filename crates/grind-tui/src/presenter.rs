#![forbid(unsafe_code)]

//! The line-diffing terminal presenter.
//!
//! Every frame is a full-screen string; the presenter keeps the previously
//! drawn frame's lines and emits cursor-positioning, erase-line, and
//! rewrite sequences only for lines that differ. Redraws happen on every
//! input event, so terminal output is bounded by what actually changed;
//! a naive full repaint flickers visibly at ordinary screen sizes.
//!
//! [`Presenter::invalidate`] forces the next present to repaint
//! everything; the runtime calls it after a screen change, a resize, or an
//! external process (the editor) has drawn over the alternate screen.

use std::io::{self, Write};

/// Writes frames to a terminal, redrawing only changed lines.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    writer: W,
    /// Lines of the last frame actually drawn.
    last_frame: Vec<String>,
    force_full: bool,
}

impl<W: Write> Presenter<W> {
    /// A presenter writing to `writer`. The first present is always a full
    /// repaint.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_frame: Vec::new(),
            force_full: true,
        }
    }

    /// Discard diff state; the next [`present`](Self::present) repaints the
    /// whole screen.
    pub fn invalidate(&mut self) {
        self.force_full = true;
    }

    /// Draw `frame`, returning the number of lines written.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn present(&mut self, frame: &str) -> io::Result<usize> {
        let lines: Vec<String> = frame.split('\n').map(str::to_string).collect();

        let full = self.force_full || lines.len() != self.last_frame.len();
        let mut written = 0;

        if full {
            // Clear and home, then draw everything.
            self.writer.write_all(b"\x1b[2J\x1b[H")?;
            for (row, line) in lines.iter().enumerate() {
                write_line(&mut self.writer, row, line)?;
                written += 1;
            }
        } else {
            for (row, line) in lines.iter().enumerate() {
                if self.last_frame[row] != *line {
                    write_line(&mut self.writer, row, line)?;
                    written += 1;
                }
            }
        }

        self.writer.flush()?;
        self.last_frame = lines;
        self.force_full = false;
        tracing::trace!(lines = written, full, "frame presented");
        Ok(written)
    }

    /// The underlying writer (for tests).
    pub fn writer(&self) -> &W {
        &self.writer
    }
}

/// Position the cursor on `row`, erase it, and write the new content.
fn write_line(writer: &mut impl Write, row: usize, line: &str) -> io::Result<()> {
    // Terminal rows are 1-indexed.
    write!(writer, "\x1b[{};1H\x1b[2K{}", row + 1, line)
}
