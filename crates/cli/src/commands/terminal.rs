//! Terminal rendering for streaming runs.
//!
//! Model text goes to stdout as it arrives; tool activity goes to stderr
//! so stdout stays a clean transcript.

use reasonact_agent::OutputSink;
use std::io::Write;

pub struct TerminalSink<W: Write + Send> {
    out: W,
    /// Whether the cursor sits mid-line on `out`.
    mid_line: bool,
}

impl TerminalSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            mid_line: false,
        }
    }

    fn end_line(&mut self) {
        if self.mid_line {
            let _ = writeln!(self.out);
            self.mid_line = false;
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> OutputSink for TerminalSink<W> {
    fn thinking(&mut self, agent: &str) {
        self.end_line();
        let _ = write!(self.out, "{agent}: ");
        let _ = self.out.flush();
        self.mid_line = true;
    }

    fn fragment(&mut self, _agent: &str, text: &str) {
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
        self.mid_line = !text.ends_with('\n');
    }

    fn status(&mut self, message: &str) {
        self.end_line();
        eprintln!("  ⏳ {message}");
    }

    fn tool_result(&mut self, tool: &str, output: &str) {
        self.end_line();
        eprintln!("  ↳ {tool}: {output}");
    }

    fn done(&mut self) {
        self.end_line();
        let _ = self.out.flush();
    }
}
