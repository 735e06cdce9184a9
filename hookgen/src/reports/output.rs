//! Output trait for rendering reports.

/// Where a rendered line goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Target output for reports.
///
/// Reports describe *what* to output using the semantic methods; an
/// implementation only decides where a finished line ends up.
pub trait Output {
    /// Emit one finished line.
    fn line(&mut self, stream: Stream, text: String);

    fn section(&mut self, name: &str) {
        self.line(Stream::Stdout, format!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.line(Stream::Stdout, format!("{}: {}", key, value));
    }

    fn list_item(&mut self, text: &str) {
        self.line(Stream::Stdout, format!("  - {}", text));
    }

    /// A new or changed file.
    fn added_item(&mut self, text: &str) {
        self.line(Stream::Stdout, format!("  + {}", text));
    }

    fn warning(&mut self, msg: &str) {
        self.line(Stream::Stderr, format!("warning: {}", msg));
    }

    fn error(&mut self, msg: &str) {
        self.line(Stream::Stderr, msg.to_string());
    }

    fn divider(&mut self, label: &str) {
        self.line(Stream::Stdout, format!("── {} ──", label));
    }

    /// Multi-line text printed as is.
    fn preformatted(&mut self, text: &str) {
        self.line(Stream::Stdout, text.to_string());
    }

    fn newline(&mut self) {
        self.line(Stream::Stdout, String::new());
    }
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to the terminal; warnings and errors go to stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn line(&mut self, stream: Stream, text: String) {
        match stream {
            Stream::Stdout => println!("{}", text),
            Stream::Stderr => eprintln!("{}", text),
        }
    }
}

/// Output that records every line, for report tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn line(&mut self, _stream: Stream, text: String) {
        self.lines.push(text);
    }
}
