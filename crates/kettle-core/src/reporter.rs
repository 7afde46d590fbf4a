//! Reporter trait for dependency injection
//!
//! Core operations report user-facing status through this trait so they stay
//! independent of how (or whether) the lines are rendered.

pub trait Reporter: Send + Sync {
    /// A new step has started (e.g. "Downloading", "Extracting").
    fn section(&self, title: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);

    /// A line of output from a child process, passed through verbatim.
    fn output_line(&self, line: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn section(&self, title: &str) {
        (**self).section(title)
    }
    fn info(&self, msg: &str) {
        (**self).info(msg)
    }
    fn success(&self, msg: &str) {
        (**self).success(msg)
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg)
    }
    fn error(&self, msg: &str) {
        (**self).error(msg)
    }
    fn output_line(&self, line: &str) {
        (**self).output_line(line)
    }
}

/// Discards everything. Used by tests and non-interactive callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _title: &str) {}
    fn info(&self, _msg: &str) {}
    fn success(&self, _msg: &str) {}
    fn warning(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
    fn output_line(&self, _line: &str) {}
}

/// Collects every reported line in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    pub(crate) lines: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingReporter {
    fn push(&self, tag: &str, msg: &str) {
        self.lines.lock().unwrap().push(format!("{tag}: {msg}"));
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn section(&self, title: &str) {
        self.push("section", title);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn success(&self, msg: &str) {
        self.push("success", msg);
    }
    fn warning(&self, msg: &str) {
        self.push("warning", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn output_line(&self, line: &str) {
        self.push("output", line);
    }
}
