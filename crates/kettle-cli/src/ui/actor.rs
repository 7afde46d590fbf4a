//! UI Actor - single-threaded event processing
//!
//! Every status line is sent as an event to one thread that owns stdout, so
//! lines from the async commands and from process reader threads never
//! interleave mid-line.

use std::io::Write;
use std::sync::mpsc;
use std::thread;

use crossterm::style::Stylize;

use super::theme::Theme;

/// Events that can be sent to the UI actor
#[derive(Debug)]
pub enum UiEvent {
    /// Print a bold section header
    Section(String),
    /// Print info message
    Info(String),
    /// Print success message
    Success(String),
    /// Print warning message
    Warning(String),
    /// Print error message
    Error(String),
    /// Pass a child process line through
    Line(String),
    /// Print raw text with no decoration
    Raw(String),
    /// Reply once every earlier event has been rendered
    Sync(tokio::sync::oneshot::Sender<()>),
    /// Shutdown the actor
    Shutdown,
}

/// Handle to the UI actor thread
#[derive(Debug)]
pub struct UiActor {
    sender: mpsc::Sender<UiEvent>,
    _handle: thread::JoinHandle<()>,
}

impl UiActor {
    /// Spawn a new UI actor thread
    pub fn spawn() -> Self {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::spawn(move || {
            // Stdout locks per write, so other writers are never starved.
            run_event_loop(&receiver, &mut std::io::stdout(), &Theme::default());
        });

        Self {
            sender,
            _handle: handle,
        }
    }

    /// Get a cloneable sender for this actor
    pub fn sender(&self) -> mpsc::Sender<UiEvent> {
        self.sender.clone()
    }
}

impl Drop for UiActor {
    fn drop(&mut self) {
        let _ = self.sender.send(UiEvent::Shutdown);
    }
}

/// Render events until shutdown or until every sender is gone.
fn run_event_loop(receiver: &mpsc::Receiver<UiEvent>, out: &mut impl Write, theme: &Theme) {
    while let Ok(event) = receiver.recv() {
        if matches!(event, UiEvent::Shutdown) {
            break;
        }
        let _ = render(&event, out, theme);
        let _ = out.flush();
        if let UiEvent::Sync(tx) = event {
            let _ = tx.send(());
        }
    }
}

fn render(event: &UiEvent, out: &mut impl Write, theme: &Theme) -> std::io::Result<()> {
    let icons = &theme.icons;
    let colors = &theme.colors;
    match event {
        UiEvent::Section(title) => {
            writeln!(out)?;
            writeln!(out, "{}", title.as_str().with(colors.header).bold())
        }
        UiEvent::Info(msg) => writeln!(out, "  {} {msg}", icons.info),
        UiEvent::Success(msg) => {
            writeln!(out, "  {} {msg}", icons.success.with(colors.success))
        }
        UiEvent::Warning(msg) => {
            writeln!(out, "  {} {msg}", icons.warning.with(colors.warning))
        }
        UiEvent::Error(msg) => writeln!(out, "  {} {msg}", icons.error.with(colors.error)),
        UiEvent::Line(line) => writeln!(
            out,
            "  {} {}",
            icons.output.with(colors.secondary),
            line.as_str().with(colors.secondary)
        ),
        UiEvent::Raw(text) => write!(out, "{text}"),
        UiEvent::Sync(_) | UiEvent::Shutdown => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(events: Vec<UiEvent>) -> String {
        let (tx, rx) = mpsc::channel();
        for event in events {
            tx.send(event).unwrap();
        }
        drop(tx);

        let mut buf = Vec::new();
        run_event_loop(&rx, &mut buf, &Theme::default());
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_events_render_in_order() {
        let out = rendered(vec![
            UiEvent::Info("first".into()),
            UiEvent::Raw("raw\n".into()),
            UiEvent::Info("second".into()),
        ]);
        let first = out.find("first").unwrap();
        let raw = out.find("raw").unwrap();
        let second = out.find("second").unwrap();
        assert!(first < raw && raw < second);
    }

    #[test]
    fn test_shutdown_stops_loop() {
        let out = rendered(vec![
            UiEvent::Info("before".into()),
            UiEvent::Shutdown,
            UiEvent::Info("after".into()),
        ]);
        assert!(out.contains("before"));
        assert!(!out.contains("after"));
    }

    #[test]
    fn test_sync_replies() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        rendered(vec![UiEvent::Sync(tx)]);
        assert!(rx.blocking_recv().is_ok());
    }
}
