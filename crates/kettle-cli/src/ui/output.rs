//! Handle commands use to print through the UI actor.

use std::sync::{OnceLock, mpsc};

use super::actor::{UiActor, UiEvent};

/// Singleton instance of the UI actor channel.
static UI_ACTOR: OnceLock<mpsc::Sender<UiEvent>> = OnceLock::new();

fn actor_sender() -> mpsc::Sender<UiEvent> {
    UI_ACTOR
        .get_or_init(|| {
            let actor = UiActor::spawn();
            let sender = actor.sender();
            // Keep actor alive for program duration
            std::mem::forget(actor);
            sender
        })
        .clone()
}

/// A cloneable handle for sending status lines to the terminal actor.
#[derive(Debug, Clone)]
pub struct Output {
    sender: mpsc::Sender<UiEvent>,
}

impl Output {
    pub fn new() -> Self {
        Self {
            sender: actor_sender(),
        }
    }

    fn send(&self, event: UiEvent) {
        let _ = self.sender.send(event);
    }

    pub fn section(&self, title: &str) {
        self.send(UiEvent::Section(title.to_string()));
    }

    pub fn info(&self, msg: &str) {
        self.send(UiEvent::Info(msg.to_string()));
    }

    pub fn success(&self, msg: &str) {
        self.send(UiEvent::Success(msg.to_string()));
    }

    pub fn warning(&self, msg: &str) {
        self.send(UiEvent::Warning(msg.to_string()));
    }

    pub fn error(&self, msg: &str) {
        self.send(UiEvent::Error(msg.to_string()));
    }

    /// Print `text` verbatim (completion scripts, JSON).
    pub fn raw(&self, text: impl Into<String>) {
        self.send(UiEvent::Raw(text.into()));
    }

    /// Wait until everything sent so far has been written.
    pub async fn wait_async(&self) {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.send(UiEvent::Sync(tx));
        let _ = rx.await;
    }
}

impl kettle_core::Reporter for Output {
    fn section(&self, title: &str) {
        self.section(title);
    }

    fn info(&self, msg: &str) {
        self.info(msg);
    }

    fn success(&self, msg: &str) {
        self.success(msg);
    }

    fn warning(&self, msg: &str) {
        self.warning(msg);
    }

    fn error(&self, msg: &str) {
        self.error(msg);
    }

    fn output_line(&self, line: &str) {
        self.send(UiEvent::Line(line.to_string()));
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
