//! Backend callbacks and command dispatch.

use tracing::{debug, info};

use crate::notify::Notifier;
use crate::session::Session;

/// Callbacks a transport backend invokes.
///
/// The connect and disconnect defaults only update the session.
pub trait LinkHandler {
    /// A client connected.
    fn on_connect(&mut self, session: &mut Session) {
        session.set_connected(true);
        info!("Client connected");
    }

    /// The client disconnected.
    fn on_disconnect(&mut self, session: &mut Session) {
        session.set_connected(false);
        info!("Client disconnected");
    }

    /// The client wrote `value` to the characteristic.
    fn on_write(&mut self, session: &mut Session, value: &[u8]);
}

/// Application side of the link: acts on decoded commands.
pub trait CommandHandler {
    /// Handles one non-empty command. Replies go through `notifier`.
    fn handle(&mut self, command: &str, notifier: &Notifier);
}

impl<F> CommandHandler for F
where
    F: FnMut(&str, &Notifier),
{
    fn handle(&mut self, command: &str, notifier: &Notifier) {
        self(command, notifier)
    }
}

/// [`LinkHandler`] that decodes writes as text commands.
///
/// Bytes are decoded as lossy UTF-8 and trimmed; empty writes are ignored.
#[derive(Debug, Default)]
pub struct CommandLink<H> {
    handler: H,
    received: u64,
}

impl<H: CommandHandler> CommandLink<H> {
    /// Wraps a command handler.
    pub fn new(handler: H) -> Self {
        Self { handler, received: 0 }
    }

    /// Commands forwarded so far.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// The wrapped handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Unwraps the handler.
    pub fn into_inner(self) -> H {
        self.handler
    }
}

impl<H: CommandHandler> LinkHandler for CommandLink<H> {
    fn on_write(&mut self, session: &mut Session, value: &[u8]) {
        let text = String::from_utf8_lossy(value);
        let command = text.trim();
        if command.is_empty() {
            debug!("Ignoring empty write");
            return;
        }

        info!(command, "Received command");
        self.received += 1;
        self.handler.handle(command, session.notifier());
    }
}
