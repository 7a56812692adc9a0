//! Per-connection link state.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::handler::LinkHandler;
use crate::notify::{Notifier, DEFAULT_DEBOUNCE};
use crate::service::ServiceInfo;

/// Connection transition reported by [`Session::poll_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// A client connected since the last poll.
    Connected,
    /// The client went away since the last poll; advertising should be
    /// restarted.
    Dropped,
    /// No transition.
    Unchanged,
}

/// One event delivered by a transport backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A client connected.
    Connect,
    /// The client disconnected.
    Disconnect,
    /// The client wrote to the characteristic.
    Write(Vec<u8>),
}

/// State of one link service: connection flags and the notifier.
#[derive(Debug)]
pub struct Session {
    info: ServiceInfo,
    was_connected: bool,
    notifier: Arc<Notifier>,
}

impl Session {
    /// Creates a session with the default debounce window.
    pub fn new(info: ServiceInfo) -> Self {
        Self::with_window(info, DEFAULT_DEBOUNCE)
    }

    /// Creates a session with a custom debounce window.
    pub fn with_window(info: ServiceInfo, window: Duration) -> Self {
        let notifier = Arc::new(Notifier::new(window, info.initial_value.clone()));
        Self {
            info,
            was_connected: false,
            notifier,
        }
    }

    /// Service identity.
    pub fn info(&self) -> &ServiceInfo {
        &self.info
    }

    /// Starts the service; notifications are accepted from here on.
    pub fn start(&mut self) {
        info!(
            device = %self.info.device_name,
            service = %self.info.service_uuid,
            "Link service started"
        );
        self.notifier.mark_ready();
    }

    /// The notifier shared with command handlers.
    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }

    /// True while a client is connected.
    pub fn is_connected(&self) -> bool {
        self.notifier.is_connected()
    }

    /// Records a connection change.
    ///
    /// A new connection starts with an empty debounce history.
    pub fn set_connected(&mut self, connected: bool) {
        if connected && !self.notifier.is_connected() {
            self.notifier.clear_history();
        }
        self.notifier.set_connected(connected);
    }

    /// Compares the connection flag with its value at the previous poll.
    pub fn poll_status(&mut self) -> StatusChange {
        match (self.is_connected(), self.was_connected) {
            (false, true) => {
                self.was_connected = false;
                info!("Client gone, advertising should restart");
                StatusChange::Dropped
            }
            (true, false) => {
                self.was_connected = true;
                StatusChange::Connected
            }
            _ => StatusChange::Unchanged,
        }
    }

    /// Routes one backend event to `handler`.
    pub fn dispatch<H: LinkHandler + ?Sized>(&mut self, handler: &mut H, event: LinkEvent) {
        match event {
            LinkEvent::Connect => handler.on_connect(self),
            LinkEvent::Disconnect => handler.on_disconnect(self),
            LinkEvent::Write(value) => handler.on_write(self, &value),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ServiceInfo::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotifyOutcome;

    #[test]
    fn test_poll_transitions() {
        let mut session = Session::default();
        assert_eq!(session.poll_status(), StatusChange::Unchanged);

        session.set_connected(true);
        assert_eq!(session.poll_status(), StatusChange::Connected);
        assert_eq!(session.poll_status(), StatusChange::Unchanged);

        session.set_connected(false);
        assert_eq!(session.poll_status(), StatusChange::Dropped);
        assert_eq!(session.poll_status(), StatusChange::Unchanged);
    }

    #[test]
    fn test_start_enables_notify() {
        let mut session = Session::default();
        session.set_connected(true);
        assert!(session.notifier().notify("x").is_err());
        session.start();
        assert_eq!(session.notifier().notify("x").unwrap(), NotifyOutcome::Sent(0));
        assert_eq!(session.notifier().value(), "x");
    }

    #[test]
    fn test_reconnect_clears_history() {
        let mut session = Session::default();
        session.start();
        session.set_connected(true);
        assert!(session.notifier().notify("done").unwrap().was_sent());
        assert_eq!(session.notifier().notify("done").unwrap(), NotifyOutcome::Suppressed);

        session.set_connected(false);
        session.set_connected(true);
        assert!(session.notifier().notify("done").unwrap().was_sent());
    }

    #[test]
    fn test_initial_value() {
        let session = Session::default();
        assert_eq!(session.notifier().value(), crate::READY_MESSAGE);
    }
}
