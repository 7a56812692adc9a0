//! # lutcam-link
//!
//! The control side of the camera: a command channel in, push
//! notifications out. Backends (BLE, serial, a test harness) feed
//! [`LinkEvent`]s into a [`Session`]; a [`LinkHandler`] reacts to them.
//!
//! - [`Session`] - owned connection state plus the shared [`Notifier`]
//! - [`Notifier`] - debounced fan-out to [`Subscriber`]s
//! - [`CommandLink`] - decodes writes into text commands for a
//!   [`CommandHandler`]
//! - [`ServiceInfo`] - advertised name and UUIDs
//!
//! # Usage
//!
//! ```rust
//! use lutcam_link::{CommandLink, LinkEvent, Notifier, Session};
//!
//! let mut session = Session::default();
//! session.start();
//! let mut link = CommandLink::new(|cmd: &str, n: &Notifier| {
//!     let _ = n.notify(&format!("ok: {cmd}"));
//! });
//! session.dispatch(&mut link, LinkEvent::Connect);
//! session.dispatch(&mut link, LinkEvent::Write(b"capture".to_vec()));
//! assert_eq!(session.notifier().value(), "ok: capture");
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Connection and command logging
//! - [`serde`] - `ServiceInfo` from config files
//!
//! # Used By
//!
//! - `lutcam-tests` - end-to-end command scenarios

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod handler;
mod notify;
mod service;
mod session;

pub use error::{LinkError, LinkResult};
pub use handler::{CommandHandler, CommandLink, LinkHandler};
pub use notify::{Notifier, NotifyOutcome, NotifyStats, Subscriber, DEFAULT_DEBOUNCE};
pub use service::{
    ServiceInfo, CHARACTERISTIC_UUID, DEFAULT_DEVICE_NAME, READY_MESSAGE, SERVICE_UUID,
};
pub use session::{LinkEvent, Session, StatusChange};
