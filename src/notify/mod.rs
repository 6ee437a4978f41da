//! # Post-registration Notifications
//!
//! The registration flow only sees [`NotificationPort`]. Delivery is best
//! effort: failures are reported back as [`NotifyError`] so the caller can
//! log them, and never abort a registration.

mod email;
mod errors;
mod memory;
mod port;

pub use email::{EmailNotifier, LogMailer, Mailer, NotificationConfig, SmtpConfig, SmtpMailer};
pub use errors::{NotifyError, NotifyResult};
pub use memory::{MemoryNotifier, Notification};
pub use port::NotificationPort;
