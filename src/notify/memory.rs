//! In-memory notifier for testing

use std::sync::RwLock;

use super::errors::{NotifyError, NotifyResult};
use super::port::NotificationPort;
use crate::account::Account;

/// A notification recorded by [`MemoryNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Welcome { email: String },
    AdminAlert { email: String },
}

/// Records notifications instead of delivering them
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: RwLock<Vec<Notification>>,
    fail: bool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier whose every send fails with a transport error
    pub fn failing() -> Self {
        Self {
            sent: RwLock::default(),
            fail: true,
        }
    }

    /// Notifications delivered so far, in order
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.read().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.read().map(|s| s.len()).unwrap_or(0)
    }

    fn record(&self, notification: Notification) -> NotifyResult<()> {
        if self.fail {
            return Err(NotifyError::Transport("delivery disabled".to_string()));
        }
        self.sent
            .write()
            .map_err(|_| NotifyError::Transport("Lock poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}

impl NotificationPort for MemoryNotifier {
    fn send_welcome(&self, account: &Account) -> NotifyResult<()> {
        self.record(Notification::Welcome {
            email: account.email().to_string(),
        })
    }

    fn send_admin_alert(&self, account: &Account) -> NotifyResult<()> {
        self.record(Notification::AdminAlert {
            email: account.email().to_string(),
        })
    }
}
