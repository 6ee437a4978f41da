//! Notification capability consumed by the registration service

use super::errors::NotifyResult;
use crate::account::Account;

/// Two best-effort notifications sent after an account is persisted.
pub trait NotificationPort: Send + Sync {
    /// Greet the newly registered account holder
    fn send_welcome(&self, account: &Account) -> NotifyResult<()>;

    /// Tell the platform administrator about the new account
    fn send_admin_alert(&self, account: &Account) -> NotifyResult<()>;
}
