//! Registration service

use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use super::errors::{RegistrationError, RegistrationResult};
use crate::account::Account;
use crate::credentials::CredentialHasher;
use crate::notify::{NotificationPort, NotifyError, NotifyResult};
use crate::storage::AccountRepository;
use crate::validation::{RegistrationInput, Validator};

/// How long `register` waits for notifications before moving on
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Orchestrates validation, uniqueness, hashing, persistence and
/// notification for one registration attempt at a time.
pub struct RegistrationService {
    validator: Validator,
    hasher: CredentialHasher,
    repository: Arc<dyn AccountRepository>,
    notifier: Arc<dyn NotificationPort>,
    notify_timeout: Duration,
}

impl RegistrationService {
    pub fn new(
        hasher: CredentialHasher,
        repository: Arc<dyn AccountRepository>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            validator: Validator::new(),
            hasher,
            repository,
            notifier,
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }

    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = timeout;
        self
    }

    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    /// Register a new account.
    ///
    /// The returned account carries the trimmed name, the email as given and
    /// the time of the call. Notifications are attempted after the record is
    /// persisted; their outcome never changes the result.
    pub fn register(&self, input: &RegistrationInput) -> RegistrationResult<Account> {
        // Input is unvalidated here; Debug keeps control characters escaped.
        info!(email = ?input.email, "Starting registration");

        if let Err(e) = self.validator.validate(input) {
            warn!(email = ?input.email, error = ?e.to_string(), "Registration input rejected");
            return Err(e.into());
        }

        if self.repository.exists(&input.email)? {
            warn!(email = %input.email, "Attempted registration with existing email");
            return Err(RegistrationError::DuplicateAccount {
                email: input.email.clone(),
            });
        }

        let credential_hash = self.hasher.hash(&input.password).map_err(|e| {
            error!(email = %input.email, error = %e, "Password hashing failed");
            e
        })?;

        let account = Account::new(
            input.name.trim(),
            input.email.as_str(),
            credential_hash,
            Utc::now(),
        );

        self.repository.append(&account)?;

        self.notify(&account);

        info!(
            email = %account.email(),
            registered_at = %account.registered_at_display(),
            "Registration completed"
        );

        Ok(account)
    }

    /// Whether an account with exactly this email is stored.
    pub fn user_exists(&self, email: &str) -> RegistrationResult<bool> {
        Ok(self.repository.exists(email)?)
    }

    /// Look up a stored account by exact email.
    pub fn find_account(&self, email: &str) -> RegistrationResult<Option<Account>> {
        Ok(self.repository.find_by_email(email)?)
    }

    /// Send welcome then admin alert on a worker thread, waiting at most
    /// `notify_timeout`. A failed welcome skips the admin alert. Failures,
    /// panics and timeouts are logged and dropped.
    fn notify(&self, account: &Account) {
        let notifier = Arc::clone(&self.notifier);
        let owned = account.clone();
        let (tx, rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("registration-notify".to_string())
            .spawn(move || {
                let result = guarded(|| {
                    notifier.send_welcome(&owned)?;
                    notifier.send_admin_alert(&owned)
                });
                // Receiver may have given up already.
                let _ = tx.send(result);
            });

        if let Err(e) = spawned {
            error!(email = %account.email(), error = %e, "Failed to start notification worker");
            return;
        }

        match rx.recv_timeout(self.notify_timeout) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(
                    email = %account.email(),
                    error = %e,
                    "Failed to send registration notifications"
                );
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                let e = NotifyError::Timeout(self.notify_timeout.as_millis() as u64);
                warn!(
                    email = %account.email(),
                    error = %e,
                    "Notifications still pending, continuing"
                );
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                error!(
                    email = %account.email(),
                    error = %NotifyError::Panicked,
                    "Notification worker exited without reporting"
                );
            }
        }
    }
}

fn guarded<F>(send: F) -> NotifyResult<()>
where
    F: FnOnce() -> NotifyResult<()>,
{
    panic::catch_unwind(AssertUnwindSafe(send)).unwrap_or(Err(NotifyError::Panicked))
}
