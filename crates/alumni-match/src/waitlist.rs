//! Launch waitlist sign-ups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitlistOutcome {
    Added,
    AlreadyRegistered,
}

#[derive(Debug, thiserror::Error)]
pub enum WaitlistError {
    #[error("Valid email is required")]
    MissingEmail,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("waitlist store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for sign-ups. Emails arrive already normalized.
pub trait WaitlistStore: Send + Sync {
    fn insert_if_absent(&self, entry: WaitlistEntry) -> Result<WaitlistOutcome, WaitlistError>;
    /// All entries, newest first.
    fn entries(&self) -> Result<Vec<WaitlistEntry>, WaitlistError>;
}

/// Lowercased, trimmed address in `local@host.tld` shape.
pub fn normalize_email(raw: &str) -> Result<String, WaitlistError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(WaitlistError::MissingEmail);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(WaitlistError::InvalidEmail);
    };

    let domain_ok = domain
        .split_once('.')
        .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
        .unwrap_or(false);

    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) || domain.contains('@') {
        return Err(WaitlistError::InvalidEmail);
    }

    Ok(email)
}

pub fn join<W: WaitlistStore + ?Sized>(
    store: &W,
    raw_email: &str,
) -> Result<WaitlistOutcome, WaitlistError> {
    let email = normalize_email(raw_email)?;
    let outcome = store.insert_if_absent(WaitlistEntry {
        email,
        joined_at: Utc::now(),
    })?;
    tracing::info!(?outcome, "waitlist sign-up");
    Ok(outcome)
}
