//! Email normalization, one-time secrets and sign-in lockout.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{CareError, CareResult};

pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_DISPLAY_NAME_LEN: usize = 100;
pub const TWO_FACTOR_DIGITS: usize = 6;

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Accepts `local@domain.tld` with no whitespace; expects a normalized address.
pub fn validate_email(email: &str) -> CareResult<()> {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return Err(CareError::validation("email", "Email must be 1-254 characters"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(CareError::validation("email", "Email must not contain spaces"));
    }
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| CareError::validation("email", "Email must contain '@'"))?;
    if local.is_empty() || domain.contains('@') {
        return Err(CareError::validation("email", "Invalid email address"));
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(CareError::validation("email", "Invalid email domain"));
    }
    Ok(())
}

pub fn validate_display_name(name: &str) -> CareResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CareError::validation("display_name", "Name is required"));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(CareError::validation(
            "display_name",
            format!("Name cannot exceed {} characters", MAX_DISPLAY_NAME_LEN),
        ));
    }
    Ok(())
}

/// SHA-256 of a secret as lowercase hex. Only this digest is ever stored.
pub fn hash_secret(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// URL-safe verification token from random bytes.
pub fn token_from_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Zero-padded numeric code from random bytes.
pub fn code_from_bytes(bytes: &[u8]) -> String {
    let mut value: u64 = 0;
    for b in bytes.iter().take(8) {
        value = (value << 8) | *b as u64;
    }
    let modulus = 10u64.pow(TWO_FACTOR_DIGITS as u32);
    format!("{:0width$}", value % modulus, width = TWO_FACTOR_DIGITS)
}

/// A stored one-time secret: digest plus expiry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretTicket {
    pub secret_hash: String,
    pub expires_at: i64,
}

impl SecretTicket {
    pub fn issue(secret: &str, now_micros: i64, ttl_micros: i64) -> Self {
        SecretTicket {
            secret_hash: hash_secret(secret),
            expires_at: now_micros.saturating_add(ttl_micros),
        }
    }

    pub fn is_expired(&self, now_micros: i64) -> bool {
        now_micros > self.expires_at
    }

    pub fn matches(&self, candidate: &str, now_micros: i64) -> bool {
        !self.is_expired(now_micros) && hash_secret(candidate.trim()) == self.secret_hash
    }
}

/// Consecutive failed sign-in attempts and the resulting lock.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginGuard {
    pub failed_attempts: u32,
    pub locked_until: Option<i64>,
}

impl LoginGuard {
    pub fn is_locked(&self, now_micros: i64) -> bool {
        self.locked_until.map_or(false, |until| now_micros < until)
    }

    /// Count a failure; the `max_attempts`-th consecutive one locks the account.
    pub fn register_failure(&mut self, now_micros: i64, max_attempts: u32, lockout_micros: i64) {
        if self.locked_until.map_or(false, |until| now_micros >= until) {
            // an expired lock starts a fresh window
            self.failed_attempts = 0;
            self.locked_until = None;
        }
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        if self.failed_attempts >= max_attempts.max(1) {
            self.locked_until = Some(now_micros.saturating_add(lockout_micros));
        }
    }

    pub fn register_success(&mut self) {
        self.failed_attempts = 0;
        self.locked_until = None;
    }

    /// Reject early while locked.
    pub fn ensure_unlocked(&self, now_micros: i64) -> CareResult<()> {
        if self.is_locked(now_micros) {
            return Err(CareError::Authentication(
                "Account is temporarily locked due to too many failed attempts".into(),
            ));
        }
        Ok(())
    }
}
