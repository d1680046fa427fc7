//! Runtime settings carried in the DNA properties.

use serde::{Deserialize, Serialize};

use crate::time::{MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NursifyConfig {
    /// Agent keys (base64 display form) allowed to register as admin.
    pub admin_agents: Vec<String>,
    pub settlement_delay_secs: u64,
    pub reminder_lead_hours: u64,
    pub max_login_attempts: u32,
    pub lockout_minutes: u64,
    pub verification_token_ttl_hours: u64,
    pub two_factor_ttl_minutes: u64,
    /// Keep unexpected error detail in client-facing messages.
    pub development_mode: bool,
}

impl Default for NursifyConfig {
    fn default() -> Self {
        NursifyConfig {
            admin_agents: Vec::new(),
            settlement_delay_secs: 5,
            reminder_lead_hours: 24,
            max_login_attempts: 5,
            lockout_minutes: 120,
            verification_token_ttl_hours: 24,
            two_factor_ttl_minutes: 10,
            development_mode: false,
        }
    }
}

fn to_micros(value: u64, unit: i64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX).saturating_mul(unit)
}

impl NursifyConfig {
    pub fn is_admin_agent(&self, agent: &str) -> bool {
        self.admin_agents.iter().any(|a| a == agent)
    }

    pub fn settlement_delay_micros(&self) -> i64 {
        to_micros(self.settlement_delay_secs, MICROS_PER_SECOND)
    }

    pub fn reminder_lead_micros(&self) -> i64 {
        to_micros(self.reminder_lead_hours, MICROS_PER_HOUR)
    }

    pub fn lockout_micros(&self) -> i64 {
        to_micros(self.lockout_minutes, MICROS_PER_MINUTE)
    }

    pub fn verification_ttl_micros(&self) -> i64 {
        to_micros(self.verification_token_ttl_hours, MICROS_PER_HOUR)
    }

    pub fn two_factor_ttl_micros(&self) -> i64 {
        to_micros(self.two_factor_ttl_minutes, MICROS_PER_MINUTE)
    }
}
