//! Profile field rules: rates, weekly availability, contact details.

use serde::{Deserialize, Serialize};

use crate::error::{CareError, CareResult};

/// $1,000.00 per hour.
pub const MAX_HOURLY_RATE_CENTS: u64 = 100_000;
pub const MAX_EXPERIENCE_YEARS: u16 = 70;
const MINUTES_PER_DAY: u16 = 24 * 60;

/// A recurring weekly window, minutes from midnight UTC. `day` is 0 = Monday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: u8,
    pub start_minute: u16,
    pub end_minute: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

pub fn validate_hourly_rate(rate_cents: u64) -> CareResult<()> {
    if rate_cents == 0 || rate_cents > MAX_HOURLY_RATE_CENTS {
        return Err(CareError::validation(
            "hourly_rate",
            format!("Hourly rate must be between 1 and {} cents", MAX_HOURLY_RATE_CENTS),
        ));
    }
    Ok(())
}

pub fn validate_experience(years: u16) -> CareResult<()> {
    if years > MAX_EXPERIENCE_YEARS {
        return Err(CareError::validation("years_of_experience", "Experience is not plausible"));
    }
    Ok(())
}

/// Slots must be well formed and must not overlap on the same day.
pub fn validate_availability(slots: &[AvailabilitySlot]) -> CareResult<()> {
    for slot in slots {
        if slot.day > 6 {
            return Err(CareError::validation("availability", "Day must be 0-6"));
        }
        if slot.start_minute >= slot.end_minute || slot.end_minute > MINUTES_PER_DAY {
            return Err(CareError::validation(
                "availability",
                "Slot must end after it starts and within the day",
            ));
        }
    }
    let mut sorted: Vec<&AvailabilitySlot> = slots.iter().collect();
    sorted.sort_by_key(|s| (s.day, s.start_minute));
    for pair in sorted.windows(2) {
        if pair[0].day == pair[1].day && pair[1].start_minute < pair[0].end_minute {
            return Err(CareError::validation("availability", "Slots overlap"));
        }
    }
    Ok(())
}

pub fn validate_required(field: &str, value: &str, max_len: usize) -> CareResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CareError::validation(field, "Value is required"));
    }
    if trimmed.chars().count() > max_len {
        return Err(CareError::validation(
            field,
            format!("Value cannot exceed {} characters", max_len),
        ));
    }
    Ok(())
}

/// `YYYY-MM-DD`, checked as a real calendar date.
pub fn validate_date(field: &str, value: &str) -> CareResult<()> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| CareError::validation(field, "Use a valid YYYY-MM-DD date"))
}
