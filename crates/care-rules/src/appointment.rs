//! Appointment state machine and booking arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::{CareError, CareResult};
use crate::lifecycle::StateMachine;
use crate::time::MICROS_PER_MINUTE;

/// Longest bookable visit.
pub const MAX_DURATION_MINUTES: i64 = 12 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    Rejected,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 6] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in-progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Rejected => "rejected",
        }
    }
}

impl StateMachine for AppointmentStatus {
    fn successors(self) -> &'static [Self] {
        match self {
            AppointmentStatus::Pending => &[
                AppointmentStatus::Confirmed,
                AppointmentStatus::Rejected,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => &[
                AppointmentStatus::InProgress,
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::InProgress => &[AppointmentStatus::Completed],
            AppointmentStatus::Completed
            | AppointmentStatus::Cancelled
            | AppointmentStatus::Rejected => &[],
        }
    }

    /// A cancellation outranks a completion it raced with, so a refunded
    /// visit always ends cancelled.
    fn precedence(self) -> u8 {
        match self {
            AppointmentStatus::Pending => 0,
            AppointmentStatus::Confirmed => 1,
            AppointmentStatus::InProgress => 2,
            AppointmentStatus::Completed => 3,
            AppointmentStatus::Rejected => 4,
            AppointmentStatus::Cancelled => 5,
        }
    }
}

/// Statuses a nurse may respond from.
pub const RESPONDABLE: &[AppointmentStatus] = &[AppointmentStatus::Pending];

/// Statuses a patient may cancel from.
pub const PATIENT_CANCELLABLE: &[AppointmentStatus] =
    &[AppointmentStatus::Pending, AppointmentStatus::Confirmed];

pub const STARTABLE: &[AppointmentStatus] = &[AppointmentStatus::Confirmed];

pub const COMPLETABLE: &[AppointmentStatus] =
    &[AppointmentStatus::Confirmed, AppointmentStatus::InProgress];

/// Statuses that establish a care relationship between nurse and patient.
pub const CARE_RELATIONSHIP_STATUSES: &[AppointmentStatus] = &[
    AppointmentStatus::Confirmed,
    AppointmentStatus::InProgress,
    AppointmentStatus::Completed,
];

pub fn is_care_relationship(status: AppointmentStatus) -> bool {
    CARE_RELATIONSHIP_STATUSES.contains(&status)
}

/// The parts of a booking that payments and reviews are checked against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitFacts<A> {
    pub patient: A,
    pub nurse: A,
    pub status: AppointmentStatus,
}

/// Nurse's answer to a booking request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseDecision {
    Confirm,
    Reject,
}

impl ResponseDecision {
    pub fn target_status(self) -> AppointmentStatus {
        match self {
            ResponseDecision::Confirm => AppointmentStatus::Confirmed,
            ResponseDecision::Reject => AppointmentStatus::Rejected,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    HomeVisit,
    ElderlyCare,
    PostOperativeCare,
    WoundCare,
    MedicationManagement,
    PediatricCare,
    MaternityCare,
    ChronicCare,
    PalliativeCare,
    Other(String),
}

/// Visit length in whole minutes, bounded by `MAX_DURATION_MINUTES`.
pub fn duration_minutes(start_micros: i64, end_micros: i64) -> CareResult<i64> {
    if end_micros <= start_micros {
        return Err(CareError::validation(
            "scheduled_end",
            "End time must be after start time",
        ));
    }
    let minutes = (end_micros - start_micros) / MICROS_PER_MINUTE;
    if minutes == 0 {
        return Err(CareError::validation(
            "scheduled_end",
            "Appointment must last at least one minute",
        ));
    }
    if minutes > MAX_DURATION_MINUTES {
        return Err(CareError::validation(
            "scheduled_end",
            format!("Appointment cannot exceed {} minutes", MAX_DURATION_MINUTES),
        ));
    }
    Ok(minutes)
}

/// Cost of a visit at `hourly_rate_cents`, rounded half-up to the cent.
///
/// Computed once at booking; the stored value never follows later rate
/// changes.
pub fn booking_cost_cents(
    hourly_rate_cents: u64,
    start_micros: i64,
    end_micros: i64,
) -> CareResult<u64> {
    let minutes = duration_minutes(start_micros, end_micros)? as u64;
    let scaled = hourly_rate_cents
        .checked_mul(minutes)
        .and_then(|scaled| scaled.checked_add(30))
        .ok_or_else(|| CareError::validation("hourly_rate", "Rate is too large"))?;
    Ok(scaled / 60)
}

/// Whether a confirmed appointment should get its reminder now.
pub fn reminder_due(
    status: AppointmentStatus,
    start_micros: i64,
    now_micros: i64,
    already_reminded: bool,
    lead_micros: i64,
) -> bool {
    status == AppointmentStatus::Confirmed
        && !already_reminded
        && start_micros > now_micros
        && start_micros - now_micros <= lead_micros
}
