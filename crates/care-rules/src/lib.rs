//! Nursify care rules
//!
//! Every business rule of the marketplace lives here, free of Holochain
//! types, so the integrity zomes can validate with it and the coordinator
//! zomes can compute with it:
//! - Appointment lifecycle, the guarded status transition helper and fork
//!   resolution between concurrent revisions
//! - Payment settlement split and refund window
//! - Review preconditions and rating aggregation
//! - Nurse trust score and compliance badges
//! - Vital sign derivations
//! - Relationship-gated record access
//! - Identity secrets and sign-in lockout
//! - Profile field rules
//!
//! Timestamps are microseconds since the Unix epoch (the same unit as a
//! Holochain `Timestamp`), money is integer cents.

pub mod access;
pub mod appointment;
pub mod config;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod notification;
pub mod payment;
pub mod profile;
pub mod rating;
pub mod time;
pub mod trust;
pub mod vitals;

pub use access::{decide_record_access, AccessContext, AccessDecision, RecordOperation, Role};
pub use appointment::{AppointmentStatus, ResponseDecision, ServiceType, VisitFacts};
pub use config::NursifyConfig;
pub use error::{CareError, CareResult, ErrorKind};
pub use lifecycle::{advance, check_transition, winning_revision, Lifecycle, StateMachine};
pub use notification::{NotificationPriority, NotificationType, RelatedEntity};
pub use payment::{FeeSplit, PaymentMethod, PaymentStatus};
pub use profile::{AvailabilitySlot, EmergencyContact};
pub use rating::{CategoryRatings, RatingSummary};
pub use trust::{
    BackgroundCheck, BackgroundCheckResult, Certification, ComplianceBadge, CompletionStats,
    CredentialStatus, LicenseInfo, TrustBreakdown, TrustInputs,
};
pub use vitals::{AbnormalFlag, VitalAssessment, VitalReadings};
