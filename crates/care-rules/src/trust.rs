//! Nurse trust score
//!
//! The score is a fixed-weight sum of six components:
//!
//! | component        | max |
//! |------------------|-----|
//! | license          | 25  |
//! | background check | 20  |
//! | certifications   | 15  |
//! | review rating    | 20  |
//! | completion rate  | 10  |
//! | response time    | 5   |
//!
//! It is a pure function of its inputs. Nothing recomputes it automatically;
//! the stored value is refreshed only when a caller asks for it.

use serde::{Deserialize, Serialize};

use crate::error::{CareError, CareResult};

pub const LICENSE_POINTS: f64 = 25.0;
pub const BACKGROUND_CHECK_POINTS: f64 = 20.0;
pub const POINTS_PER_CERTIFICATION: f64 = 5.0;
pub const MAX_CERTIFICATION_POINTS: f64 = 15.0;
pub const MAX_RATING_POINTS: f64 = 20.0;
pub const MAX_COMPLETION_POINTS: f64 = 10.0;
/// Response time is not measured yet; every nurse gets the same value.
pub const RESPONSE_TIME_POINTS: f64 = 5.0;
pub const MAX_TRUST_SCORE: u8 = 100;

pub const TOP_RATED_MIN_RATING: f64 = 4.5;
pub const TOP_RATED_MIN_REVIEWS: u32 = 5;
pub const RELIABLE_MIN_RATE: f64 = 0.9;
pub const RELIABLE_MIN_COMPLETED: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialStatus {
    Unverified,
    Pending,
    Verified,
    Rejected,
    Expired,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub license_number: String,
    pub issuing_authority: String,
    pub license_type: String,
    pub expires_at: Option<i64>,
    pub verified: bool,
}

impl LicenseInfo {
    pub fn validate(&self) -> CareResult<()> {
        if self.license_number.trim().is_empty() {
            return Err(CareError::validation("license_number", "License number is required"));
        }
        if self.issuing_authority.trim().is_empty() {
            return Err(CareError::validation(
                "issuing_authority",
                "Issuing authority is required",
            ));
        }
        Ok(())
    }

    pub fn is_current(&self, now_micros: i64) -> bool {
        self.expires_at.map_or(true, |at| at > now_micros)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub issued_at: Option<i64>,
    pub expires_at: Option<i64>,
    pub verified: bool,
}

impl Certification {
    pub fn counts_at(&self, now_micros: i64) -> bool {
        self.verified && self.expires_at.map_or(true, |at| at > now_micros)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundCheckResult {
    Pending,
    Clear,
    Consider,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundCheck {
    pub provider: String,
    pub result: BackgroundCheckResult,
    pub checked_at: i64,
    pub reference: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceBadge {
    LicenseVerified,
    BackgroundChecked,
    Certified,
    TopRated,
    Reliable,
    Custom(String),
}

/// Live appointment outcome counts for one nurse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionStats {
    pub completed: u32,
    pub cancelled: u32,
}

impl CompletionStats {
    /// completed / (completed + cancelled), 0 when nothing has finished yet.
    pub fn rate(&self) -> f64 {
        let finished = self.completed as u64 + self.cancelled as u64;
        if finished == 0 {
            0.0
        } else {
            self.completed as f64 / finished as f64
        }
    }
}

/// Everything the score depends on, read fresh by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct TrustInputs {
    pub status: CredentialStatus,
    pub license: Option<LicenseInfo>,
    pub background_check: Option<BackgroundCheck>,
    pub certifications: Vec<Certification>,
    pub rating: f64,
    pub total_reviews: u32,
    pub completion: CompletionStats,
    pub now_micros: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrustBreakdown {
    pub license: f64,
    pub background_check: f64,
    pub certifications: f64,
    pub rating: f64,
    pub completion_rate: f64,
    pub response_time: f64,
}

impl TrustBreakdown {
    pub fn compute(inputs: &TrustInputs) -> Self {
        let license = match (&inputs.license, inputs.status) {
            (Some(info), CredentialStatus::Verified)
                if info.verified && info.is_current(inputs.now_micros) =>
            {
                LICENSE_POINTS
            }
            _ => 0.0,
        };

        let background_check = match &inputs.background_check {
            Some(check) if check.result == BackgroundCheckResult::Clear => BACKGROUND_CHECK_POINTS,
            _ => 0.0,
        };

        let counted = inputs
            .certifications
            .iter()
            .filter(|c| c.counts_at(inputs.now_micros))
            .count();
        let certifications =
            (counted as f64 * POINTS_PER_CERTIFICATION).min(MAX_CERTIFICATION_POINTS);

        let rating = if inputs.rating.is_finite() {
            inputs.rating.clamp(0.0, 5.0) / 5.0 * MAX_RATING_POINTS
        } else {
            0.0
        };

        TrustBreakdown {
            license,
            background_check,
            certifications,
            rating,
            completion_rate: inputs.completion.rate() * MAX_COMPLETION_POINTS,
            response_time: RESPONSE_TIME_POINTS,
        }
    }

    pub fn sum(&self) -> f64 {
        self.license
            + self.background_check
            + self.certifications
            + self.rating
            + self.completion_rate
            + self.response_time
    }

    /// Rounded sum, clamped to [0, 100].
    pub fn total(&self) -> u8 {
        let sum = self.sum();
        if !sum.is_finite() {
            return 0;
        }
        sum.round().clamp(0.0, MAX_TRUST_SCORE as f64) as u8
    }
}

/// Badges earned automatically from the same inputs as the score.
pub fn derive_badges(inputs: &TrustInputs) -> Vec<ComplianceBadge> {
    let breakdown = TrustBreakdown::compute(inputs);
    let mut badges = Vec::new();
    if breakdown.license > 0.0 {
        badges.push(ComplianceBadge::LicenseVerified);
    }
    if breakdown.background_check > 0.0 {
        badges.push(ComplianceBadge::BackgroundChecked);
    }
    if breakdown.certifications > 0.0 {
        badges.push(ComplianceBadge::Certified);
    }
    if inputs.rating >= TOP_RATED_MIN_RATING && inputs.total_reviews >= TOP_RATED_MIN_REVIEWS {
        badges.push(ComplianceBadge::TopRated);
    }
    if inputs.completion.completed >= RELIABLE_MIN_COMPLETED
        && inputs.completion.rate() >= RELIABLE_MIN_RATE
    {
        badges.push(ComplianceBadge::Reliable);
    }
    badges
}

/// Replace the automatic badges in `current` with `derived`, keeping custom ones.
pub fn merge_badges(current: &[ComplianceBadge], derived: Vec<ComplianceBadge>) -> Vec<ComplianceBadge> {
    let mut merged = derived;
    for badge in current {
        if let ComplianceBadge::Custom(_) = badge {
            if !merged.contains(badge) {
                merged.push(badge.clone());
            }
        }
    }
    merged
}
