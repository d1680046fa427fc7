//! Review rating validation and aggregation.

use serde::{Deserialize, Serialize};

use crate::appointment::{AppointmentStatus, VisitFacts};
use crate::error::{CareError, CareResult};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

pub fn validate_rating(field: &str, rating: u8) -> CareResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CareError::validation(
            field,
            format!("Rating must be between {} and {}", MIN_RATING, MAX_RATING),
        ));
    }
    Ok(())
}

/// Preconditions of reviewing a visit, in the order they are reported.
///
/// An existing review is a conflict before anything else is looked at, so
/// a second review fails the same way whoever sends it and whichever nurse
/// it names. `visit` is only needed when no review exists yet.
pub fn check_review_request<A: PartialEq>(
    already_reviewed: bool,
    visit: Option<&VisitFacts<A>>,
    caller: &A,
    nurse: &A,
) -> CareResult<()> {
    if already_reviewed {
        return Err(CareError::Conflict(
            "This visit has already been reviewed".to_string(),
        ));
    }
    let visit = visit.ok_or_else(|| CareError::NotFound("Appointment not found".to_string()))?;
    if &visit.patient != caller {
        return Err(CareError::Authorization(
            "Only the patient of the visit can review it".to_string(),
        ));
    }
    if &visit.nurse != nurse {
        return Err(CareError::validation(
            "nurse",
            "Nurse does not match the appointment",
        ));
    }
    if visit.status != AppointmentStatus::Completed {
        return Err(CareError::InvalidState(
            "Only completed visits can be reviewed".to_string(),
        ));
    }
    Ok(())
}

/// Optional per-aspect scores attached to a review.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRatings {
    pub professionalism: Option<u8>,
    pub punctuality: Option<u8>,
    pub communication: Option<u8>,
    pub skill: Option<u8>,
}

impl CategoryRatings {
    pub fn validate(&self) -> CareResult<()> {
        let fields = [
            ("professionalism", self.professionalism),
            ("punctuality", self.punctuality),
            ("communication", self.communication),
            ("skill", self.skill),
        ];
        for (field, value) in fields {
            if let Some(rating) = value {
                validate_rating(field, rating)?;
            }
        }
        Ok(())
    }
}

/// Aggregate rating of a nurse, recomputed from every surviving review.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Mean rating rounded half-up to two decimals, 0 when there are no reviews.
    pub rating: f64,
    pub total_reviews: u32,
}

impl RatingSummary {
    pub fn from_ratings(ratings: &[u8]) -> Self {
        if ratings.is_empty() {
            return RatingSummary::default();
        }
        let n = ratings.len() as u64;
        let sum: u64 = ratings.iter().map(|r| *r as u64).sum();
        // round(sum / n, 2) in hundredths, half-up
        let hundredths = (sum * 200 + n) / (2 * n);
        RatingSummary {
            rating: hundredths as f64 / 100.0,
            total_reviews: ratings.len() as u32,
        }
    }

    /// Stored ratings written by this module always sit on a 0.01 grid in [0, 5].
    pub fn is_well_formed(&self) -> bool {
        if self.total_reviews == 0 {
            return self.rating == 0.0;
        }
        let scaled = self.rating * 100.0;
        (MIN_RATING as f64..=MAX_RATING as f64).contains(&self.rating)
            && (scaled - scaled.round()).abs() < 1e-6
    }
}
