//! Relationship-gated access to patient health records.
//!
//! The decision is recomputed for every request from the caller's role,
//! ownership, the privacy flag of the record and whether a care relationship
//! exists right now. Nothing is cached.

use serde::{Deserialize, Serialize};

use crate::error::{CareError, CareResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Nurse,
    Patient,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Nurse => "nurse",
            Role::Patient => "patient",
            Role::Admin => "admin",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordOperation {
    Read,
    Write,
    Delete,
    Verify,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessContext {
    pub caller_role: Role,
    /// Caller is the patient the record belongs to.
    pub is_owner: bool,
    /// A confirmed, in-progress or completed appointment links the caller
    /// (as nurse) to the owning patient.
    pub has_care_relationship: bool,
    pub record_is_private: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied(&'static str),
}

impl AccessDecision {
    pub fn is_granted(self) -> bool {
        matches!(self, AccessDecision::Granted)
    }

    pub fn into_result(self) -> CareResult<()> {
        match self {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Denied(reason) => Err(CareError::Authorization(reason.to_string())),
        }
    }
}

pub fn decide_record_access(ctx: &AccessContext, operation: RecordOperation) -> AccessDecision {
    if ctx.is_owner {
        return match operation {
            RecordOperation::Verify => {
                AccessDecision::Denied("Owners cannot verify their own records")
            }
            _ => AccessDecision::Granted,
        };
    }

    match ctx.caller_role {
        Role::Admin => match operation {
            RecordOperation::Delete | RecordOperation::Verify => AccessDecision::Granted,
            _ => AccessDecision::Denied("Admins may only moderate records"),
        },
        Role::Nurse => {
            if operation != RecordOperation::Read {
                return AccessDecision::Denied("Nurses have read-only access");
            }
            if !ctx.has_care_relationship {
                return AccessDecision::Denied("No care relationship with this patient");
            }
            if ctx.record_is_private {
                return AccessDecision::Denied("Record is private");
            }
            AccessDecision::Granted
        }
        Role::Patient => AccessDecision::Denied("Not your record"),
    }
}
