//! Payment settlement split, refund window and status machine.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::appointment::{AppointmentStatus, VisitFacts};
use crate::error::{CareError, CareResult};
use crate::lifecycle::StateMachine;

/// Platform share in basis points (15%).
pub const PLATFORM_FEE_BPS: u64 = 1_500;
const BPS_DENOMINATOR: u64 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Refunded,
    Failed,
}

impl StateMachine for PaymentStatus {
    fn successors(self) -> &'static [Self] {
        match self {
            PaymentStatus::Pending => &[PaymentStatus::Processing, PaymentStatus::Failed],
            PaymentStatus::Processing => &[PaymentStatus::Completed, PaymentStatus::Failed],
            PaymentStatus::Completed => &[PaymentStatus::Refunded],
            PaymentStatus::Refunded | PaymentStatus::Failed => &[],
        }
    }

    fn precedence(self) -> u8 {
        match self {
            PaymentStatus::Pending => 0,
            PaymentStatus::Processing => 1,
            PaymentStatus::Completed => 2,
            PaymentStatus::Failed => 3,
            PaymentStatus::Refunded => 4,
        }
    }
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Pending,
        PaymentStatus::Processing,
        PaymentStatus::Completed,
        PaymentStatus::Refunded,
        PaymentStatus::Failed,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
    MobileMoney,
    Wallet,
}

/// Platform fee and nurse payout for a stored amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    pub amount_cents: u64,
    pub platform_fee_cents: u64,
    pub nurse_payout_cents: u64,
}

impl FeeSplit {
    /// 15% fee rounded half-up to the cent, payout is the remainder.
    pub fn from_amount(amount_cents: u64) -> Self {
        let fee = (amount_cents as u128 * PLATFORM_FEE_BPS as u128
            + (BPS_DENOMINATOR as u128 / 2))
            / BPS_DENOMINATOR as u128;
        let platform_fee_cents = fee as u64;
        FeeSplit {
            amount_cents,
            platform_fee_cents,
            nurse_payout_cents: amount_cents - platform_fee_cents,
        }
    }

    /// True when the stored fields equal the split derived from the amount.
    pub fn is_consistent(amount_cents: u64, fee_cents: u64, payout_cents: u64) -> bool {
        let expected = FeeSplit::from_amount(amount_cents);
        expected.platform_fee_cents == fee_cents && expected.nurse_payout_cents == payout_cents
    }
}

/// Refunds are only accepted for settled payments up to the visit start.
pub fn refund_allowed(status: PaymentStatus, now_micros: i64, scheduled_start_micros: i64) -> bool {
    status == PaymentStatus::Completed && now_micros <= scheduled_start_micros
}

/// Preconditions of paying for a visit, in the order they are reported:
/// the visit must exist, belong to the caller, be confirmed and be unpaid.
pub fn check_payment_request<A: PartialEq>(
    visit: Option<&VisitFacts<A>>,
    caller: &A,
    already_paid: bool,
) -> CareResult<()> {
    let visit = visit.ok_or_else(|| CareError::NotFound("Appointment not found".to_string()))?;
    if &visit.patient != caller {
        return Err(CareError::Authorization(
            "Only the booking patient can pay".to_string(),
        ));
    }
    if visit.status != AppointmentStatus::Confirmed {
        return Err(CareError::InvalidState(
            "Only confirmed appointments can be paid".to_string(),
        ));
    }
    if already_paid {
        return Err(CareError::Conflict("Appointment is already paid".to_string()));
    }
    Ok(())
}

/// Preconditions of a refund: the payer asks, gives a reason, and the
/// payment is settled with the visit still ahead.
pub fn check_refund_request<A: PartialEq>(
    payer: &A,
    caller: &A,
    reason: &str,
    status: PaymentStatus,
    now_micros: i64,
    scheduled_start_micros: i64,
) -> CareResult<()> {
    if payer != caller {
        return Err(CareError::Authorization(
            "Only the paying patient can request a refund".to_string(),
        ));
    }
    if reason.trim().is_empty() {
        return Err(CareError::validation("reason", "A reason is required"));
    }
    if !refund_allowed(status, now_micros, scheduled_start_micros) {
        return Err(CareError::InvalidState(
            "Only settled payments can be refunded, and only before the visit starts".to_string(),
        ));
    }
    Ok(())
}

/// Whether a processing payment has waited long enough to settle.
pub fn settlement_due(
    status: PaymentStatus,
    created_at_micros: i64,
    now_micros: i64,
    delay_micros: i64,
) -> bool {
    status == PaymentStatus::Processing && now_micros - created_at_micros >= delay_micros
}

/// Transaction reference derived from the appointment and creation time.
pub fn transaction_id(seed: &[u8], at_micros: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(at_micros.to_be_bytes());
    let digest = hasher.finalize();
    let hex: String = digest.iter().take(8).map(|b| format!("{:02X}", b)).collect();
    format!("TXN-{}", hex)
}

/// Keep only the last four characters of a card or account number.
pub fn mask_details(details: &str) -> String {
    let digits: Vec<char> = details.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if digits.len() <= 4 {
        return "*".repeat(digits.len());
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(digits.len() - 4), tail)
}
