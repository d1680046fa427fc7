//! Payment and Refund Tests
//!
//! Platform fee split on payment, settlement as its own step, and the
//! refund guard: settled payments only, never after the visit, and a refund
//! always cancels the visit.

#[cfg(test)]
mod settlement_tests {
    use crate::model::{AppointmentId, Marketplace, PaymentId};
    use nursify_care_rules::time::{MICROS_PER_DAY, MICROS_PER_HOUR};
    use nursify_care_rules::{AppointmentStatus, ErrorKind, PaymentStatus, ResponseDecision};

    const NOW: i64 = 1_704_153_600_000_000;

    /// Confirmed booking worth exactly 200.00: one hour at 200.00
    fn confirmed_visit(market: &Marketplace, start: i64) -> AppointmentId {
        market.set_nurse_rate("nurse-ada", 20_000);
        let appointment = market
            .book("patient-bo", "nurse-ada", start, start + MICROS_PER_HOUR, NOW)
            .unwrap();
        market
            .respond("nurse-ada", appointment.id, ResponseDecision::Confirm, NOW)
            .unwrap();
        appointment.id
    }

    fn settled_visit(market: &Marketplace, start: i64) -> (AppointmentId, PaymentId) {
        let appointment_id = confirmed_visit(market, start);
        let payment = market.pay("patient-bo", appointment_id, NOW).unwrap();
        market.settle("patient-bo", payment.id, NOW + 1).unwrap();
        (appointment_id, payment.id)
    }

    /// Scenario C: 200.00 splits into 30.00 fee and 170.00 payout
    #[test]
    fn test_split_of_two_hundred() {
        let market = Marketplace::new();
        let appointment_id = confirmed_visit(&market, NOW + 2 * MICROS_PER_DAY);
        let payment = market.pay("patient-bo", appointment_id, NOW).unwrap();

        assert_eq!(payment.split.amount_cents, 20_000);
        assert_eq!(payment.split.platform_fee_cents, 3_000);
        assert_eq!(payment.split.nurse_payout_cents, 17_000);
        assert_eq!(payment.status, PaymentStatus::Processing);

        let settled = market.settle("patient-bo", payment.id, NOW + 1).unwrap();
        assert_eq!(settled.status, PaymentStatus::Completed);
        assert_eq!(settled.split, payment.split);
    }

    #[test]
    fn test_settling_twice_returns_settled_payment() {
        let market = Marketplace::new();
        let (_, payment_id) = settled_visit(&market, NOW + 2 * MICROS_PER_DAY);

        let again = market.settle("patient-bo", payment_id, NOW + 5).unwrap();
        assert_eq!(again.status, PaymentStatus::Completed);
        assert_eq!(again.updated_at, NOW + 1);
    }

    #[test]
    fn test_pending_visit_cannot_be_paid() {
        let market = Marketplace::new();
        market.set_nurse_rate("nurse-ada", 20_000);
        let start = NOW + 2 * MICROS_PER_DAY;
        let appointment = market
            .book("patient-bo", "nurse-ada", start, start + MICROS_PER_HOUR, NOW)
            .unwrap();

        let err = market.pay("patient-bo", appointment.id, NOW).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_payment_preconditions_in_order() {
        let market = Marketplace::new();
        let appointment_id = confirmed_visit(&market, NOW + 2 * MICROS_PER_DAY);

        let err = market.pay("patient-bo", 9_999, NOW).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = market.pay("patient-cy", appointment_id, NOW).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        market.pay("patient-bo", appointment_id, NOW).unwrap();
        let err = market.pay("patient-cy", appointment_id, NOW).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    /// Scenario C: a refund one day ahead of the visit cancels it
    #[test]
    fn test_refund_before_visit_cancels_appointment() {
        let market = Marketplace::new();
        let start = NOW + 2 * MICROS_PER_DAY;
        let (appointment_id, payment_id) = settled_visit(&market, start);

        let refunded = market
            .refund("patient-bo", payment_id, "Plans changed", start - MICROS_PER_DAY)
            .unwrap();
        assert_eq!(refunded.status, PaymentStatus::Refunded);
        assert_eq!(refunded.refund_reason.as_deref(), Some("Plans changed"));
        assert_eq!(
            market.appointment(appointment_id).unwrap().status,
            AppointmentStatus::Cancelled
        );
    }

    /// Scenario C: a refund one day after the visit is refused
    #[test]
    fn test_refund_after_visit_is_rejected() {
        let market = Marketplace::new();
        let start = NOW + 2 * MICROS_PER_DAY;
        let (appointment_id, payment_id) = settled_visit(&market, start);

        let err = market
            .refund("patient-bo", payment_id, "Plans changed", start + MICROS_PER_DAY)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(
            market.appointment(appointment_id).unwrap().status,
            AppointmentStatus::Confirmed
        );
    }

    /// Processing and refunded payments cannot be refunded
    #[test]
    fn test_refund_requires_completed_payment() {
        let market = Marketplace::new();
        let appointment_id = confirmed_visit(&market, NOW + 2 * MICROS_PER_DAY);
        let payment = market.pay("patient-bo", appointment_id, NOW).unwrap();

        let err = market
            .refund("patient-bo", payment.id, "Too early", NOW)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        market.settle("patient-bo", payment.id, NOW + 1).unwrap();
        market.refund("patient-bo", payment.id, "Plans changed", NOW + 2).unwrap();
        let err = market
            .refund("patient-bo", payment.id, "Plans changed", NOW + 3)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_only_payer_can_refund() {
        let market = Marketplace::new();
        let (_, payment_id) = settled_visit(&market, NOW + 2 * MICROS_PER_DAY);

        let err = market
            .refund("patient-cy", payment_id, "Not mine", NOW)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    #[test]
    fn test_refund_needs_reason() {
        let market = Marketplace::new();
        let (_, payment_id) = settled_visit(&market, NOW + 2 * MICROS_PER_DAY);

        let err = market.refund("patient-bo", payment_id, "  ", NOW).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_appointment_is_paid_once() {
        let market = Marketplace::new();
        let (appointment_id, _) = settled_visit(&market, NOW + 2 * MICROS_PER_DAY);

        let err = market.pay("patient-bo", appointment_id, NOW).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}

#[cfg(test)]
mod fork_tests {
    use crate::model::Marketplace;
    use nursify_care_rules::time::{MICROS_PER_DAY, MICROS_PER_HOUR};
    use nursify_care_rules::{AppointmentStatus, ErrorKind, ResponseDecision};

    const NOW: i64 = 1_704_153_600_000_000;

    /// A nurse cell that has not seen the refund starts the visit from the
    /// confirmed revision later on. The refund's cancellation still wins.
    #[test]
    fn test_stale_start_cannot_revive_refunded_visit() {
        let market = Marketplace::new();
        market.set_nurse_rate("nurse-ada", 5_000);
        let start = NOW + 2 * MICROS_PER_DAY;
        let booked = market
            .book("patient-bo", "nurse-ada", start, start + MICROS_PER_HOUR, NOW)
            .unwrap();
        market
            .respond("nurse-ada", booked.id, ResponseDecision::Confirm, NOW + 1)
            .unwrap();
        let confirmed_revision = market.appointment_revisions(booked.id).unwrap().len() - 1;

        let payment = market.pay("patient-bo", booked.id, NOW + 2).unwrap();
        market.settle("patient-bo", payment.id, NOW + 3).unwrap();
        market
            .refund("patient-bo", payment.id, "Plans changed", NOW + 4)
            .unwrap();

        let stale = market
            .commit_from_revision(
                booked.id,
                confirmed_revision,
                AppointmentStatus::InProgress,
                NOW + 10,
            )
            .unwrap();
        assert_eq!(stale.status, AppointmentStatus::InProgress);

        assert_eq!(
            market.appointment(booked.id).unwrap().status,
            AppointmentStatus::Cancelled
        );
        let err = market.complete("nurse-ada", booked.id, NOW + 11).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        let err = market
            .submit_review("patient-bo", booked.id, "nurse-ada", 5)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    /// Two forks of the same status settle on the later write.
    #[test]
    fn test_equal_status_forks_settle_on_later_write() {
        let market = Marketplace::new();
        market.set_nurse_rate("nurse-ada", 5_000);
        let start = NOW + 2 * MICROS_PER_DAY;
        let booked = market
            .book("patient-bo", "nurse-ada", start, start + MICROS_PER_HOUR, NOW)
            .unwrap();

        market
            .commit_from_revision(booked.id, 0, AppointmentStatus::Confirmed, NOW + 5)
            .unwrap();
        market
            .commit_from_revision(booked.id, 0, AppointmentStatus::Confirmed, NOW + 2)
            .unwrap();

        let settled = market.appointment(booked.id).unwrap();
        assert_eq!(settled.status, AppointmentStatus::Confirmed);
        assert_eq!(settled.updated_at, NOW + 5);
    }

    /// Reminders never add a revision, so they cannot race a cancellation.
    #[test]
    fn test_reminder_leaves_revisions_alone() {
        let market = Marketplace::new();
        market.set_nurse_rate("nurse-ada", 5_000);
        let start = NOW + MICROS_PER_HOUR;
        let booked = market
            .book("patient-bo", "nurse-ada", start, start + MICROS_PER_HOUR, NOW)
            .unwrap();
        market
            .respond("nurse-ada", booked.id, ResponseDecision::Confirm, NOW)
            .unwrap();
        let before = market.appointment_revisions(booked.id).unwrap().len();

        let lead = 24 * MICROS_PER_HOUR;
        assert!(market.send_reminder(booked.id, NOW + 1, lead).unwrap());
        assert!(!market.send_reminder(booked.id, NOW + 2, lead).unwrap());
        assert_eq!(market.appointment_revisions(booked.id).unwrap().len(), before);
    }
}
