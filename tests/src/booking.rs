//! Booking and Response Tests
//!
//! Cost freezing at booking time and the single-response guarantee when
//! nurse responses race on the same pending appointment.

#[cfg(test)]
mod booking_tests {
    use crate::model::Marketplace;
    use nursify_care_rules::time::{MICROS_PER_DAY, MICROS_PER_HOUR};
    use nursify_care_rules::{AppointmentStatus, ErrorKind, ResponseDecision};

    const NOW: i64 = 1_704_153_600_000_000;

    fn market() -> Marketplace {
        let market = Marketplace::new();
        market.set_nurse_rate("nurse-ada", 5_000);
        market
    }

    /// Scenario A: two hours at 50.00 costs 100.00 and starts pending
    #[test]
    fn test_booking_two_hours_at_fifty() {
        let market = market();
        let start = NOW + MICROS_PER_DAY;
        let appointment = market
            .book("patient-bo", "nurse-ada", start, start + 2 * MICROS_PER_HOUR, NOW)
            .unwrap();

        assert_eq!(appointment.total_cost_cents, 10_000);
        assert_eq!(appointment.status, AppointmentStatus::Pending);
    }

    /// Scenario A: a second response finds nothing left to process
    #[test]
    fn test_second_response_is_already_processed() {
        let market = market();
        let start = NOW + MICROS_PER_DAY;
        let booked = market
            .book("patient-bo", "nurse-ada", start, start + 2 * MICROS_PER_HOUR, NOW)
            .unwrap();

        let confirmed = market
            .respond("nurse-ada", booked.id, ResponseDecision::Confirm, NOW + 1)
            .unwrap();
        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

        let err = market
            .respond("nurse-ada", booked.id, ResponseDecision::Reject, NOW + 2)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("already processed"));

        let final_state = market.appointment(booked.id).unwrap();
        assert_eq!(final_state.status, AppointmentStatus::Confirmed);
        assert_eq!(final_state.updated_at, NOW + 1);
    }

    /// Cost stays at the rate in force when the booking was made
    #[test]
    fn test_rate_change_does_not_reprice_booking() {
        let market = market();
        let start = NOW + MICROS_PER_DAY;
        let booked = market
            .book("patient-bo", "nurse-ada", start, start + 2 * MICROS_PER_HOUR, NOW)
            .unwrap();

        market.set_nurse_rate("nurse-ada", 9_000);
        let later = market
            .book("patient-cy", "nurse-ada", start, start + 2 * MICROS_PER_HOUR, NOW)
            .unwrap();

        assert_eq!(market.appointment(booked.id).unwrap().total_cost_cents, 10_000);
        assert_eq!(later.total_cost_cents, 18_000);
    }

    #[test]
    fn test_other_nurse_cannot_respond() {
        let market = market();
        market.set_nurse_rate("nurse-eve", 4_000);
        let start = NOW + MICROS_PER_DAY;
        let booked = market
            .book("patient-bo", "nurse-ada", start, start + MICROS_PER_HOUR, NOW)
            .unwrap();

        let err = market
            .respond("nurse-eve", booked.id, ResponseDecision::Confirm, NOW)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            market.appointment(booked.id).unwrap().status,
            AppointmentStatus::Pending
        );
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let market = market();
        let err = market
            .book("patient-bo", "nurse-ada", NOW + MICROS_PER_HOUR, NOW, NOW)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

#[cfg(test)]
mod response_race_tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use crate::model::Marketplace;
    use nursify_care_rules::time::{MICROS_PER_DAY, MICROS_PER_HOUR};
    use nursify_care_rules::{AppointmentStatus, ErrorKind, ResponseDecision};
    use rand::seq::SliceRandom;

    const NOW: i64 = 1_704_153_600_000_000;

    /// Exactly one of many racing responses wins; the rest see not found
    #[test]
    fn test_racing_responses_apply_once() {
        let mut rng = rand::thread_rng();

        for _round in 0..20 {
            let market = Arc::new(Marketplace::new());
            market.set_nurse_rate("nurse-ada", 5_000);
            let start = NOW + MICROS_PER_DAY;
            let booked = market
                .book("patient-bo", "nurse-ada", start, start + MICROS_PER_HOUR, NOW)
                .unwrap();

            let mut decisions = vec![
                ResponseDecision::Confirm,
                ResponseDecision::Reject,
                ResponseDecision::Confirm,
                ResponseDecision::Reject,
            ];
            decisions.shuffle(&mut rng);

            let barrier = Arc::new(Barrier::new(decisions.len()));
            let handles: Vec<_> = decisions
                .into_iter()
                .enumerate()
                .map(|(i, decision)| {
                    let market = Arc::clone(&market);
                    let barrier = Arc::clone(&barrier);
                    let id = booked.id;
                    thread::spawn(move || {
                        barrier.wait();
                        market
                            .respond("nurse-ada", id, decision, NOW + i as i64)
                            .map(|a| a.status)
                    })
                })
                .collect();

            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            let winners: Vec<AppointmentStatus> =
                results.iter().filter_map(|r| r.as_ref().ok().copied()).collect();
            assert_eq!(winners.len(), 1, "exactly one response must apply");

            for result in results.iter().filter(|r| r.is_err()) {
                assert_eq!(result.as_ref().unwrap_err().kind(), ErrorKind::NotFound);
            }
            assert_eq!(market.appointment(booked.id).unwrap().status, winners[0]);
        }
    }
}
