//! Priority scoring for waiting visits.
//!
//! [`priority_score`] is a pure function of a visit and the current wall-clock
//! time: no ambient clock, no hidden state. Callers pass `now` explicitly so
//! that aging behaviour is deterministically testable, and they must
//! re-evaluate the function before every sort because the wait-time term keeps
//! growing while a patient waits.
//!
//! Scores are held as integer centipoints ([`Score`]), so every term below is
//! exact at two decimal places and no rounding step exists.

use crate::visit::{TriageCategory, Visit, VisitType};
use chrono::{DateTime, Utc};
use medq_types::Score;

/// Fixed sentinel score for emergency visits.
///
/// Emergencies always outrank every non-emergency visit and are mutually equal
/// on this term; ordering among emergencies falls to the check-in tie-break.
pub const EMERGENCY_SCORE: Score = Score::from_cents(999_900);

/// Base score for pre-booked appointments.
pub const BASE_APPOINTMENT: Score = Score::from_cents(5_000);
/// Base score for follow-up reviews.
pub const BASE_FOLLOW_UP: Score = Score::from_cents(4_000);
/// Base score for walk-ins.
pub const BASE_WALK_IN: Score = Score::from_cents(3_000);

/// Triage bonus for category RED.
pub const TRIAGE_RED: Score = Score::from_cents(50_000);
/// Triage bonus for category YELLOW.
pub const TRIAGE_YELLOW: Score = Score::from_cents(20_000);
/// Triage bonus for category GREEN.
pub const TRIAGE_GREEN: Score = Score::ZERO;

/// The aging rate is 0.3 points per minute of wait, which is exactly one
/// centipoint per this many seconds.
const WAIT_SECONDS_PER_CENT: i64 = 2;

/// Compute the priority score of one visit at `now`.
///
/// Higher score = higher priority = served sooner. The score is the sum of
/// four independent terms — base-by-type, wait-time aging, triage bonus, and
/// manual override — except for emergencies, which short-circuit to
/// [`EMERGENCY_SCORE`] regardless of every other field.
///
/// Unrecognised visit types and triage categories contribute zero rather than
/// failing, and a `now` earlier than check-in (backward clock skew) clamps the
/// aging term to zero.
pub fn priority_score(visit: &Visit, now: DateTime<Utc>) -> Score {
    let base = match visit.visit_type {
        VisitType::Emergency => return EMERGENCY_SCORE,
        VisitType::Appointment => BASE_APPOINTMENT,
        VisitType::FollowUp => BASE_FOLLOW_UP,
        VisitType::WalkIn => BASE_WALK_IN,
        VisitType::Unrecognised => Score::ZERO,
    };

    let triage = match visit.triage_category {
        Some(TriageCategory::Red) => TRIAGE_RED,
        Some(TriageCategory::Yellow) => TRIAGE_YELLOW,
        Some(TriageCategory::Green) => TRIAGE_GREEN,
        Some(TriageCategory::Unrecognised) | None => Score::ZERO,
    };

    let override_bonus = if visit.override_flag {
        visit.override_weight.unwrap_or(Score::ZERO)
    } else {
        Score::ZERO
    };

    base + wait_contribution(visit.check_in_time, now) + triage + override_bonus
}

/// Wait-time aging term: 0.3 points per minute waited, clamped at zero when
/// the clock appears to have gone backward.
fn wait_contribution(check_in_time: DateTime<Utc>, now: DateTime<Utc>) -> Score {
    let seconds_waited = (now - check_in_time).num_seconds().max(0);
    Score::from_cents(seconds_waited / WAIT_SECONDS_PER_CENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::VisitStatus;
    use chrono::Duration;
    use uuid::Uuid;

    fn visit_checked_in_at(visit_type: VisitType, check_in_time: DateTime<Utc>) -> Visit {
        Visit {
            id: Uuid::new_v4(),
            hospital_id: Uuid::nil(),
            patient_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            visit_type,
            triage_category: None,
            status: VisitStatus::Waiting,
            check_in_time,
            consult_start_time: None,
            consult_end_time: None,
            priority_score: Score::ZERO,
            override_flag: false,
            override_weight: None,
        }
    }

    #[test]
    fn fresh_walk_in_scores_its_base() {
        let now = Utc::now();
        let visit = visit_checked_in_at(VisitType::WalkIn, now);
        assert_eq!(priority_score(&visit, now), Score::from_points(30.0));
    }

    #[test]
    fn red_appointment_adds_triage_and_wait() {
        let now = Utc::now();
        let mut visit = visit_checked_in_at(VisitType::Appointment, now - Duration::minutes(10));
        visit.triage_category = Some(TriageCategory::Red);
        // 50 base + 10 min * 0.3 + 500 triage
        assert_eq!(priority_score(&visit, now), Score::from_points(553.0));
    }

    #[test]
    fn emergency_is_a_fixed_sentinel() {
        let now = Utc::now();
        let mut visit = visit_checked_in_at(VisitType::Emergency, now - Duration::hours(3));
        visit.triage_category = Some(TriageCategory::Red);
        visit.override_flag = true;
        visit.override_weight = Some(Score::from_points(1000.0));
        assert_eq!(priority_score(&visit, now), EMERGENCY_SCORE);
    }

    #[test]
    fn emergency_outranks_any_non_emergency() {
        let now = Utc::now();
        let emergency = visit_checked_in_at(VisitType::Emergency, now);

        let mut stacked = visit_checked_in_at(VisitType::Appointment, now - Duration::hours(8));
        stacked.triage_category = Some(TriageCategory::Red);
        stacked.override_flag = true;
        stacked.override_weight = Some(Score::from_points(5000.0));

        assert!(priority_score(&emergency, now) > priority_score(&stacked, now));
    }

    #[test]
    fn aging_is_monotonic() {
        let check_in = Utc::now();
        let visit = visit_checked_in_at(VisitType::FollowUp, check_in);

        let earlier = priority_score(&visit, check_in + Duration::minutes(5));
        let later = priority_score(&visit, check_in + Duration::minutes(6));
        assert!(later > earlier);
    }

    #[test]
    fn long_wait_overtakes_base_score_gap() {
        let now = Utc::now();
        let walk_in = visit_checked_in_at(VisitType::WalkIn, now - Duration::minutes(67));
        let appointment = visit_checked_in_at(VisitType::Appointment, now);

        // 30 + 67 * 0.3 = 50.10 beats a fresh appointment's 50.00.
        assert_eq!(priority_score(&walk_in, now), Score::from_points(50.1));
        assert_eq!(priority_score(&appointment, now), Score::from_points(50.0));
        assert!(priority_score(&walk_in, now) > priority_score(&appointment, now));
    }

    #[test]
    fn override_beats_red_triage() {
        let now = Utc::now();
        let mut boosted = visit_checked_in_at(VisitType::WalkIn, now);
        boosted.override_flag = true;
        boosted.override_weight = Some(Score::from_points(1000.0));

        let mut red = visit_checked_in_at(VisitType::Appointment, now - Duration::minutes(10));
        red.triage_category = Some(TriageCategory::Red);

        assert_eq!(priority_score(&boosted, now), Score::from_points(1030.0));
        assert!(priority_score(&boosted, now) > priority_score(&red, now));
    }

    #[test]
    fn override_weight_ignored_without_flag() {
        let now = Utc::now();
        let mut visit = visit_checked_in_at(VisitType::WalkIn, now);
        visit.override_weight = Some(Score::from_points(1000.0));
        assert_eq!(priority_score(&visit, now), Score::from_points(30.0));
    }

    #[test]
    fn unrecognised_type_scores_without_base() {
        let now = Utc::now();
        let mut visit =
            visit_checked_in_at(VisitType::Unrecognised, now - Duration::minutes(10));
        visit.triage_category = Some(TriageCategory::Yellow);
        // 0 base + 3.00 wait + 200 triage
        assert_eq!(priority_score(&visit, now), Score::from_points(203.0));
    }

    #[test]
    fn unrecognised_triage_contributes_nothing() {
        let now = Utc::now();
        let mut visit = visit_checked_in_at(VisitType::WalkIn, now);
        visit.triage_category = Some(TriageCategory::Unrecognised);
        assert_eq!(priority_score(&visit, now), Score::from_points(30.0));
    }

    #[test]
    fn backward_clock_skew_clamps_wait_to_zero() {
        let check_in = Utc::now();
        let visit = visit_checked_in_at(VisitType::WalkIn, check_in);
        let skewed_now = check_in - Duration::minutes(30);
        assert_eq!(priority_score(&visit, skewed_now), Score::from_points(30.0));
    }

    #[test]
    fn negative_override_can_lower_the_score() {
        let now = Utc::now();
        let mut visit = visit_checked_in_at(VisitType::WalkIn, now);
        visit.override_flag = true;
        visit.override_weight = Some(Score::from_points(-25.0));
        assert_eq!(priority_score(&visit, now), Score::from_points(5.0));
    }
}
