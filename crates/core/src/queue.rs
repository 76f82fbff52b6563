//! Deterministic ordering of the active queue.
//!
//! The sort is pull-based: every call re-scores the whole collection at `now`
//! and sorts it from scratch. At hospital-queue scale (tens to low hundreds of
//! visits) a full O(n log n) re-sort is cheap, and it sidesteps the invariant
//! maintenance an incremental structure would need as scores drift with time.

use crate::scoring::priority_score;
use crate::visit::Visit;
use chrono::{DateTime, Utc};
use medq_types::Score;
use std::cmp::Ordering;

/// Scores within this band of each other are treated as equal for ordering.
///
/// Near-equal scores would otherwise swap places from one refresh to the next
/// as the aging term creeps; inside the band the earlier check-in wins
/// outright, enforcing FIFO fairness among equally-urgent visits.
pub const SCORE_TOLERANCE: Score = Score::from_cents(10);

/// Compare two visits by their cached scores, descending, with the
/// tolerance-band tie-break on check-in time.
///
/// Both scores must have been computed at the same `now`; [`sort_queue`]
/// guarantees that for its callees.
///
/// The band makes this comparison intransitive (a chain of near-equal scores
/// can span past the band), so it is not a total order and must not drive
/// `slice::sort_by`. [`sort_queue`] applies it only between neighbours.
pub fn compare_visits(a: &Visit, b: &Visit) -> Ordering {
    if a.priority_score.within(b.priority_score, SCORE_TOLERANCE) {
        // Within tolerance, earlier check-in serves first.
        a.check_in_time
            .cmp(&b.check_in_time)
            .then_with(|| a.id.cmp(&b.id))
    } else {
        b.priority_score.cmp(&a.priority_score)
    }
}

/// Re-score every visit at `now` and return a freshly sorted queue.
///
/// The input is left untouched; the returned visits carry their recomputed
/// `priority_score` so display layers can show the numbers that produced the
/// order. Total over any well-formed input: there is no error path.
pub fn sort_queue(visits: &[Visit], now: DateTime<Utc>) -> Vec<Visit> {
    let mut queue: Vec<Visit> = visits
        .iter()
        .cloned()
        .map(|mut visit| {
            visit.priority_score = priority_score(&visit, now);
            visit
        })
        .collect();

    // Canonical total order first, so the result is independent of input
    // order and `sort_by` gets a comparator it can trust.
    queue.sort_by(|a, b| {
        b.priority_score
            .cmp(&a.priority_score)
            .then_with(|| a.check_in_time.cmp(&b.check_in_time))
            .then_with(|| a.id.cmp(&b.id))
    });

    // Stable insertion pass for the tolerance band: each visit moves forward
    // past later check-ins for as long as [`compare_visits`] says it should.
    // Only neighbours are ever compared, so the band's intransitivity over
    // longer chains never comes into play.
    for unplaced in 1..queue.len() {
        let mut idx = unplaced;
        while idx > 0 && compare_visits(&queue[idx - 1], &queue[idx]) == Ordering::Greater {
            queue.swap(idx - 1, idx);
            idx -= 1;
        }
    }
    queue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::{TriageCategory, VisitStatus, VisitType};
    use chrono::Duration;
    use uuid::Uuid;

    fn visit(visit_type: VisitType, check_in_time: DateTime<Utc>) -> Visit {
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
    fn input_is_not_mutated() {
        let now = Utc::now();
        let visits = vec![
            visit(VisitType::WalkIn, now),
            visit(VisitType::Emergency, now),
        ];

        let sorted = sort_queue(&visits, now);
        assert_eq!(sorted.len(), 2);
        // Original order and cached scores are untouched.
        assert_eq!(visits[0].visit_type, VisitType::WalkIn);
        assert_eq!(visits[0].priority_score, Score::ZERO);
    }

    #[test]
    fn orders_by_score_descending() {
        let now = Utc::now();
        let walk_in = visit(VisitType::WalkIn, now);
        let mut red = visit(VisitType::Appointment, now - Duration::minutes(10));
        red.triage_category = Some(TriageCategory::Red);
        let emergency = visit(VisitType::Emergency, now);

        let sorted = sort_queue(&[walk_in.clone(), red.clone(), emergency.clone()], now);
        assert_eq!(sorted[0].id, emergency.id);
        assert_eq!(sorted[1].id, red.id);
        assert_eq!(sorted[2].id, walk_in.id);
    }

    #[test]
    fn tie_break_prefers_earlier_check_in_regardless_of_input_order() {
        let now = Utc::now();
        // A: 30.00 after no wait; G: 30.05 raw via a small positive override.
        let a = visit(VisitType::WalkIn, now - Duration::minutes(10));
        let mut g = visit(VisitType::WalkIn, now - Duration::minutes(5));
        g.override_flag = true;
        g.override_weight = Some(Score::from_points(1.55));

        let forward = sort_queue(&[a.clone(), g.clone()], now);
        let reverse = sort_queue(&[g.clone(), a.clone()], now);

        // |33.00 - 33.05| = 0.05 is inside the band, so the earlier check-in
        // wins despite the nominally higher raw score.
        assert_eq!(forward[0].id, a.id);
        assert_eq!(reverse[0].id, a.id);
    }

    #[test]
    fn beyond_tolerance_the_higher_score_wins() {
        let now = Utc::now();
        let early = visit(VisitType::WalkIn, now - Duration::minutes(10));
        let mut late = visit(VisitType::WalkIn, now - Duration::minutes(5));
        late.override_flag = true;
        late.override_weight = Some(Score::from_points(5.0));

        // 33.00 vs 36.50: gap exceeds the band, check-in no longer matters.
        let sorted = sort_queue(&[early.clone(), late.clone()], now);
        assert_eq!(sorted[0].id, late.id);
    }

    #[test]
    fn emergencies_order_among_themselves_by_check_in() {
        let now = Utc::now();
        let second = visit(VisitType::Emergency, now - Duration::minutes(2));
        let first = visit(VisitType::Emergency, now - Duration::minutes(9));

        let sorted = sort_queue(&[second.clone(), first.clone()], now);
        assert_eq!(sorted[0].id, first.id);
        assert_eq!(sorted[1].id, second.id);
    }

    #[test]
    fn aged_walk_in_overtakes_fresh_appointment() {
        let now = Utc::now();
        let aged = visit(VisitType::WalkIn, now - Duration::minutes(80));
        let fresh = visit(VisitType::Appointment, now);

        // 30 + 24.00 = 54.00 vs 50.00: outside the band, aging wins.
        let sorted = sort_queue(&[fresh.clone(), aged.clone()], now);
        assert_eq!(sorted[0].id, aged.id);
    }

    #[test]
    fn scores_are_recomputed_not_trusted() {
        let now = Utc::now();
        let mut stale = visit(VisitType::WalkIn, now);
        stale.priority_score = Score::from_points(9000.0); // stale cache
        let appointment = visit(VisitType::Appointment, now);

        let sorted = sort_queue(&[stale.clone(), appointment.clone()], now);
        // The stale cache is overwritten, so the appointment leads.
        assert_eq!(sorted[0].id, appointment.id);
        assert_eq!(sorted[1].priority_score, Score::from_points(30.0));
    }

    #[test]
    fn dense_score_gradient_sorts_deterministically() {
        // A busy morning: walk-ins seconds apart put neighbouring scores
        // inside the band while the chain as a whole spans far past it.
        let now = Utc::now();
        let mut visits = Vec::new();
        for i in 0..200i64 {
            let mut v = visit(VisitType::WalkIn, now - Duration::seconds(12 * i));
            if i % 3 == 0 {
                v.override_flag = true;
                v.override_weight = Some(Score::from_cents(7));
            }
            visits.push(v);
        }

        let forward = sort_queue(&visits, now);
        let mut shuffled = visits.clone();
        shuffled.reverse();
        let backward = sort_queue(&shuffled, now);

        assert_eq!(forward.len(), 200);
        let forward_ids: Vec<Uuid> = forward.iter().map(|v| v.id).collect();
        let backward_ids: Vec<Uuid> = backward.iter().map(|v| v.id).collect();
        assert_eq!(forward_ids, backward_ids);
        // The longest-waiting walk-in holds both the top score and the
        // earliest check-in, so it serves first either way.
        assert_eq!(forward[0].id, visits[199].id);
    }

    #[test]
    fn opposite_extreme_overrides_keep_score_order() {
        let now = Utc::now();
        let mut lifted = visit(VisitType::WalkIn, now);
        lifted.override_flag = true;
        lifted.override_weight = Some(Score::from_cents(i64::MAX));
        let mut buried = visit(VisitType::WalkIn, now - Duration::minutes(5));
        buried.override_flag = true;
        buried.override_weight = Some(Score::from_cents(i64::MIN + 1));

        // The gap dwarfs the band, so the earlier check-in must not rescue
        // the negative override.
        let sorted = sort_queue(&[buried.clone(), lifted.clone()], now);
        assert_eq!(sorted[0].id, lifted.id);
        assert_eq!(sorted[1].id, buried.id);
    }

    #[test]
    fn identical_visits_order_deterministically() {
        let now = Utc::now();
        let check_in = now - Duration::minutes(3);
        let a = visit(VisitType::WalkIn, check_in);
        let b = visit(VisitType::WalkIn, check_in);

        let forward = sort_queue(&[a.clone(), b.clone()], now);
        let reverse = sort_queue(&[b.clone(), a.clone()], now);
        assert_eq!(forward[0].id, reverse[0].id);
    }
}
