//! Visit data model and lifecycle transitions.
//!
//! One [`Visit`] exists per patient encounter attempt. Visits are created at
//! check-in, mutated by status transitions during the day, and retained for
//! history once they reach a terminal status; this crate never deletes them.
//!
//! Classification enums carry the wire names used by the surrounding
//! application (`WALK_IN`, `RED`, `IN_CONSULT`, ...). Unrecognised visit types
//! and triage categories deserialize to a catch-all variant rather than
//! failing: a patient must never become unscorable because of a bad enum
//! string, so unknown values simply contribute nothing to the score.

use chrono::{DateTime, Utc};
use medq_types::Score;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of a visit, assigned at creation and immutable thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitType {
    /// Patient arrived without a booking.
    WalkIn,
    /// Pre-booked consultation.
    Appointment,
    /// Emergency presentation; always outranks every other visit.
    Emergency,
    /// Review of an earlier consultation.
    FollowUp,
    /// Catch-all for wire values this build does not recognise.
    #[serde(other)]
    Unrecognised,
}

impl VisitType {
    /// Parse from the wire format string, falling open to [`VisitType::Unrecognised`].
    pub fn from_wire(s: &str) -> Self {
        match s {
            "WALK_IN" => VisitType::WalkIn,
            "APPOINTMENT" => VisitType::Appointment,
            "EMERGENCY" => VisitType::Emergency,
            "FOLLOW_UP" => VisitType::FollowUp,
            _ => VisitType::Unrecognised,
        }
    }

    /// Convert to the wire format string.
    pub fn as_wire(self) -> &'static str {
        match self {
            VisitType::WalkIn => "WALK_IN",
            VisitType::Appointment => "APPOINTMENT",
            VisitType::Emergency => "EMERGENCY",
            VisitType::FollowUp => "FOLLOW_UP",
            VisitType::Unrecognised => "UNRECOGNISED",
        }
    }
}

impl std::fmt::Display for VisitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// Clinical urgency assigned at triage. Absence means no triage was performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriageCategory {
    /// Immediate clinical attention.
    Red,
    /// Urgent.
    Yellow,
    /// Routine.
    Green,
    /// Catch-all for wire values this build does not recognise.
    #[serde(other)]
    Unrecognised,
}

impl TriageCategory {
    /// Parse from the wire format string, falling open to [`TriageCategory::Unrecognised`].
    pub fn from_wire(s: &str) -> Self {
        match s {
            "RED" => TriageCategory::Red,
            "YELLOW" => TriageCategory::Yellow,
            "GREEN" => TriageCategory::Green,
            _ => TriageCategory::Unrecognised,
        }
    }

    /// Convert to the wire format string.
    pub fn as_wire(self) -> &'static str {
        match self {
            TriageCategory::Red => "RED",
            TriageCategory::Yellow => "YELLOW",
            TriageCategory::Green => "GREEN",
            TriageCategory::Unrecognised => "UNRECOGNISED",
        }
    }
}

impl std::fmt::Display for TriageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// Lifecycle status of a visit.
///
/// Unlike [`VisitType`] this enum is closed: a status string this build does
/// not recognise is a caller error, not something to fail open on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitStatus {
    Booked,
    Arrived,
    Waiting,
    InConsult,
    Completed,
    Skipped,
    NoShow,
    DroppedOut,
}

impl VisitStatus {
    /// Parse from the wire format string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "BOOKED" => Some(VisitStatus::Booked),
            "ARRIVED" => Some(VisitStatus::Arrived),
            "WAITING" => Some(VisitStatus::Waiting),
            "IN_CONSULT" => Some(VisitStatus::InConsult),
            "COMPLETED" => Some(VisitStatus::Completed),
            "SKIPPED" => Some(VisitStatus::Skipped),
            "NO_SHOW" => Some(VisitStatus::NoShow),
            "DROPPED_OUT" => Some(VisitStatus::DroppedOut),
            _ => None,
        }
    }

    /// Convert to the wire format string.
    pub fn as_wire(self) -> &'static str {
        match self {
            VisitStatus::Booked => "BOOKED",
            VisitStatus::Arrived => "ARRIVED",
            VisitStatus::Waiting => "WAITING",
            VisitStatus::InConsult => "IN_CONSULT",
            VisitStatus::Completed => "COMPLETED",
            VisitStatus::Skipped => "SKIPPED",
            VisitStatus::NoShow => "NO_SHOW",
            VisitStatus::DroppedOut => "DROPPED_OUT",
        }
    }

    /// Terminal visits accept no further status changes.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            VisitStatus::Completed
                | VisitStatus::Skipped
                | VisitStatus::NoShow
                | VisitStatus::DroppedOut
        )
    }

    /// Whether a visit in this status belongs in the active queue view.
    pub fn is_queueable(self) -> bool {
        matches!(self, VisitStatus::Arrived | VisitStatus::Waiting)
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// The unit of queue membership: one patient encounter attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Unique identifier for this visit.
    pub id: Uuid,
    /// Hospital/tenant this visit belongs to.
    pub hospital_id: Uuid,
    /// Patient being seen.
    pub patient_id: Uuid,
    /// Doctor whose sub-queue this visit sits in.
    pub doctor_id: Uuid,
    /// Visit classification, immutable after creation.
    pub visit_type: VisitType,
    /// Clinical urgency, if triage was performed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triage_category: Option<TriageCategory>,
    /// Current lifecycle status.
    pub status: VisitStatus,
    /// Wait-time clock origin; never changes after creation.
    pub check_in_time: DateTime<Utc>,
    /// Stamped on the first transition into `IN_CONSULT`, then frozen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consult_start_time: Option<DateTime<Utc>>,
    /// Stamped on the first transition into `COMPLETED`, then frozen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consult_end_time: Option<DateTime<Utc>>,
    /// Cached output of the scoring function at some past instant.
    ///
    /// Not a source of truth: recompute before every sort.
    pub priority_score: Score,
    /// Manual escalation flag.
    #[serde(default)]
    pub override_flag: bool,
    /// Bonus added to the score only while `override_flag` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_weight: Option<Score>,
}

impl Visit {
    /// Apply a status transition at `now`.
    ///
    /// Consult timestamps are stamped idempotently: the first transition into
    /// `IN_CONSULT` sets `consult_start_time` and the first transition into
    /// `COMPLETED` sets `consult_end_time`; repeated transitions to the same
    /// status leave them untouched.
    ///
    /// Terminal-status enforcement lives in [`crate::VisitService`], which
    /// rejects the transition before this method runs.
    pub fn transition(&mut self, next: VisitStatus, now: DateTime<Utc>) {
        if next == VisitStatus::InConsult && self.consult_start_time.is_none() {
            self.consult_start_time = Some(now);
        }
        if next == VisitStatus::Completed && self.consult_end_time.is_none() {
            self.consult_end_time = Some(now);
        }
        self.status = next;
    }
}

/// Fields supplied by the caller when checking a patient in.
///
/// Identity, status, and the wait-time clock origin are assigned by
/// [`crate::VisitService::check_in`], not by the caller.
#[derive(Clone, Debug)]
pub struct NewVisit {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub visit_type: VisitType,
    pub triage_category: Option<TriageCategory>,
    pub override_flag: bool,
    pub override_weight: Option<Score>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_visit(now: DateTime<Utc>) -> Visit {
        Visit {
            id: Uuid::new_v4(),
            hospital_id: Uuid::nil(),
            patient_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            visit_type: VisitType::WalkIn,
            triage_category: None,
            status: VisitStatus::Arrived,
            check_in_time: now,
            consult_start_time: None,
            consult_end_time: None,
            priority_score: Score::ZERO,
            override_flag: false,
            override_weight: None,
        }
    }

    #[test]
    fn consult_start_is_stamped_once() {
        let now = Utc::now();
        let mut visit = sample_visit(now);

        visit.transition(VisitStatus::InConsult, now);
        assert_eq!(visit.consult_start_time, Some(now));

        // A second transition into the same status must not move the stamp.
        let later = now + Duration::minutes(5);
        visit.transition(VisitStatus::InConsult, later);
        assert_eq!(visit.consult_start_time, Some(now));
    }

    #[test]
    fn consult_end_is_stamped_once() {
        let now = Utc::now();
        let mut visit = sample_visit(now);

        visit.transition(VisitStatus::InConsult, now);
        let end = now + Duration::minutes(12);
        visit.transition(VisitStatus::Completed, end);
        assert_eq!(visit.consult_end_time, Some(end));

        visit.transition(VisitStatus::Completed, end + Duration::minutes(1));
        assert_eq!(visit.consult_end_time, Some(end));
    }

    #[test]
    fn terminal_statuses_are_exactly_four() {
        for status in [
            VisitStatus::Completed,
            VisitStatus::Skipped,
            VisitStatus::NoShow,
            VisitStatus::DroppedOut,
        ] {
            assert!(status.is_terminal(), "{status} should be terminal");
        }
        for status in [
            VisitStatus::Booked,
            VisitStatus::Arrived,
            VisitStatus::Waiting,
            VisitStatus::InConsult,
        ] {
            assert!(!status.is_terminal(), "{status} should not be terminal");
        }
    }

    #[test]
    fn only_arrived_and_waiting_are_queueable() {
        assert!(VisitStatus::Arrived.is_queueable());
        assert!(VisitStatus::Waiting.is_queueable());
        assert!(!VisitStatus::Booked.is_queueable());
        assert!(!VisitStatus::InConsult.is_queueable());
        assert!(!VisitStatus::Completed.is_queueable());
    }

    #[test]
    fn unknown_visit_type_fails_open() {
        assert_eq!(VisitType::from_wire("TELEHEALTH"), VisitType::Unrecognised);
        let parsed: VisitType = serde_json::from_str("\"TELEHEALTH\"").expect("deserialize");
        assert_eq!(parsed, VisitType::Unrecognised);
    }

    #[test]
    fn unknown_triage_category_fails_open() {
        assert_eq!(
            TriageCategory::from_wire("BLACK"),
            TriageCategory::Unrecognised
        );
        let parsed: TriageCategory = serde_json::from_str("\"BLACK\"").expect("deserialize");
        assert_eq!(parsed, TriageCategory::Unrecognised);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(VisitStatus::from_wire("PAUSED"), None);
        assert!(serde_json::from_str::<VisitStatus>("\"PAUSED\"").is_err());
    }

    #[test]
    fn visit_round_trips_through_json() {
        let now = Utc::now();
        let mut visit = sample_visit(now);
        visit.triage_category = Some(TriageCategory::Yellow);
        visit.override_flag = true;
        visit.override_weight = Some(Score::from_points(25.0));

        let json = serde_json::to_string(&visit).expect("serialize");
        assert!(json.contains("\"WALK_IN\""));
        assert!(json.contains("\"YELLOW\""));
        assert!(json.contains("\"ARRIVED\""));

        let back: Visit = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, visit);
    }
}
