use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Repair lifecycle status
// ---------------------------------------------------------------------------

/// Lifecycle status of a repair ticket.
///
/// The backend transmits bare strings; legacy records occasionally carry
/// values outside the canonical set, so unrecognized input is preserved
/// verbatim in `Unknown` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RepairStatus {
    Pending,
    InProgress,
    Completed,
    Unknown(String),
}

impl From<String> for RepairStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "inprogress" | "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            _ => Self::Unknown(s),
        }
    }
}

impl From<RepairStatus> for String {
    fn from(status: RepairStatus) -> Self {
        match status {
            RepairStatus::Pending => "pending".to_owned(),
            RepairStatus::InProgress => "inprogress".to_owned(),
            RepairStatus::Completed => "completed".to_owned(),
            RepairStatus::Unknown(s) => s,
        }
    }
}

impl RepairStatus {
    /// Wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "inprogress",
            Self::Completed => "completed",
            Self::Unknown(s) => s,
        }
    }

    /// Position in the forward lifecycle; `None` for unrecognized statuses.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::InProgress => Some(1),
            Self::Completed => Some(2),
            Self::Unknown(_) => None,
        }
    }

    /// Whether the normal lifecycle permits moving from `self` to `next`.
    ///
    /// Transitions are monotonic forward between known states. Admin
    /// corrections bypass this check and write the status directly.
    pub fn can_transition_to(&self, next: &Self) -> bool {
        match (self.rank(), next.rank()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Repair domain type
// ---------------------------------------------------------------------------

/// End-user feedback recorded on a completed ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Rating, 1–5.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// A facility repair request.
///
/// Created server-side; the client receives, derives, and locally marks
/// these records but never fabricates an id. Dates and times are kept in the
/// backend's display form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repair {
    pub id: String,
    pub report_date: String,
    #[serde(default)]
    pub report_time: String,
    pub reporter_name: String,
    #[serde(default)]
    pub reporter_phone: String,
    pub building_id: String,
    pub floor_id: String,
    pub room_id: String,
    pub description: String,
    /// Normalized image paths; see `images::parse_image_refs`.
    #[serde(default)]
    pub images: Vec<String>,
    pub status: RepairStatus,
    /// Technician who accepted the ticket; populated once status reaches
    /// `InProgress`.
    pub received_by: Option<String>,
    pub process_date: Option<String>,
    pub process_time: Option<String>,
    pub completed_date: Option<String>,
    /// Solution text; populated only at `Completed`.
    pub completed_solution: Option<String>,
    #[serde(default)]
    pub has_feedback: bool,
    pub feedback: Option<Feedback>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse() {
        assert_eq!(RepairStatus::from("pending".to_owned()), RepairStatus::Pending);
        assert_eq!(
            RepairStatus::from("inprogress".to_owned()),
            RepairStatus::InProgress
        );
        assert_eq!(
            RepairStatus::from("completed".to_owned()),
            RepairStatus::Completed
        );
    }

    #[test]
    fn unknown_status_preserves_raw_value() {
        let status = RepairStatus::from("bogus_status".to_owned());
        assert_eq!(status, RepairStatus::Unknown("bogus_status".to_owned()));
        assert_eq!(String::from(status), "bogus_status");
    }

    #[test]
    fn transitions_are_forward_only() {
        assert!(RepairStatus::Pending.can_transition_to(&RepairStatus::InProgress));
        assert!(RepairStatus::Pending.can_transition_to(&RepairStatus::Completed));
        assert!(RepairStatus::InProgress.can_transition_to(&RepairStatus::Completed));

        assert!(!RepairStatus::Completed.can_transition_to(&RepairStatus::Pending));
        assert!(!RepairStatus::InProgress.can_transition_to(&RepairStatus::InProgress));
        assert!(!RepairStatus::InProgress.can_transition_to(&RepairStatus::Pending));
    }

    #[test]
    fn unknown_status_never_transitions() {
        let unknown = RepairStatus::Unknown("wat".to_owned());
        assert!(!unknown.can_transition_to(&RepairStatus::Pending));
        assert!(!RepairStatus::Pending.can_transition_to(&unknown));
    }

    #[test]
    fn status_roundtrips_through_serde() {
        let json = serde_json::to_string(&RepairStatus::InProgress).unwrap();
        assert_eq!(json, "\"inprogress\"");
        let back: RepairStatus = serde_json::from_str("\"legacy_wip\"").unwrap();
        assert_eq!(back, RepairStatus::Unknown("legacy_wip".to_owned()));
    }
}
