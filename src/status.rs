//! Display metadata and aggregate summaries derived from repair statuses.

use crate::types::{Repair, RepairStatus};

// ---------------------------------------------------------------------------
// Per-status display metadata
// ---------------------------------------------------------------------------

/// Icon/color/label triple for rendering a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayStatus {
    pub icon: &'static str,
    pub color: &'static str,
    pub text: &'static str,
}

const PENDING: DisplayStatus = DisplayStatus {
    icon: "pending-actions",
    color: "amber.400",
    text: "PENDING",
};

const IN_PROGRESS: DisplayStatus = DisplayStatus {
    icon: "engineering",
    color: "blue.400",
    text: "IN PROGRESS",
};

const COMPLETED: DisplayStatus = DisplayStatus {
    icon: "check-circle",
    color: "green.400",
    text: "COMPLETED",
};

const UNKNOWN: DisplayStatus = DisplayStatus {
    icon: "help",
    color: "gray.400",
    text: "UNKNOWN",
};

impl RepairStatus {
    pub fn display(&self) -> DisplayStatus {
        match self {
            Self::Pending => PENDING,
            Self::InProgress => IN_PROGRESS,
            Self::Completed => COMPLETED,
            Self::Unknown(_) => UNKNOWN,
        }
    }
}

/// Map a raw status string to display metadata.
///
/// Unknown or legacy values resolve to the gray `UNKNOWN` badge; they must
/// never fail, since production data contains statuses outside the
/// canonical set.
pub fn classify(raw: &str) -> DisplayStatus {
    RepairStatus::from(raw.to_owned()).display()
}

// ---------------------------------------------------------------------------
// Aggregate summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBucket {
    pub count: usize,
    pub color: &'static str,
    pub label: &'static str,
}

/// Counts per canonical lifecycle state, plus the overall total.
///
/// Tickets with unrecognized statuses contribute to `total` but to no named
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSummary {
    pub pending: StatusBucket,
    pub in_progress: StatusBucket,
    pub completed: StatusBucket,
    pub total: usize,
}

impl StatusSummary {
    /// Percentage of the total represented by `count`, as 0–100.
    ///
    /// An empty summary yields `0.0` for every bucket rather than NaN.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                count as f64 * 100.0 / self.total as f64
            }
        }
    }
}

/// Tally repairs by lifecycle state for progress displays.
pub fn summarize(repairs: &[Repair]) -> StatusSummary {
    let mut pending = 0;
    let mut in_progress = 0;
    let mut completed = 0;
    for repair in repairs {
        match repair.status {
            RepairStatus::Pending => pending += 1,
            RepairStatus::InProgress => in_progress += 1,
            RepairStatus::Completed => completed += 1,
            RepairStatus::Unknown(_) => {}
        }
    }
    StatusSummary {
        pending: StatusBucket {
            count: pending,
            color: PENDING.color,
            label: PENDING.text,
        },
        in_progress: StatusBucket {
            count: in_progress,
            color: IN_PROGRESS.color,
            label: IN_PROGRESS.text,
        },
        completed: StatusBucket {
            count: completed,
            color: COMPLETED.color,
            label: COMPLETED.text,
        },
        total: repairs.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn repair_with_status(id: &str, status: RepairStatus) -> Repair {
        Repair {
            id: id.to_owned(),
            report_date: "2024-06-10".to_owned(),
            report_time: "09:00".to_owned(),
            reporter_name: "Somchai".to_owned(),
            reporter_phone: String::new(),
            building_id: "b1".to_owned(),
            floor_id: "f1".to_owned(),
            room_id: "r1".to_owned(),
            description: "Broken light".to_owned(),
            images: Vec::new(),
            status,
            received_by: None,
            process_date: None,
            process_time: None,
            completed_date: None,
            completed_solution: None,
            has_feedback: false,
            feedback: None,
        }
    }

    #[test]
    fn classify_known_statuses() {
        assert_eq!(classify("pending").text, "PENDING");
        assert_eq!(classify("inprogress").text, "IN PROGRESS");
        assert_eq!(classify("completed").text, "COMPLETED");
    }

    #[test]
    fn classify_bogus_status_is_gray_unknown() {
        let display = classify("bogus_status");
        assert_eq!(display.icon, "help");
        assert_eq!(display.color, "gray.400");
        assert_eq!(display.text, "UNKNOWN");
    }

    #[test]
    fn summarize_empty_has_zero_percentages() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.pending.count, 0);
        assert_eq!(summary.in_progress.count, 0);
        assert_eq!(summary.completed.count, 0);
        assert_eq!(summary.percent(summary.pending.count), 0.0);
        assert_eq!(summary.percent(summary.completed.count), 0.0);
    }

    #[test]
    fn summarize_counts_and_percentages() {
        let repairs = vec![
            repair_with_status("1", RepairStatus::Pending),
            repair_with_status("2", RepairStatus::Pending),
            repair_with_status("3", RepairStatus::InProgress),
            repair_with_status("4", RepairStatus::Completed),
        ];
        let summary = summarize(&repairs);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.pending.count, 2);
        assert_eq!(summary.in_progress.count, 1);
        assert_eq!(summary.completed.count, 1);
        assert_eq!(summary.percent(summary.pending.count), 50.0);
        assert_eq!(summary.percent(summary.completed.count), 25.0);
    }

    #[test]
    fn unknown_statuses_count_toward_total_only() {
        let repairs = vec![
            repair_with_status("1", RepairStatus::Pending),
            repair_with_status("2", RepairStatus::Unknown("legacy".to_owned())),
        ];
        let summary = summarize(&repairs);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.pending.count, 1);
        assert_eq!(
            summary.pending.count + summary.in_progress.count + summary.completed.count,
            1
        );
    }
}
