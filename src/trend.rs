// Month-over-month trend calculation for the overview cards.
//
// The arithmetic is direction-agnostic: it returns a signed percentage and
// nothing else. Whether an increase is favorable is per-metric presentation
// metadata carried alongside the number, never folded into it.
use crate::types::{Status, WorkOrder};
use crate::util::months_between;
use chrono::NaiveDate;

/// Signed percentage change from `previous` to `current`.
///
/// A zero baseline reports 100 for any growth and 0 for none. Otherwise the
/// real-valued ratio is rounded half-away-from-zero (`f64::round`).
pub fn change_percent(current: i64, previous: i64) -> i64 {
    if previous == 0 {
        return if current > 0 { 100 } else { 0 };
    }
    (((current - previous) as f64 / previous as f64) * 100.0).round() as i64
}

/// One metric's current/previous values and the derived change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricTrend {
    pub current: i64,
    pub previous: i64,
    pub change_percent: i64,
    /// Presentation flag only: for backlog-style metrics a decrease is the
    /// good direction.
    pub higher_is_better: bool,
}

impl MetricTrend {
    pub fn new(current: i64, previous: i64, higher_is_better: bool) -> Self {
        MetricTrend {
            current,
            previous,
            change_percent: change_percent(current, previous),
            higher_is_better,
        }
    }

    /// Whether the change points in the metric's good direction.
    pub fn is_favorable(&self) -> bool {
        if self.higher_is_better {
            self.change_percent >= 0
        } else {
            self.change_percent <= 0
        }
    }
}

/// Trends for the four overview counters, anchor month vs the month before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTrends {
    pub total: MetricTrend,
    pub completed: MetricTrend,
    pub in_progress: MetricTrend,
    pub not_started: MetricTrend,
}

#[derive(Default)]
struct MonthCounts {
    total: i64,
    completed: i64,
    in_progress: i64,
    not_started: i64,
}

fn count_month(orders: &[WorkOrder], anchor: NaiveDate, offset: i32) -> MonthCounts {
    let mut counts = MonthCounts::default();
    for o in orders {
        if months_between(anchor, o.date_issued) != offset {
            continue;
        }
        counts.total += 1;
        match o.status {
            Status::Completed => counts.completed += 1,
            Status::InProgress => counts.in_progress += 1,
            Status::NotStarted => counts.not_started += 1,
        }
    }
    counts
}

/// Compare issue-month counters between the anchor month and the preceding
/// calendar month.
///
/// An increase is favorable for total, completed and in-progress; for
/// not-started a growing backlog reads as unfavorable.
pub fn month_over_month(orders: &[WorkOrder], anchor: NaiveDate) -> MonthlyTrends {
    let current = count_month(orders, anchor, 0);
    let previous = count_month(orders, anchor, 1);
    MonthlyTrends {
        total: MetricTrend::new(current.total, previous.total, true),
        completed: MetricTrend::new(current.completed, previous.completed, true),
        in_progress: MetricTrend::new(current.in_progress, previous.in_progress, true),
        not_started: MetricTrend::new(current.not_started, previous.not_started, false),
    }
}
