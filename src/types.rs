use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Lifecycle state of a work order. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "not-started",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Administrative subdivision used to group work orders geographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionKind {
    City,
    Taluka,
}

/// Fixed reference entry; not user-editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub kind: RegionKind,
}

/// Fixed reference entry; not user-editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub contact_number: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A unit of government-funded infrastructure work tracked from issuance to
/// completion.
///
/// Invariants upheld by the generator and checked by tests:
/// - `due_date >= date_issued`;
/// - `date_completed` is `Some` iff `status == Completed`, and then
///   `date_completed >= date_issued`;
/// - `actual_cost` is present only for completed orders;
/// - `region_id` / `vendor_id` reference entries of the fixed sets;
/// - `tags` carries no duplicate label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub date_issued: NaiveDate,
    pub due_date: NaiveDate,
    pub date_completed: Option<NaiveDate>,
    pub region_id: String,
    pub vendor_id: String,
    /// Monetary values in whole rupees.
    pub budget: i64,
    pub actual_cost: Option<i64>,
    pub amount: i64,
    pub tags: Vec<String>,
    pub location: Option<Location>,
    pub priority: Priority,
}

impl WorkOrder {
    /// Overdue means the due date has passed while the order is not completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != Status::Completed && self.due_date < today
    }
}

/// Inclusive date bounds applied to `date_issued`. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, d: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if d < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if d > end {
                return false;
            }
        }
        true
    }
}

/// Overview card numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub total_work_orders: usize,
    pub not_started_work_orders: usize,
    pub in_progress_work_orders: usize,
    pub completed_work_orders: usize,
    pub overdue_work_orders: usize,
    pub total_budget: i64,
    pub total_spent: i64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct RegionPerformanceRow {
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region_name: String,
    #[serde(rename = "Completed")]
    #[tabled(rename = "Completed")]
    pub completed: usize,
    #[serde(rename = "InProgress")]
    #[tabled(rename = "InProgress")]
    pub in_progress: usize,
    #[serde(rename = "NotStarted")]
    #[tabled(rename = "NotStarted")]
    pub not_started: usize,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct MonthlyProgressRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Allotted")]
    #[tabled(rename = "Allotted")]
    pub allotted: usize,
    #[serde(rename = "Completed")]
    #[tabled(rename = "Completed")]
    pub completed: usize,
}

/// Flat, formatted view of a work order for CSV export and table previews.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct WorkOrderExportRow {
    #[serde(rename = "ID")]
    #[tabled(rename = "ID")]
    pub id: String,
    #[serde(rename = "Title")]
    #[tabled(rename = "Title")]
    pub title: String,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: String,
    #[serde(rename = "Priority")]
    #[tabled(rename = "Priority")]
    pub priority: String,
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "Vendor")]
    #[tabled(rename = "Vendor")]
    pub vendor: String,
    #[serde(rename = "DateIssued")]
    #[tabled(rename = "DateIssued")]
    pub date_issued: String,
    #[serde(rename = "DueDate")]
    #[tabled(rename = "DueDate")]
    pub due_date: String,
    #[serde(rename = "DateCompleted")]
    #[tabled(rename = "DateCompleted")]
    pub date_completed: String,
    #[serde(rename = "Budget")]
    #[tabled(rename = "Budget")]
    pub budget: String,
    #[serde(rename = "Location")]
    #[tabled(rename = "Location")]
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Status::NotStarted).unwrap(),
            "\"not-started\""
        );
        let parsed: Status = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, Status::InProgress);
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let range = DateRange {
            start: Some(d(2024, 6, 1)),
            end: Some(d(2024, 6, 30)),
        };
        assert!(range.contains(d(2024, 6, 1)));
        assert!(range.contains(d(2024, 6, 30)));
        assert!(!range.contains(d(2024, 5, 31)));
        assert!(!range.contains(d(2024, 7, 1)));
        assert!(DateRange::default().contains(d(1999, 1, 1)));
    }
}
