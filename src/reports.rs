// Aggregation engine: read-only projections over a work-order collection.
//
// Each projection optionally narrows the collection by an inclusive date
// range on `date_issued` before aggregating. Buckets with no matching
// records report zero, never an absent entry.
use crate::types::{
    DateRange, MonthlyProgressRow, OverviewStats, Region, RegionPerformanceRow, Status, WorkOrder,
};
use crate::util::{month_floor_back, month_label, months_between};
use chrono::NaiveDate;
use std::collections::HashMap;

fn in_range(order: &WorkOrder, range: Option<&DateRange>) -> bool {
    range.map_or(true, |r| r.contains(order.date_issued))
}

/// Status counts, overdue count, and budget/spend totals.
///
/// Overdue means `due_date < today` while the order is not completed; `today`
/// is injected so tests can pin it instead of reading the wall clock.
pub fn overview_stats(
    orders: &[WorkOrder],
    range: Option<&DateRange>,
    today: NaiveDate,
) -> OverviewStats {
    let mut stats = OverviewStats {
        total_work_orders: 0,
        not_started_work_orders: 0,
        in_progress_work_orders: 0,
        completed_work_orders: 0,
        overdue_work_orders: 0,
        total_budget: 0,
        total_spent: 0,
    };
    for o in orders.iter().filter(|o| in_range(o, range)) {
        stats.total_work_orders += 1;
        match o.status {
            Status::NotStarted => stats.not_started_work_orders += 1,
            Status::InProgress => stats.in_progress_work_orders += 1,
            Status::Completed => stats.completed_work_orders += 1,
        }
        if o.is_overdue(today) {
            stats.overdue_work_orders += 1;
        }
        stats.total_budget += o.budget;
        stats.total_spent += o.actual_cost.unwrap_or(0);
    }
    stats
}

/// Per-region status breakdown, one row per reference region.
///
/// Rows come out in reference-set order, and regions with no matching
/// records appear with all-zero counts rather than being omitted. Records
/// referencing an id outside the set are skipped here; integrity is checked
/// at generation time.
pub fn region_performance(
    orders: &[WorkOrder],
    regions: &[Region],
    range: Option<&DateRange>,
) -> Vec<RegionPerformanceRow> {
    let mut rows: Vec<RegionPerformanceRow> = regions
        .iter()
        .map(|r| RegionPerformanceRow {
            region_name: r.name.clone(),
            completed: 0,
            in_progress: 0,
            not_started: 0,
            total: 0,
        })
        .collect();
    let index: HashMap<&str, usize> = regions
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id.as_str(), i))
        .collect();

    for o in orders.iter().filter(|o| in_range(o, range)) {
        let Some(&i) = index.get(o.region_id.as_str()) else {
            continue;
        };
        let row = &mut rows[i];
        row.total += 1;
        match o.status {
            Status::Completed => row.completed += 1,
            Status::InProgress => row.in_progress += 1,
            Status::NotStarted => row.not_started += 1,
        }
    }
    rows
}

/// Issued/completed counts per calendar month over the trailing 12 months.
///
/// Index 0 is the month 11 months before the anchor month, index 11 the
/// anchor month itself. Records issued outside the window are silently
/// excluded from this projection.
pub fn monthly_progress(
    orders: &[WorkOrder],
    anchor: NaiveDate,
    range: Option<&DateRange>,
) -> Vec<MonthlyProgressRow> {
    let mut rows: Vec<MonthlyProgressRow> = (0..12)
        .map(|i| MonthlyProgressRow {
            month: month_label(month_floor_back(anchor, 11 - i)),
            allotted: 0,
            completed: 0,
        })
        .collect();

    for o in orders.iter().filter(|o| in_range(o, range)) {
        let diff = months_between(anchor, o.date_issued);
        if !(0..12).contains(&diff) {
            continue;
        }
        let row = &mut rows[(11 - diff) as usize];
        row.allotted += 1;
        if o.status == Status::Completed {
            row.completed += 1;
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::REGIONS;
    use crate::types::Priority;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn order(id: &str, status: Status, issued: NaiveDate, region: &str) -> WorkOrder {
        let completed = status == Status::Completed;
        WorkOrder {
            id: id.to_string(),
            title: format!("Road Repair - {id}"),
            description: "Test order".to_string(),
            status,
            date_issued: issued,
            due_date: issued + chrono::Days::new(30),
            date_completed: completed.then(|| issued + chrono::Days::new(20)),
            region_id: region.to_string(),
            vendor_id: "v1".to_string(),
            budget: 100_000,
            actual_cost: completed.then_some(90_000),
            amount: 200_000,
            tags: vec!["repair".to_string()],
            location: None,
            priority: Priority::Medium,
        }
    }

    fn fixture() -> Vec<WorkOrder> {
        vec![
            order("GP/2425/0001", Status::Completed, d(2024, 3, 10), "r1"),
            order("GP/2425/0002", Status::InProgress, d(2024, 6, 5), "r1"),
            order("GP/2425/0003", Status::NotStarted, d(2024, 6, 20), "r2"),
            order("GP/2425/0004", Status::Completed, d(2025, 2, 1), "r3"),
            order("GP/2425/0005", Status::NotStarted, d(2023, 12, 1), "r3"),
        ]
    }

    #[test]
    fn overview_counts_statuses_and_overdue() {
        let orders = fixture();
        let stats = overview_stats(&orders, None, d(2025, 2, 15));
        assert_eq!(stats.total_work_orders, 5);
        assert_eq!(stats.completed_work_orders, 2);
        assert_eq!(stats.in_progress_work_orders, 1);
        assert_eq!(stats.not_started_work_orders, 2);
        // Orders 2, 3 and 5 are past due and not completed; order 4 is due
        // 2025-03-03, still in the future.
        assert_eq!(stats.overdue_work_orders, 3);
        assert_eq!(stats.total_budget, 500_000);
        assert_eq!(stats.total_spent, 180_000);
    }

    #[test]
    fn overview_respects_date_range() {
        let orders = fixture();
        let range = DateRange {
            start: Some(d(2024, 6, 1)),
            end: Some(d(2024, 6, 30)),
        };
        let stats = overview_stats(&orders, Some(&range), d(2025, 2, 15));
        assert_eq!(stats.total_work_orders, 2);
        assert_eq!(stats.completed_work_orders, 0);
    }

    #[test]
    fn region_rows_cover_every_region_and_sum_to_total() {
        let orders = fixture();
        let rows = region_performance(&orders, &REGIONS, None);
        assert_eq!(rows.len(), REGIONS.len());
        let total: usize = rows.iter().map(|r| r.total).sum();
        assert_eq!(total, orders.len());
        let by_status: usize = rows
            .iter()
            .map(|r| r.completed + r.in_progress + r.not_started)
            .sum();
        assert_eq!(by_status, orders.len());
        // Zero-record regions are present, not omitted.
        let daund = rows.iter().find(|r| r.region_name == "Daund").unwrap();
        assert_eq!(daund.total, 0);
        assert_eq!(daund.completed, 0);
    }

    #[test]
    fn region_rows_keep_reference_order() {
        let rows = region_performance(&fixture(), &REGIONS, None);
        assert_eq!(rows[0].region_name, "Pune City");
        assert_eq!(rows[1].region_name, "Pimpri-Chinchwad");
        assert_eq!(rows[13].region_name, "Daund");
    }

    #[test]
    fn monthly_buckets_are_anchored_and_windowed() {
        let orders = fixture();
        let rows = monthly_progress(&orders, d(2025, 2, 15), None);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].month, "Mar 2024");
        assert_eq!(rows[11].month, "Feb 2025");
        // 2024-03-10 lands in the oldest bucket, 2025-02-01 in the newest.
        assert_eq!(rows[0].allotted, 1);
        assert_eq!(rows[0].completed, 1);
        assert_eq!(rows[11].allotted, 1);
        assert_eq!(rows[11].completed, 1);
        // Both June issues share one bucket; the 2023-12 record is outside
        // the window and silently dropped.
        let june = rows.iter().find(|r| r.month == "Jun 2024").unwrap();
        assert_eq!(june.allotted, 2);
        assert_eq!(june.completed, 0);
        let issued: usize = rows.iter().map(|r| r.allotted).sum();
        assert_eq!(issued, 4);
    }
}
