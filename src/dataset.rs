// Owned data snapshot separating data ownership from query execution.
//
// The generator hands out a fresh random collection on every call, so two
// sequential reads straight off it can disagree. `Dataset` generates once
// and serves every projection and query from that single snapshot;
// regeneration is an explicit operation, never a side effect of a read.
use crate::generator::{self, GenerationReport, GeneratorConfig};
use crate::query::{self, Filter, FilterOptions, QueryPage};
use crate::reports;
use crate::trend::{self, MonthlyTrends};
use crate::error::ReportError;
use crate::types::{
    DateRange, MonthlyProgressRow, OverviewStats, Region, RegionPerformanceRow, Vendor, WorkOrder,
};
use chrono::NaiveDate;
use rand::Rng;

/// Overview numbers and their month-over-month trends, computed together so
/// the cache holds one consistent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub stats: OverviewStats,
    pub trends: MonthlyTrends,
}

pub struct Dataset {
    orders: Vec<WorkOrder>,
    regions: Vec<Region>,
    vendors: Vec<Vendor>,
    /// Anchor date for overdue checks and month bucketing; injected rather
    /// than read from the wall clock so results are reproducible.
    today: NaiveDate,
    report: GenerationReport,
}

impl Dataset {
    /// Generate one snapshot. The generator window end doubles as "today".
    pub fn generate(config: &GeneratorConfig, rng: &mut impl Rng) -> Self {
        let (orders, report) = generator::generate(config, rng);
        Dataset {
            orders,
            regions: generator::REGIONS.clone(),
            vendors: generator::VENDORS.clone(),
            today: config.window_end,
            report,
        }
    }

    /// Build a dataset from an existing collection, e.g. in tests.
    pub fn from_orders(orders: Vec<WorkOrder>, today: NaiveDate) -> Self {
        let regions = generator::REGIONS.clone();
        let vendors = generator::VENDORS.clone();
        let violations = generator::verify_references(&orders, &regions, &vendors);
        let count = |s| orders.iter().filter(|o| o.status == s).count();
        let report = GenerationReport {
            generated: orders.len(),
            completed: count(crate::types::Status::Completed),
            in_progress: count(crate::types::Status::InProgress),
            not_started: count(crate::types::Status::NotStarted),
            integrity_violations: violations,
        };
        Dataset {
            orders,
            regions,
            vendors,
            today,
            report,
        }
    }

    /// Swap in a freshly generated collection. The only way the snapshot
    /// ever changes.
    pub fn regenerate(&mut self, config: &GeneratorConfig, rng: &mut impl Rng) {
        let (orders, report) = generator::generate(config, rng);
        self.orders = orders;
        self.report = report;
        self.today = config.window_end;
    }

    pub fn orders(&self) -> &[WorkOrder] {
        &self.orders
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn generation_report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn overview(&self, range: Option<&DateRange>) -> OverviewStats {
        reports::overview_stats(&self.orders, range, self.today)
    }

    pub fn region_performance(&self, range: Option<&DateRange>) -> Vec<RegionPerformanceRow> {
        reports::region_performance(&self.orders, &self.regions, range)
    }

    pub fn monthly_progress(&self, range: Option<&DateRange>) -> Vec<MonthlyProgressRow> {
        reports::monthly_progress(&self.orders, self.today, range)
    }

    pub fn month_over_month(&self) -> MonthlyTrends {
        trend::month_over_month(&self.orders, self.today)
    }

    pub fn dashboard(&self, range: Option<&DateRange>) -> DashboardSnapshot {
        DashboardSnapshot {
            stats: self.overview(range),
            trends: self.month_over_month(),
        }
    }

    pub fn query(&self, filter: &Filter) -> Result<QueryPage, ReportError> {
        query::query(&self.orders, filter)
    }

    pub fn query_options(&self, opts: &FilterOptions) -> Result<QueryPage, ReportError> {
        query::query_options(&self.orders, opts)
    }
}
