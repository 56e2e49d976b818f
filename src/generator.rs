// Mock work-order generator.
//
// Stands in for the real data pipeline: every call produces a fresh
// pseudo-random collection whose *shape* is fixed (field constraints, window,
// reference sets) while the contents vary. Callers that need a stable view
// across several reads must hold one generated collection (see `dataset`).
use crate::types::{Location, Priority, Region, RegionKind, Status, Vendor, WorkOrder};
use chrono::{Days, Months, NaiveDate};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

const SAMPLE_TITLES: [&str; 10] = [
    "Road Repair",
    "Water Pipeline Installation",
    "Streetlight Maintenance",
    "Drainage System Cleaning",
    "Bridge Maintenance",
    "Public Park Development",
    "Traffic Signal Installation",
    "Footpath Construction",
    "Public Toilet Construction",
    "Government Building Renovation",
];

const TAG_POOL: [&str; 6] = [
    "repair",
    "maintenance",
    "construction",
    "installation",
    "development",
    "renovation",
];

fn region(id: &str, name: &str, kind: RegionKind) -> Region {
    Region {
        id: id.to_string(),
        name: name.to_string(),
        kind,
    }
}

/// Fixed region reference set: the district's two cities and twelve talukas.
pub static REGIONS: Lazy<Vec<Region>> = Lazy::new(|| {
    vec![
        region("r1", "Pune City", RegionKind::City),
        region("r2", "Pimpri-Chinchwad", RegionKind::City),
        region("r3", "Haveli", RegionKind::Taluka),
        region("r4", "Mulshi", RegionKind::Taluka),
        region("r5", "Maval", RegionKind::Taluka),
        region("r6", "Bhor", RegionKind::Taluka),
        region("r7", "Velhe", RegionKind::Taluka),
        region("r8", "Khed", RegionKind::Taluka),
        region("r9", "Junnar", RegionKind::Taluka),
        region("r10", "Ambegaon", RegionKind::Taluka),
        region("r11", "Shirur", RegionKind::Taluka),
        region("r12", "Baramati", RegionKind::Taluka),
        region("r13", "Indapur", RegionKind::Taluka),
        region("r14", "Daund", RegionKind::Taluka),
    ]
});

fn vendor(id: &str, name: &str, person: &str, number: &str, email: &str) -> Vendor {
    Vendor {
        id: id.to_string(),
        name: name.to_string(),
        contact_person: person.to_string(),
        contact_number: number.to_string(),
        email: email.to_string(),
    }
}

/// Fixed vendor reference set.
pub static VENDORS: Lazy<Vec<Vendor>> = Lazy::new(|| {
    vec![
        vendor(
            "v1",
            "Infra Solutions Pvt Ltd",
            "Rajesh Kumar",
            "9876543210",
            "rajesh@infrasolutions.com",
        ),
        vendor(
            "v2",
            "City Builders",
            "Amit Patil",
            "8765432109",
            "amit@citybuilders.com",
        ),
        vendor(
            "v3",
            "Road Works Corp",
            "Sunil Sharma",
            "7654321098",
            "sunil@roadworks.com",
        ),
        vendor(
            "v4",
            "Water Systems Ltd",
            "Priya Verma",
            "6543210987",
            "priya@watersystems.com",
        ),
        vendor(
            "v5",
            "Electric Grid Maintenance",
            "Ramesh Joshi",
            "5432109876",
            "ramesh@egm.com",
        ),
    ]
});

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub count: usize,
    /// End of the issue-date window; doubles as the "today" anchor downstream.
    pub window_end: NaiveDate,
    pub window_months: u32,
    /// Prefix and fiscal-year segment of generated ids, e.g. `GP/2425`.
    pub id_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            count: 246,
            window_end: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap_or(NaiveDate::MIN),
            window_months: 12,
            id_prefix: "GP/2425".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn window_start(&self) -> NaiveDate {
        self.window_end
            .checked_sub_months(Months::new(self.window_months))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// A record referencing a region or vendor id absent from the fixed sets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("work order {work_order} references unknown {kind} `{id}`")]
pub struct IntegrityViolation {
    pub work_order: String,
    pub kind: &'static str,
    pub id: String,
}

/// Outcome summary of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub generated: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub integrity_violations: Vec<IntegrityViolation>,
}

/// Generate `config.count` work orders with issue dates drawn uniformly from
/// the trailing window.
///
/// The report carries status counts and the result of a reference-integrity
/// check over the generated records. Violations are also logged as warnings;
/// they are never papered over with an "Unknown" placeholder here.
pub fn generate(config: &GeneratorConfig, rng: &mut impl Rng) -> (Vec<WorkOrder>, GenerationReport) {
    let window_start = config.window_start();
    let span_days = (config.window_end - window_start).num_days().max(0) as u64;

    let mut orders = Vec::with_capacity(config.count);
    for seq in 1..=config.count {
        let status = Status::ALL[rng.gen_range(0..Status::ALL.len())];
        let priority = Priority::ALL[rng.gen_range(0..Priority::ALL.len())];

        let date_issued = window_start
            .checked_add_days(Days::new(rng.gen_range(0..=span_days)))
            .unwrap_or(window_start);
        let due_date = date_issued
            .checked_add_days(Days::new(rng.gen_range(30..=90)))
            .unwrap_or(date_issued);
        // Mock-layer gap carried over from the reference data: a completion
        // date may land after the anchor "today".
        let date_completed = (status == Status::Completed).then(|| {
            date_issued
                .checked_add_days(Days::new(rng.gen_range(15..=45)))
                .unwrap_or(date_issued)
        });

        let region_id = REGIONS[rng.gen_range(0..REGIONS.len())].id.clone();
        let vendor_id = VENDORS[rng.gen_range(0..VENDORS.len())].id.clone();

        let title_stem = SAMPLE_TITLES[rng.gen_range(0..SAMPLE_TITLES.len())];
        // `choose_multiple` draws without replacement, so tags stay distinct.
        let tag_count = rng.gen_range(1..=3);
        let tags: Vec<String> = TAG_POOL
            .choose_multiple(rng, tag_count)
            .map(|t| t.to_string())
            .collect();

        let actual_cost = (status == Status::Completed).then(|| rng.gen_range(100_000..600_000));

        orders.push(WorkOrder {
            id: format!("{}/{:04}", config.id_prefix, seq),
            title: format!("{} - {}", title_stem, seq),
            description: format!(
                "Detailed description for work order {}. This work includes necessary repairs and maintenance.",
                seq
            ),
            status,
            date_issued,
            due_date,
            date_completed,
            region_id,
            vendor_id,
            budget: rng.gen_range(100_000..600_000),
            actual_cost,
            amount: rng.gen_range(200_000..1_200_000),
            tags,
            location: Some(Location {
                address: format!(
                    "{} Main St, Pune, Maharashtra",
                    rng.gen_range(1..=1000)
                ),
                latitude: 18.52 + rng.gen_range(-0.05..0.05),
                longitude: 73.85 + rng.gen_range(-0.05..0.05),
            }),
            priority,
        });
    }

    let integrity_violations = verify_references(&orders, &REGIONS, &VENDORS);
    for v in &integrity_violations {
        warn!(work_order = %v.work_order, kind = v.kind, id = %v.id, "reference integrity violation");
    }

    let report = GenerationReport {
        generated: orders.len(),
        completed: orders.iter().filter(|o| o.status == Status::Completed).count(),
        in_progress: orders.iter().filter(|o| o.status == Status::InProgress).count(),
        not_started: orders.iter().filter(|o| o.status == Status::NotStarted).count(),
        integrity_violations,
    };
    (orders, report)
}

/// Check every record's region and vendor id against the reference sets.
pub fn verify_references(
    orders: &[WorkOrder],
    regions: &[Region],
    vendors: &[Vendor],
) -> Vec<IntegrityViolation> {
    let region_ids: HashSet<&str> = regions.iter().map(|r| r.id.as_str()).collect();
    let vendor_ids: HashSet<&str> = vendors.iter().map(|v| v.id.as_str()).collect();

    let mut violations = Vec::new();
    for o in orders {
        if !region_ids.contains(o.region_id.as_str()) {
            violations.push(IntegrityViolation {
                work_order: o.id.clone(),
                kind: "region",
                id: o.region_id.clone(),
            });
        }
        if !vendor_ids.contains(o.vendor_id.as_str()) {
            violations.push(IntegrityViolation {
                work_order: o.id.clone(),
                kind: "vendor",
                id: o.vendor_id.clone(),
            });
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn generate_seeded(seed: u64) -> (Vec<WorkOrder>, GenerationReport) {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(&GeneratorConfig::default(), &mut rng)
    }

    #[test]
    fn produces_exact_count_with_sequential_ids() {
        let (orders, report) = generate_seeded(7);
        assert_eq!(orders.len(), 246);
        assert_eq!(report.generated, 246);
        assert_eq!(orders[0].id, "GP/2425/0001");
        assert_eq!(orders[245].id, "GP/2425/0246");
    }

    #[test]
    fn date_invariants_hold_for_every_record() {
        let config = GeneratorConfig::default();
        let (orders, _) = generate_seeded(42);
        for o in &orders {
            assert!(o.date_issued >= config.window_start());
            assert!(o.date_issued <= config.window_end);
            assert!(o.due_date >= o.date_issued);
            let offset = (o.due_date - o.date_issued).num_days();
            assert!((30..=90).contains(&offset), "due offset {offset}");
            match o.status {
                Status::Completed => {
                    let done = o.date_completed.expect("completed order without date");
                    assert!(done >= o.date_issued);
                    let gap = (done - o.date_issued).num_days();
                    assert!((15..=45).contains(&gap), "completion offset {gap}");
                    assert!(o.actual_cost.is_some());
                }
                _ => {
                    assert!(o.date_completed.is_none());
                    assert!(o.actual_cost.is_none());
                }
            }
        }
    }

    #[test]
    fn tags_are_distinct_and_bounded() {
        let (orders, _) = generate_seeded(11);
        for o in &orders {
            assert!((1..=3).contains(&o.tags.len()));
            let unique: HashSet<&String> = o.tags.iter().collect();
            assert_eq!(unique.len(), o.tags.len(), "duplicate tag in {:?}", o.tags);
        }
    }

    #[test]
    fn report_status_counts_sum_to_total() {
        let (_, report) = generate_seeded(3);
        assert_eq!(
            report.completed + report.in_progress + report.not_started,
            report.generated
        );
    }

    #[test]
    fn reference_set_draws_pass_integrity_check() {
        let (_, report) = generate_seeded(5);
        assert!(report.integrity_violations.is_empty());
    }

    #[test]
    fn verify_references_flags_foreign_ids() {
        let (mut orders, _) = generate_seeded(9);
        orders[0].region_id = "r99".to_string();
        orders[1].vendor_id = "v99".to_string();
        let violations = verify_references(&orders, &REGIONS, &VENDORS);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].kind, "region");
        assert_eq!(violations[0].id, "r99");
        assert_eq!(violations[1].kind, "vendor");
    }
}
