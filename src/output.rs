// Export surface: CSV and JSON files plus console table previews.
//
// CSV quoting (fields containing commas, quotes, or newlines are wrapped and
// embedded quotes doubled) is handled by the `csv` writer. Exporting an
// empty row set is a no-op rather than producing an empty file.
use crate::error::ReportError;
use crate::types::{Region, Vendor, WorkOrder, WorkOrderExportRow};
use crate::util::format_int;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

/// Serialize rows to a CSV file. Returns `false` without touching the
/// filesystem when `rows` is empty.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<bool, ReportError> {
    if rows.is_empty() {
        return Ok(false);
    }
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(true)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ReportError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// `prefix_YYYY-MM-DD`, the conventional base name for downloadable exports.
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}", prefix, date.format("%Y-%m-%d"))
}

/// Flatten work orders for export, resolving region and vendor names from
/// the reference sets.
///
/// An id missing from the sets is a hard error here: the "Unknown Region"
/// fallback is a presentation-layer default and has no place in the core.
pub fn export_rows(
    orders: &[WorkOrder],
    regions: &[Region],
    vendors: &[Vendor],
) -> Result<Vec<WorkOrderExportRow>, ReportError> {
    let region_name = |order: &WorkOrder| {
        regions
            .iter()
            .find(|r| r.id == order.region_id)
            .map(|r| r.name.clone())
            .ok_or_else(|| ReportError::UnknownReference {
                work_order: order.id.clone(),
                kind: "region",
                id: order.region_id.clone(),
            })
    };
    let vendor_name = |order: &WorkOrder| {
        vendors
            .iter()
            .find(|v| v.id == order.vendor_id)
            .map(|v| v.name.clone())
            .ok_or_else(|| ReportError::UnknownReference {
                work_order: order.id.clone(),
                kind: "vendor",
                id: order.vendor_id.clone(),
            })
    };

    orders
        .iter()
        .map(|o| {
            Ok(WorkOrderExportRow {
                id: o.id.clone(),
                title: o.title.clone(),
                status: o.status.as_str().to_string(),
                priority: o.priority.as_str().to_string(),
                region: region_name(o)?,
                vendor: vendor_name(o)?,
                date_issued: o.date_issued.format("%Y-%m-%d").to_string(),
                due_date: o.due_date.format("%Y-%m-%d").to_string(),
                date_completed: o
                    .date_completed
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                budget: format_int(o.budget),
                location: o
                    .location
                    .as_ref()
                    .map(|l| l.address.clone())
                    .unwrap_or_default(),
            })
        })
        .collect()
}

/// Export a work-order selection as `<dir>/<base>.csv`.
///
/// Returns the written path, or `None` when there was nothing to export.
pub fn export_work_orders(
    dir: &Path,
    base: &str,
    orders: &[WorkOrder],
    regions: &[Region],
    vendors: &[Vendor],
) -> Result<Option<PathBuf>, ReportError> {
    let rows = export_rows(orders, regions, vendors)?;
    if rows.is_empty() {
        return Ok(None);
    }
    let path = dir.join(format!("{base}.csv"));
    write_csv(&path, &rows)?;
    Ok(Some(path))
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{REGIONS, VENDORS};
    use crate::types::{Priority, Status};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn order(seq: usize, title: &str) -> WorkOrder {
        WorkOrder {
            id: format!("GP/2425/{seq:04}"),
            title: title.to_string(),
            description: "Test order".to_string(),
            status: Status::Completed,
            date_issued: d(2024, 6, 1),
            due_date: d(2024, 7, 15),
            date_completed: Some(d(2024, 6, 25)),
            region_id: "r1".to_string(),
            vendor_id: "v2".to_string(),
            budget: 1_234_567,
            actual_cost: Some(1_000_000),
            amount: 2_000_000,
            tags: vec!["repair".to_string()],
            location: None,
            priority: Priority::High,
        }
    }

    #[test]
    fn empty_export_produces_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_work_orders(dir.path(), "work_orders", &[], &REGIONS, &VENDORS)
            .unwrap();
        assert!(written.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let rows: Vec<WorkOrderExportRow> = Vec::new();
        let path = dir.path().join("empty.csv");
        assert!(!write_csv(&path, &rows).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn export_resolves_names_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let orders = vec![order(1, "Road Repair - 1"), order(2, "Bridge, \"Main\" Span")];
        let path = export_work_orders(dir.path(), "work_orders", &orders, &REGIONS, &VENDORS)
            .unwrap()
            .expect("file written");
        assert_eq!(path.file_name().unwrap(), "work_orders.csv");

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> =
            rdr.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][4], "Pune City");
        assert_eq!(&records[0][5], "City Builders");
        assert_eq!(&records[0][9], "1,234,567");
        // The quoted title with comma and doubled quotes survives a re-read.
        assert_eq!(&records[1][1], "Bridge, \"Main\" Span");
    }

    #[test]
    fn unknown_reference_is_an_error_not_a_placeholder() {
        let mut bad = order(1, "Road Repair - 1");
        bad.region_id = "r99".to_string();
        let err = export_rows(&[bad], &REGIONS, &VENDORS).unwrap_err();
        assert!(matches!(err, ReportError::UnknownReference { kind: "region", .. }));
    }

    #[test]
    fn export_filename_is_date_stamped() {
        assert_eq!(
            export_filename("work_orders", d(2025, 2, 15)),
            "work_orders_2025-02-15"
        );
    }
}
