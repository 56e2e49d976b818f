// Entry point and high-level CLI flow.
//
// Console driver over the reporting core:
// - Option [1] generates a fresh work-order dataset, printing diagnostics.
// - Option [2] shows the dashboard overview with month-over-month trends,
//   served from a 5-minute cache.
// - Option [3] exports the region, monthly and work-order reports to files.
// - Option [4] runs an interactive search over the paginated table.
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use workorder_report::cache::{cache_key, StatsCache};
use workorder_report::dataset::{DashboardSnapshot, Dataset};
use workorder_report::generator::GeneratorConfig;
use workorder_report::output;
use workorder_report::query::FilterOptions;
use workorder_report::trend::MetricTrend;
use workorder_report::types::DateRange;
use workorder_report::util::{format_int, format_number, pct};

// Simple in-memory app state so we generate the dataset once but can run
// reports and queries many times in a single session.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        dataset: None,
        stats_cache: StatsCache::with_default_ttl(),
    })
});

struct AppState {
    dataset: Option<Dataset>,
    stats_cache: StatsCache<DashboardSnapshot>,
}

/// Read a single line of input after printing the common "Enter choice:"
/// prompt.
fn read_choice() -> String {
    prompt("Enter choice: ")
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Handle option [1]: generate a fresh dataset and swap it in.
fn handle_generate() {
    let config = GeneratorConfig::default();
    let dataset = Dataset::generate(&config, &mut rand::thread_rng());
    let report = dataset.generation_report();
    println!(
        "Generated {} work orders ({} completed, {} in progress, {} not started)",
        format_int(report.generated as i64),
        format_int(report.completed as i64),
        format_int(report.in_progress as i64),
        format_int(report.not_started as i64)
    );
    if !report.integrity_violations.is_empty() {
        println!(
            "Warning: {} reference integrity violations.",
            format_int(report.integrity_violations.len() as i64)
        );
    }
    println!("");
    let mut state = APP_STATE.lock().unwrap();
    state.dataset = Some(dataset);
    state.stats_cache.invalidate();
}

fn trend_line(label: &str, t: &MetricTrend) -> String {
    let marker = if t.is_favorable() { "good" } else { "bad" };
    format!(
        "{:<13} {:>4}%  vs last month ({})",
        label,
        format!("{:+}", t.change_percent),
        marker
    )
}

/// Handle option [2]: dashboard overview plus trends, cached for 5 minutes.
fn handle_dashboard() {
    let mut guard = APP_STATE.lock().unwrap();
    let AppState {
        dataset,
        stats_cache,
    } = &mut *guard;
    let Some(dataset) = dataset.as_ref() else {
        println!("Error: No dataset. Please generate one first (option 1).\n");
        return;
    };

    let range: Option<DateRange> = None;
    let key = cache_key(&range);
    let now = Instant::now();
    let snapshot = match stats_cache.get(key, now) {
        Some(cached) => cached,
        None => {
            let fresh = dataset.dashboard(range.as_ref());
            stats_cache.insert(key, fresh.clone(), now);
            fresh
        }
    };

    let stats = &snapshot.stats;
    println!("Overview (as of {}):", dataset.today());
    println!("  Total work orders: {}", format_int(stats.total_work_orders as i64));
    println!("  Not started:       {}", format_int(stats.not_started_work_orders as i64));
    println!("  In progress:       {}", format_int(stats.in_progress_work_orders as i64));
    println!("  Completed:         {}", format_int(stats.completed_work_orders as i64));
    println!("  Overdue:           {}", format_int(stats.overdue_work_orders as i64));
    println!("  Total budget:      {}", format_int(stats.total_budget));
    println!("  Total spent:       {}", format_int(stats.total_spent));
    println!(
        "  Completion rate:   {}%",
        format_number(
            pct(stats.completed_work_orders, stats.total_work_orders),
            1
        )
    );
    println!("");
    println!("  {}", trend_line("Total", &snapshot.trends.total));
    println!("  {}", trend_line("Completed", &snapshot.trends.completed));
    println!("  {}", trend_line("In progress", &snapshot.trends.in_progress));
    println!("  {}", trend_line("Not started", &snapshot.trends.not_started));
    println!("");
}

/// Handle option [3]: write the report files and print previews.
fn handle_reports() {
    let state = APP_STATE.lock().unwrap();
    let Some(dataset) = state.dataset.as_ref() else {
        println!("Error: No dataset. Please generate one first (option 1).\n");
        return;
    };

    println!("Generating reports...");
    println!("Outputs saved to individual files...\n");

    let regions = dataset.region_performance(None);
    let file1 = "region_performance.csv";
    if let Err(e) = output::write_csv(Path::new(file1), &regions) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 1: Region Performance\n");
    output::preview_table_rows(&regions, 4);
    println!("(Full table exported to {})\n", file1);

    let monthly = dataset.monthly_progress(None);
    let file2 = "monthly_progress.csv";
    if let Err(e) = output::write_csv(Path::new(file2), &monthly) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 2: Monthly Progress (trailing 12 months)\n");
    output::preview_table_rows(&monthly, 4);
    println!("(Full table exported to {})\n", file2);

    let stats = dataset.overview(None);
    if let Err(e) = output::write_json(Path::new("overview_stats.json"), &stats) {
        eprintln!("Write error: {}", e);
    }
    println!("Overview stats written to overview_stats.json");

    let base = output::export_filename("work_orders", dataset.today());
    match output::export_work_orders(
        Path::new("."),
        &base,
        dataset.orders(),
        dataset.regions(),
        dataset.vendors(),
    ) {
        Ok(Some(path)) => println!("Work orders exported to {}\n", path.display()),
        Ok(None) => println!("No work orders to export.\n"),
        Err(e) => eprintln!("Write error: {}\n", e),
    }
}

/// Handle option [4]: free-text search over the table, first page of 10.
fn handle_search() {
    let state = APP_STATE.lock().unwrap();
    let Some(dataset) = state.dataset.as_ref() else {
        println!("Error: No dataset. Please generate one first (option 1).\n");
        return;
    };

    let term = prompt("Search term: ");
    let opts = FilterOptions {
        search: (!term.is_empty()).then(|| term.clone()),
        page: Some(1),
        limit: Some(10),
        ..FilterOptions::default()
    };
    match dataset.query_options(&opts) {
        Ok(page) => {
            println!(
                "\n{} matching work orders (showing up to 10):\n",
                format_int(page.total_count as i64)
            );
            match output::export_rows(&page.items, dataset.regions(), dataset.vendors()) {
                Ok(rows) => output::preview_table_rows(&rows, 10),
                Err(e) => eprintln!("Error: {}\n", e),
            }
        }
        Err(e) => eprintln!("Error: {}\n", e),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    loop {
        println!("Work Order Reports:");
        println!("[1] Generate dataset");
        println!("[2] Dashboard overview");
        println!("[3] Export reports");
        println!("[4] Search work orders");
        println!("[0] Exit\n");
        match read_choice().as_str() {
            "1" => handle_generate(),
            "2" => handle_dashboard(),
            "3" => handle_reports(),
            "4" => handle_search(),
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 0-4.\n");
            }
        }
    }
}
