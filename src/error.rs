use thiserror::Error;

/// Errors surfaced by the reporting core.
///
/// Empty results are never errors; an empty page with `total_count == 0` is a
/// valid outcome. These variants cover malformed caller input, broken
/// reference integrity, and I/O failures at the export boundary.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid date `{value}` for {field}: expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid pagination: page and limit must both be >= 1 (page {page}, limit {limit})")]
    InvalidPagination { page: usize, limit: usize },

    #[error("unknown sort key `{0}`")]
    UnknownSortKey(String),

    #[error("unknown sort order `{0}` (expected `asc` or `desc`)")]
    UnknownSortOrder(String),

    #[error("work order {work_order} references unknown {kind} `{id}`")]
    UnknownReference {
        work_order: String,
        kind: &'static str,
        id: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
