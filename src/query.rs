// Filter/query engine for the paginated work-order table.
//
// Two layers: `FilterOptions` is the duck-typed boundary shape with the
// legacy synonym fields (`search`/`search_term`, `region`/`region_ids`,
// single status vs list), translated once into the canonical `Filter` the
// engine actually runs. All predicates AND-compose; an omitted field is no
// constraint; a free-text match can only narrow the result, never widen it.
use crate::error::ReportError;
use crate::types::{Status, WorkOrder};
use crate::util::parse_date;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    DateIssued,
    DueDate,
    Budget,
    Amount,
    Id,
}

impl FromStr for SortKey {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date-issued" | "dateIssued" => Ok(SortKey::DateIssued),
            "due-date" | "dueDate" => Ok(SortKey::DueDate),
            "budget" => Ok(SortKey::Budget),
            "amount" => Ok(SortKey::Amount),
            "id" => Ok(SortKey::Id),
            other => Err(ReportError::UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ReportError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// 1-based page request; constructed through `new` so a zero page or limit
/// is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Result<Self, ReportError> {
        if page == 0 || limit == 0 {
            return Err(ReportError::InvalidPagination { page, limit });
        }
        Ok(PageRequest { page, limit })
    }
}

/// Canonical query descriptor: one field per concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Filter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub statuses: Option<Vec<Status>>,
    pub region_ids: Option<Vec<String>>,
    pub vendor_ids: Option<Vec<String>>,
    pub search: Option<String>,
    pub sort: Option<(SortKey, SortOrder)>,
    pub pagination: Option<PageRequest>,
}

/// Boundary shape accepted from callers, including the legacy synonym
/// fields. Collapsed into `Filter` by `Filter::from_options`; nothing past
/// that boundary ever sees the synonyms.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<Status>,
    pub statuses: Option<Vec<Status>>,
    pub region: Option<String>,
    pub region_ids: Option<Vec<String>>,
    pub vendor_ids: Option<Vec<String>>,
    pub search: Option<String>,
    pub search_term: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl Filter {
    /// Translate the duck-typed options into the canonical filter.
    ///
    /// Fails fast on malformed dates, unknown sort fields, and a zero page
    /// or limit. A status/region/vendor list that is present but empty
    /// imposes no constraint, matching the reference behavior. Pagination
    /// applies only when both `page` and `limit` are supplied.
    pub fn from_options(opts: &FilterOptions) -> Result<Filter, ReportError> {
        let start = opts
            .start_date
            .as_deref()
            .map(|s| parse_date("startDate", s))
            .transpose()?;
        let end = opts
            .end_date
            .as_deref()
            .map(|s| parse_date("endDate", s))
            .transpose()?;

        let statuses = match (&opts.statuses, opts.status) {
            (Some(list), _) if !list.is_empty() => Some(list.clone()),
            (_, Some(single)) => Some(vec![single]),
            _ => None,
        };

        let region_ids = match (&opts.region_ids, &opts.region) {
            (Some(list), _) if !list.is_empty() => Some(list.clone()),
            (_, Some(single)) => Some(vec![single.clone()]),
            _ => None,
        };
        let vendor_ids = opts.vendor_ids.clone().filter(|v| !v.is_empty());

        let search = opts
            .search
            .as_deref()
            .or(opts.search_term.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let sort = match &opts.sort_by {
            Some(key) => {
                let key = key.parse::<SortKey>()?;
                let order = match &opts.sort_order {
                    Some(o) => o.parse::<SortOrder>()?,
                    None => SortOrder::default(),
                };
                Some((key, order))
            }
            None => None,
        };

        let pagination = match (opts.page, opts.limit) {
            (Some(page), Some(limit)) => Some(PageRequest::new(page, limit)?),
            _ => None,
        };

        Ok(Filter {
            start,
            end,
            statuses,
            region_ids,
            vendor_ids,
            search,
            sort,
            pagination,
        })
    }

    fn matches(&self, order: &WorkOrder) -> bool {
        if let Some(start) = self.start {
            if order.date_issued < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if order.date_issued > end {
                return false;
            }
        }
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&order.status) {
                return false;
            }
        }
        if let Some(regions) = &self.region_ids {
            if !regions.iter().any(|r| r == &order.region_id) {
                return false;
            }
        }
        if let Some(vendors) = &self.vendor_ids {
            if !vendors.iter().any(|v| v == &order.vendor_id) {
                return false;
            }
        }
        // Search narrows: a record must pass every other predicate AND match
        // the term in id, title or description.
        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            let hit = order.id.to_lowercase().contains(&needle)
                || order.title.to_lowercase().contains(&needle)
                || order.description.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// One page of query results plus the unpaginated match count.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage {
    pub items: Vec<WorkOrder>,
    pub total_count: usize,
}

fn compare(a: &WorkOrder, b: &WorkOrder, key: SortKey) -> Ordering {
    match key {
        SortKey::DateIssued => a.date_issued.cmp(&b.date_issued),
        SortKey::DueDate => a.due_date.cmp(&b.due_date),
        SortKey::Budget => a.budget.cmp(&b.budget),
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Id => a.id.cmp(&b.id),
    }
}

/// Run the filter over a fixed collection and slice out the requested page.
///
/// `total_count` is always the full match count before pagination. A page
/// past the end of the match set yields an empty `items`, which is a valid
/// terminal result, not an error.
pub fn query(orders: &[WorkOrder], filter: &Filter) -> Result<QueryPage, ReportError> {
    let mut matched: Vec<&WorkOrder> = orders.iter().filter(|o| filter.matches(o)).collect();

    if let Some((key, order)) = filter.sort {
        // Stable sort keeps the input order among equal keys.
        matched.sort_by(|a, b| {
            let ord = compare(a, b, key);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    let total_count = matched.len();
    let items: Vec<WorkOrder> = match filter.pagination {
        Some(PageRequest { page, limit }) => {
            if page == 0 || limit == 0 {
                return Err(ReportError::InvalidPagination { page, limit });
            }
            matched
                .into_iter()
                .skip((page - 1) * limit)
                .take(limit)
                .cloned()
                .collect()
        }
        None => matched.into_iter().cloned().collect(),
    };

    Ok(QueryPage { items, total_count })
}

/// Convenience for callers still holding the boundary shape.
pub fn query_options(orders: &[WorkOrder], opts: &FilterOptions) -> Result<QueryPage, ReportError> {
    let filter = Filter::from_options(opts)?;
    query(orders, &filter)
}
