//! Free-text search, single-key sort and 1-based pagination over tenants.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::Tenant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query string accepted by the tenant listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantQuery {
    pub search: Option<String>,
    /// Dotted camelCase path such as `personalDetails.lastName`.
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantPage {
    pub items: Vec<Tenant>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Applies search, then sort, then pagination. A page past the end is empty.
pub fn run_query(
    tenants: Vec<Tenant>,
    query: &TenantQuery,
    default_page_size: usize,
) -> Result<TenantPage, serde_json::Error> {
    let mut rows = tenants
        .into_iter()
        .map(|tenant| serde_json::to_value(&tenant).map(|value| (tenant, value)))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(needle) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|needle| !needle.is_empty())
    {
        let needle = needle.to_lowercase();
        rows.retain(|(_, value)| matches_search(value, &needle));
    }

    if let Some(path) = query.sort.as_deref().filter(|path| !path.is_empty()) {
        let pointer = format!("/{}", path.replace('.', "/"));
        rows.sort_by(|(_, a), (_, b)| {
            let ordering = compare_values(a.pointer(&pointer), b.pointer(&pointer));
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let per_page = query.per_page.unwrap_or(default_page_size).max(1);
    let page = query.page.unwrap_or(1).max(1);
    let total = rows.len();
    let total_pages = total.div_ceil(per_page);
    let items = rows
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .map(|(tenant, _)| tenant)
        .collect();

    Ok(TenantPage {
        items,
        page,
        per_page,
        total,
        total_pages,
    })
}

/// Case-insensitive substring match against any scalar nested in `value`.
/// `null` never matches.
pub fn matches_search(value: &Value, needle: &str) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => flag.to_string().contains(needle),
        Value::Number(number) => number.to_string().contains(needle),
        Value::String(text) => text.to_lowercase().contains(needle),
        Value::Array(items) => items.iter().any(|item| matches_search(item, needle)),
        Value::Object(fields) => fields.values().any(|field| matches_search(field, needle)),
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}
