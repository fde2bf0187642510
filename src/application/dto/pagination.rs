use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn is_descending(&self) -> bool {
        matches!(self, SortOrder::Desc)
    }
}

/// The query-parameter shape shared by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

impl ListParams {
    /// Page clamped to 1-based, limit defaulted and capped.
    pub fn normalized(&self) -> (u32, u32) {
        let page = self.page.max(1);
        let limit = if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit.min(MAX_LIMIT)
        };
        (page, limit)
    }

    pub fn offset(&self) -> u64 {
        let (page, limit) = self.normalized();
        u64::from(page - 1) * u64::from(limit)
    }
}

/// An empty or literal `"all"` filter value means "no constraint".
pub fn active_filter(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if total == 0 || limit == 0 {
            0
        } else {
            ((total - 1) / u64::from(limit) + 1) as u32
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceil_of_total_over_limit() {
        assert_eq!(Page::<u8>::new(vec![], 0, 1, 20).total_pages, 0);
        assert_eq!(Page::<u8>::new(vec![], 1, 1, 20).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], 20, 1, 20).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], 21, 1, 20).total_pages, 2);
        assert_eq!(Page::<u8>::new(vec![], 100, 1, 7).total_pages, 15);
    }

    #[test]
    fn params_normalize_page_and_limit() {
        let params = ListParams {
            page: 0,
            limit: 0,
            ..Default::default()
        };
        assert_eq!(params.normalized(), (1, DEFAULT_LIMIT));
        assert_eq!(params.offset(), 0);

        let params = ListParams {
            page: 3,
            limit: 500,
            ..Default::default()
        };
        assert_eq!(params.normalized(), (3, MAX_LIMIT));
        assert_eq!(params.offset(), 200);
    }

    #[test]
    fn all_and_empty_filter_values_mean_no_constraint() {
        assert_eq!(active_filter(None), None);
        assert_eq!(active_filter(Some("".into())), None);
        assert_eq!(active_filter(Some("   ".into())), None);
        assert_eq!(active_filter(Some("all".into())), None);
        assert_eq!(active_filter(Some("All".into())), None);
        assert_eq!(active_filter(Some("ALL".into())), None);
        assert_eq!(active_filter(Some("berlin".into())), Some("berlin".into()));
        assert_eq!(active_filter(Some(" berlin ".into())), Some("berlin".into()));
    }
}
