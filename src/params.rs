use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 20;

fn parse_positive(raw: Option<&String>, default: i64) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Raw query-string parameters for the post listing. Numeric fields arrive
/// as strings and fall back to defaults on anything non-positive.
#[derive(Deserialize, Debug, Default)]
pub struct ListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> i64 {
        parse_positive(self.page.as_ref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        parse_positive(self.limit.as_ref(), DEFAULT_LIMIT)
    }

    // Saturates rather than overflows: an absurd page yields an offset past
    // the table, which Postgres answers with an empty page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        // ceil(total / limit) without the additive overflow a huge limit
        // would hit in `(total + limit - 1) / limit`.
        let total_pages = if total == 0 { 0 } else { (total - 1) / limit + 1 };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, limit: Option<&str>) -> ListParams {
        ListParams {
            page: page.map(String::from),
            limit: limit.map(String::from),
            ..ListParams::default()
        }
    }

    #[test]
    fn page_and_limit_default() {
        let p = params(None, None);
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn garbage_and_non_positive_fall_back() {
        assert_eq!(params(Some("abc"), Some("-5")).page(), 1);
        assert_eq!(params(Some("0"), Some("x")).limit(), 20);
    }

    #[test]
    fn offset_is_page_window() {
        let p = params(Some("3"), Some("10"));
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn pagination_math() {
        let p = Pagination::new(2, 20, 41);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next_page);
        assert!(p.has_prev_page);

        let exact = Pagination::new(2, 20, 40);
        assert_eq!(exact.total_pages, 2);
        assert!(!exact.has_next_page);
    }

    #[test]
    fn offset_saturates_on_huge_page() {
        let max = i64::MAX.to_string();
        let p = params(Some(&max), Some("20"));
        assert_eq!(p.offset(), i64::MAX);

        let p = params(Some(&max), Some(&max));
        assert_eq!(p.offset(), i64::MAX);
    }

    #[test]
    fn pagination_survives_huge_limit() {
        let p = Pagination::new(1, i64::MAX, 5);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next_page);
    }

    #[test]
    fn pagination_empty_result() {
        let p = Pagination::new(1, 20, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next_page);
        assert!(!p.has_prev_page);
    }
}
