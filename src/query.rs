use crate::params::ListParams;

pub const POST_COLUMNS: &str = "id, title, slug, excerpt, content, featured_image, reading_time, \
     status, featured, published_at, created_at, updated_at, author_id";

// Filters use the null-bind pattern: a NULL parameter disables its clause,
// so the statement text is identical for every request. $1 search pattern,
// $2 category slug, $3 tag slug, $4 featured-only flag. PUBLISHED status is
// baked in and cannot be overridden by a caller.
const LISTING_FILTER: &str = "status = 'PUBLISHED'
AND ($1::TEXT IS NULL OR title ILIKE $1 OR excerpt ILIKE $1 OR content ILIKE $1)
AND ($2::TEXT IS NULL OR id IN (
    SELECT pc.post_id FROM post_categories pc
    JOIN categories c ON c.id = pc.category_id
    WHERE c.slug = $2))
AND ($3::TEXT IS NULL OR id IN (
    SELECT pt.post_id FROM post_tags pt
    JOIN tags t ON t.id = pt.tag_id
    WHERE t.slug = $3))
AND (NOT $4::BOOL OR featured)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSort {
    Latest,
    Oldest,
    Featured,
    Popular,
}

impl PostSort {
    /// Unknown or absent values fall back to `latest`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("oldest") => Self::Oldest,
            Some("featured") => Self::Featured,
            Some("popular") => Self::Popular,
            _ => Self::Latest,
        }
    }

    // Secondary id tiebreak keeps pages deterministic when timestamps collide.
    pub fn order_clause(self) -> &'static str {
        match self {
            Self::Latest | Self::Featured => "published_at DESC, id DESC",
            Self::Oldest => "published_at ASC, id ASC",
            // Stand-in popularity metric: no engagement data exists, the
            // source ranked by reading time and so do we.
            Self::Popular => "reading_time DESC, id DESC",
        }
    }

    pub fn only_featured(self) -> bool {
        matches!(self, Self::Featured)
    }
}

impl Default for PostSort {
    fn default() -> Self {
        Self::Latest
    }
}

/// Normalized filter set for the public post listing.
#[derive(Debug, Default)]
pub struct PostFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub sort: PostSort,
}

// "all" is the UI sentinel for "no filter", same as an absent or empty slug.
fn slug_filter(raw: Option<&String>) -> Option<String> {
    raw.map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "all")
        .map(String::from)
}

impl PostFilter {
    pub fn from_params(params: &ListParams) -> Self {
        Self {
            search: params
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            category: slug_filter(params.category.as_ref()),
            tag: slug_filter(params.tag.as_ref()),
            sort: PostSort::parse(params.sort.as_deref()),
        }
    }

    // LIKE metacharacters in the search term are literals, not wildcards;
    // backslash is the default ESCAPE character in Postgres.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|s| {
            let escaped = s
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{}%", escaped)
        })
    }

    pub fn page_sql(&self) -> String {
        format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE {LISTING_FILTER} \
             ORDER BY {} LIMIT $5 OFFSET $6",
            self.sort.order_clause()
        )
    }

    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM posts WHERE {LISTING_FILTER}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(search: Option<&str>, category: Option<&str>, tag: Option<&str>, sort: Option<&str>) -> ListParams {
        ListParams {
            search: search.map(String::from),
            category: category.map(String::from),
            tag: tag.map(String::from),
            sort: sort.map(String::from),
            ..ListParams::default()
        }
    }

    #[test]
    fn unknown_sort_falls_back_to_latest() {
        assert_eq!(PostSort::parse(Some("bogus")), PostSort::Latest);
        assert_eq!(PostSort::parse(None), PostSort::Latest);
        assert_eq!(PostSort::parse(Some("oldest")), PostSort::Oldest);
        assert_eq!(PostSort::parse(Some("popular")), PostSort::Popular);
    }

    #[test]
    fn featured_sort_restricts_and_orders_by_date() {
        let sort = PostSort::parse(Some("featured"));
        assert!(sort.only_featured());
        assert_eq!(sort.order_clause(), "published_at DESC, id DESC");
    }

    #[test]
    fn all_sentinel_means_no_filter() {
        let f = PostFilter::from_params(&params(None, Some("all"), Some("all"), None));
        assert!(f.category.is_none());
        assert!(f.tag.is_none());

        let f = PostFilter::from_params(&params(None, Some("design"), Some("rust"), None));
        assert_eq!(f.category.as_deref(), Some("design"));
        assert_eq!(f.tag.as_deref(), Some("rust"));
    }

    #[test]
    fn empty_search_is_no_filter() {
        let f = PostFilter::from_params(&params(Some(""), None, None, None));
        assert!(f.search.is_none());
        assert!(f.search_pattern().is_none());

        let f = PostFilter::from_params(&params(Some("  rust  "), None, None, None));
        assert_eq!(f.search_pattern().as_deref(), Some("%rust%"));
    }

    #[test]
    fn search_wildcards_match_literally() {
        let f = PostFilter::from_params(&params(Some("100%"), None, None, None));
        assert_eq!(f.search_pattern().as_deref(), Some("%100\\%%"));

        let f = PostFilter::from_params(&params(Some("a_b"), None, None, None));
        assert_eq!(f.search_pattern().as_deref(), Some("%a\\_b%"));

        let f = PostFilter::from_params(&params(Some("c:\\tmp"), None, None, None));
        assert_eq!(f.search_pattern().as_deref(), Some("%c:\\\\tmp%"));
    }

    #[test]
    fn listing_sql_always_pins_published() {
        let f = PostFilter::from_params(&params(Some("x"), None, None, Some("popular")));
        let sql = f.page_sql();
        assert!(sql.contains("status = 'PUBLISHED'"));
        assert!(sql.contains("ORDER BY reading_time DESC, id DESC"));
        assert!(sql.contains("LIMIT $5 OFFSET $6"));
        assert!(f.count_sql().starts_with("SELECT COUNT(*)"));
    }
}
