//! Search query normalization shared by every store backend.

/// Event queries shorter than this return nothing.
pub const MIN_EVENT_QUERY_LEN: usize = 2;

/// Default cap on artist search results.
pub const DEFAULT_ARTIST_SEARCH_LIMIT: usize = 10;

/// Default cap on event search results.
pub const DEFAULT_EVENT_SEARCH_LIMIT: usize = 8;

/// Default age, in days, of the oldest event search may return.
pub const DEFAULT_EVENT_SEARCH_LOOKBACK_DAYS: u32 = 30;

/// A whitespace-split, lowercased event search query.
///
/// Every term must match at least one searchable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms {
    terms: Vec<String>,
}

impl SearchTerms {
    /// Splits an event query into terms.
    ///
    /// Returns `None` when the query is too short to search or holds no
    /// terms.
    #[must_use]
    pub fn parse(query: &str) -> Option<Self> {
        if query.chars().count() < MIN_EVENT_QUERY_LEN {
            return None;
        }
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            None
        } else {
            Some(Self { terms })
        }
    }

    /// The lowercased terms.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Returns `true` when every term is contained in at least one field.
    #[must_use]
    pub fn matches<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        self.terms.iter().all(|term| {
            fields
                .clone()
                .into_iter()
                .any(|field| contains_ignore_case(field, term))
        })
    }
}

/// Case-insensitive substring test. `needle` must already be lowercase.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Builds an `ILIKE` pattern matching `term` anywhere, with `%`, `_` and the
/// escape character itself escaped.
#[must_use]
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
