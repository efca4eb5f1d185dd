use crate::error::{AppError, Result};

/// Page size used when a caller asks for a limit of zero.
pub const DEFAULT_PULL_LIMIT: i64 = 10;

/// A validated request for one page of a conversation's history.
///
/// `cursor` is a zero-based offset counted in the traversal direction: from the oldest
/// message, or from the newest when `reverse` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub cursor: i64,
    pub limit: i64,
    pub reverse: bool,
}

/// One page of results plus its continuation.
///
/// `next_cursor` is only meaningful when `has_more` is set, and is zero otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub next_cursor: i64,
}

impl PageRequest {
    /// Validates caller-supplied paging parameters.
    ///
    /// A `limit` of zero is replaced by `default_limit`.
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` if `cursor` or `limit` is negative, or if the
    /// requested window runs past `i64::MAX`.
    pub fn new(cursor: i64, limit: i64, reverse: bool, default_limit: i64) -> Result<Self> {
        if cursor < 0 {
            return Err(AppError::InvalidArgument(format!("cursor must not be negative, got {cursor}")));
        }
        if limit < 0 {
            return Err(AppError::InvalidArgument(format!("limit must not be negative, got {limit}")));
        }
        let limit = if limit == 0 { default_limit } else { limit };

        // The lookahead entry must stay addressable too.
        if cursor.checked_add(limit).and_then(|end| end.checked_add(1)).is_none() {
            return Err(AppError::InvalidArgument("cursor and limit exceed the addressable range".to_string()));
        }

        Ok(Self { cursor, limit, reverse })
    }

    /// End of this page's window `[cursor, cursor + limit)`; also the next page's cursor.
    #[must_use]
    pub const fn window_end(&self) -> i64 {
        self.cursor + self.limit
    }

    /// End of the range to fetch from the store: the window plus one lookahead entry.
    #[must_use]
    pub const fn fetch_end(&self) -> i64 {
        self.window_end() + 1
    }

    /// Emits at most `limit` entries from a fetched range.
    ///
    /// If the range holds an entry past the window, the page reports `has_more` and
    /// continues at the window's end, regardless of how many entries were emitted.
    pub fn paginate<T>(&self, entries: impl IntoIterator<Item = T>) -> Page<T> {
        let mut items = Vec::new();
        let mut emitted: i64 = 0;
        let mut has_more = false;
        let mut next_cursor = 0;

        for entry in entries {
            if emitted + 1 > self.limit {
                has_more = true;
                next_cursor = self.window_end();
                break;
            }
            items.push(entry);
            emitted += 1;
        }

        Page { items, has_more, next_cursor }
    }
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page { items: self.items.into_iter().map(f).collect(), has_more: self.has_more, next_cursor: self.next_cursor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(cursor: i64, limit: i64) -> PageRequest {
        PageRequest::new(cursor, limit, false, DEFAULT_PULL_LIMIT).unwrap()
    }

    #[test]
    fn test_zero_limit_uses_default() {
        assert_eq!(request(0, 0).limit, DEFAULT_PULL_LIMIT);
        assert_eq!(PageRequest::new(0, 0, false, 3).unwrap().limit, 3);
    }

    #[test]
    fn test_negative_parameters_rejected() {
        assert!(matches!(PageRequest::new(-1, 10, false, DEFAULT_PULL_LIMIT), Err(AppError::InvalidArgument(_))));
        assert!(matches!(PageRequest::new(0, -5, false, DEFAULT_PULL_LIMIT), Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_overflowing_window_rejected() {
        assert!(matches!(PageRequest::new(i64::MAX - 5, 5, false, DEFAULT_PULL_LIMIT), Err(AppError::InvalidArgument(_))));
        assert!(PageRequest::new(i64::MAX - 6, 5, false, DEFAULT_PULL_LIMIT).is_ok());
    }

    #[test]
    fn test_window_bounds() {
        let req = request(20, 10);
        assert_eq!(req.window_end(), 30);
        assert_eq!(req.fetch_end(), 31);
    }

    #[test]
    fn test_paginate_with_lookahead_sets_has_more() {
        let req = request(0, 10);
        let page = req.paginate(0..11);
        assert_eq!(page.items, (0..10).collect::<Vec<_>>());
        assert!(page.has_more);
        assert_eq!(page.next_cursor, 10);
    }

    #[test]
    fn test_paginate_exact_fill_has_no_more() {
        let page = request(10, 10).paginate(10..20);
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_more);
        assert_eq!(page.next_cursor, 0);
    }

    #[test]
    fn test_paginate_short_range() {
        let page = request(20, 10).paginate(20..25);
        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_next_cursor_is_window_end_not_count() {
        // A store that hands back more than the window still only advances by `limit`.
        let page = request(5, 3).paginate(0..100);
        assert_eq!(page.items, vec![0, 1, 2]);
        assert!(page.has_more);
        assert_eq!(page.next_cursor, 8);
    }

    #[test]
    fn test_paginate_empty() {
        let page = request(0, 10).paginate(std::iter::empty::<i32>());
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_map_preserves_continuation() {
        let page = request(0, 2).paginate(0..3).map(|n| n * 10);
        assert_eq!(page.items, vec![0, 10]);
        assert!(page.has_more);
        assert_eq!(page.next_cursor, 2);
    }
}
