//! # Pagination
//!
//! Board pages show a fixed-size window of the thread listing. Out-of-range
//! pages clamp to an empty slice rather than failing; nonsense page numbers
//! fall back to page 1. The pager always renders links 1..=10 regardless of
//! how many threads actually exist.

/// Threads shown per board page.
pub const PAGE_SIZE: usize = 10;

/// Number of pager links rendered on every board page.
pub const PAGER_LINKS: usize = 10;

/// Parses a page path segment. Absent, non-numeric, zero and negative values
/// all mean page 1. A number too large to parse is still a page — one far
/// past the end — not garbage, so it saturates instead of falling back.
pub fn parse_page(raw: Option<&str>) -> usize {
    let Some(raw) = raw else { return 1 };
    match raw.parse::<i64>() {
        Ok(p) if p >= 1 => p as usize,
        Err(_) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => usize::MAX,
        _ => 1,
    }
}

/// Computes the `[start, end)` window into a listing of `len` threads.
/// Both bounds clamp to `len`, so any page past the end yields an empty range.
pub fn slice_bounds(len: usize, page: usize) -> (usize, usize) {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE).min(len);
    let end = start.saturating_add(PAGE_SIZE).min(len);
    (start, end)
}

/// Convenience wrapper over [`slice_bounds`] for in-memory listings.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let (start, end) = slice_bounds(items.len(), page);
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_garbage_pages_default_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("2")), 2);
    }

    #[test]
    fn non_positive_pages_behave_like_page_one() {
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(slice_bounds(25, 0), slice_bounds(25, 1));
    }

    #[test]
    fn windows_advance_by_page_size() {
        assert_eq!(slice_bounds(25, 1), (0, 10));
        assert_eq!(slice_bounds(25, 2), (10, 20));
        assert_eq!(slice_bounds(25, 3), (20, 25));
    }

    #[test]
    fn pages_past_the_end_are_empty_not_errors() {
        assert_eq!(slice_bounds(25, 4), (25, 25));
        assert_eq!(slice_bounds(25, 999), (25, 25));
        let items: Vec<u8> = (0..25).collect();
        assert!(page_slice(&items, 999).is_empty());
    }

    #[test]
    fn numeric_overflow_is_a_far_page_not_page_one() {
        let page = parse_page(Some("99999999999999999999"));
        assert_eq!(page, usize::MAX);
        let items: Vec<u8> = (0..25).collect();
        assert!(page_slice(&items, page).is_empty());
        // Mixed junk still falls back to page 1.
        assert_eq!(parse_page(Some("12abc")), 1);
        assert_eq!(parse_page(Some("-99999999999999999999")), 1);
    }

    #[test]
    fn short_listings_fit_on_one_page() {
        let items = [1, 2, 3];
        assert_eq!(page_slice(&items, 1), &[1, 2, 3]);
        assert!(page_slice(&items, 2).is_empty());
    }
}
