use crate::error::SearchError;

pub const ITEMS_PER_PAGE: usize = 8;
pub const MAX_VISIBLE_PAGES: usize = 5;

pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Rejects pages outside `1..=total`. An empty result has one (empty) page.
pub fn check_page(page: usize, total: usize) -> Result<(), SearchError> {
    let last = total.max(1);
    if page == 0 || page > last {
        return Err(SearchError::Validation(format!(
            "page {page} is out of range; choose a page from 1 to {last}"
        )));
    }
    Ok(())
}

/// 1-based page of `items`; pages past the end are empty.
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if page == 0 || start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Page numbers to offer around `current`, at most [`MAX_VISIBLE_PAGES`]
/// wide and clamped to `1..=total`.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let span = MAX_VISIBLE_PAGES - 1;
    let mut start = current.saturating_sub(2).max(1);
    let end = total.min(start + span);
    if end.saturating_sub(start) < span {
        start = end.saturating_sub(span).max(1);
    }
    (start..=end).collect()
}
