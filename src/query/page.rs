//! Pure pagination arithmetic shared by the pagination control and the
//! views that drive it.

/// Number of page links for a collection of `total` records.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
	if page_size == 0 {
		return 0;
	}
	total.div_ceil(page_size)
}

/// Clamp a requested page into the valid range. An empty collection
/// keeps the cursor on page 1.
pub fn clamp_page(target: u64, total_pages: u64) -> u64 {
	target.clamp(1, total_pages.max(1))
}

/// Target of the "previous" action; a no-op on page 1.
pub fn previous_page(page: u64) -> u64 {
	page.saturating_sub(1).max(1)
}

/// Target of the "next" action; a no-op on the last page.
pub fn next_page(page: u64, total_pages: u64) -> u64 {
	if page < total_pages { page + 1 } else { page }
}
