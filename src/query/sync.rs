//! Input-side state machine for one remote-backed list view.
//!
//! [`ListQuery`] owns the free-text search, the page number, and the
//! optional category filter, and decides when those inputs amount to a
//! new remote fetch. Text edits are debounced: only the value that
//! survives a quiet interval becomes the effective search, and any
//! effective-search or category change forces the page back to 1 so
//! the user never lands on an out-of-range page after narrowing.

use std::time::{Duration, Instant};

use crate::api::types::CompanyCategory;

/// Quiet interval a text edit must survive before it triggers a fetch.
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(500);

/// Snapshot of the inputs that parameterize one remote page fetch.
///
/// Comparing snapshots is what makes re-issuing idempotent: an
/// unchanged snapshot never produces a second request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
	pub skip: u64,
	pub limit: u64,
	pub search: String,
	pub category: Option<CompanyCategory>,
}

#[derive(Debug)]
pub struct ListQuery {
	search_text: String,
	debounced_search: String,
	pending_since: Option<Instant>,
	page: u64,
	page_size: u64,
	category: Option<CompanyCategory>,
	dirty: bool,
	last_issued: Option<PageRequest>,
}

impl ListQuery {
	/// A fresh query is dirty so the first [`Self::take_request`] call
	/// issues the initial mount fetch.
	pub fn new(page_size: u64, category: Option<CompanyCategory>) -> Self {
		Self {
			search_text: String::new(),
			debounced_search: String::new(),
			pending_since: None,
			page: 1,
			page_size,
			category,
			dirty: true,
			last_issued: None,
		}
	}

	pub fn page(&self) -> u64 {
		self.page
	}

	pub fn page_size(&self) -> u64 {
		self.page_size
	}

	pub fn category(&self) -> Option<CompanyCategory> {
		self.category
	}

	pub fn search_text(&self) -> &str {
		&self.search_text
	}

	/// Update the displayed text. Restarts the quiet window; nothing is
	/// fetched until the window elapses.
	pub fn set_search_text(&mut self, text: &str, now: Instant) {
		if self.search_text == text {
			return;
		}
		self.search_text = text.to_string();
		self.pending_since = Some(now);
	}

	/// Switch the category partition. Forces the page back to 1.
	pub fn set_category(&mut self, category: CompanyCategory) {
		if self.category == Some(category) {
			return;
		}
		self.category = Some(category);
		self.page = 1;
		self.dirty = true;
	}

	/// Jump to a page. Callers clamp via the pagination control; the
	/// query itself only tracks the requested value.
	pub fn set_page(&mut self, page: u64) {
		if self.page == page {
			return;
		}
		self.page = page;
		self.dirty = true;
	}

	/// Promote a quiescent text edit into the effective search.
	/// Call once per event-loop pass.
	pub fn tick(&mut self, now: Instant) {
		let Some(since) = self.pending_since else {
			return;
		};
		if now.duration_since(since) < DEBOUNCE_QUIET {
			return;
		}
		self.pending_since = None;
		if self.search_text != self.debounced_search {
			self.debounced_search = self.search_text.clone();
			self.page = 1;
			self.dirty = true;
		}
	}

	/// Return the request to issue, if the effective inputs changed
	/// since the last issued request.
	pub fn take_request(&mut self) -> Option<PageRequest> {
		if !self.dirty {
			return None;
		}
		self.dirty = false;
		let request = self.snapshot();
		if self.last_issued.as_ref() == Some(&request) {
			return None;
		}
		self.last_issued = Some(request.clone());
		Some(request)
	}

	/// Force the next [`Self::take_request`] to re-issue even with an
	/// unchanged snapshot. Used after a suspension commit so the list
	/// reflects the new record.
	pub fn force_refresh(&mut self) {
		self.last_issued = None;
		self.dirty = true;
	}

	fn snapshot(&self) -> PageRequest {
		PageRequest {
			skip: (self.page - 1) * self.page_size,
			limit: self.page_size,
			search: self.debounced_search.trim().to_lowercase(),
			category: self.category,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn at(base: Instant, millis: u64) -> Instant {
		base + Duration::from_millis(millis)
	}

	#[test]
	fn first_mount_issues_exactly_one_fetch() {
		let mut query = ListQuery::new(4, None);
		let request = query.take_request().expect("mount fetch");
		assert_eq!(request.skip, 0);
		assert_eq!(request.limit, 4);
		assert_eq!(request.search, "");
		assert!(query.take_request().is_none());
	}

	#[test]
	fn rapid_edits_collapse_into_one_fetch_with_the_final_text() {
		let base = Instant::now();
		let mut query = ListQuery::new(4, None);
		let _ = query.take_request();

		query.set_search_text("ACME", base);
		query.tick(at(base, 100));
		assert!(query.take_request().is_none(), "still inside the quiet window");

		query.set_search_text("ACME1", at(base, 200));
		query.tick(at(base, 400));
		assert!(query.take_request().is_none(), "window restarted by the second edit");

		query.tick(at(base, 800));
		let request = query.take_request().expect("debounced fetch");
		assert_eq!(request.search, "acme1");
		assert!(query.take_request().is_none());
	}

	#[test]
	fn search_is_trimmed_and_case_normalized() {
		let base = Instant::now();
		let mut query = ListQuery::new(5, None);
		let _ = query.take_request();

		query.set_search_text("  Riyadh Steel  ", base);
		query.tick(at(base, 600));
		let request = query.take_request().unwrap();
		assert_eq!(request.search, "riyadh steel");
	}

	#[test]
	fn page_three_requests_the_right_offset() {
		let mut query = ListQuery::new(4, None);
		let _ = query.take_request();

		query.set_page(3);
		let request = query.take_request().unwrap();
		assert_eq!(request.skip, 8);
		assert_eq!(request.limit, 4);
	}

	#[test]
	fn category_change_resets_to_page_one() {
		let mut query = ListQuery::new(4, Some(CompanyCategory::Installation));
		let _ = query.take_request();
		query.set_page(3);
		let _ = query.take_request();

		query.set_category(CompanyCategory::Sales);
		let request = query.take_request().unwrap();
		assert_eq!(request.skip, 0, "page must reset before the fetch");
		assert_eq!(request.category, Some(CompanyCategory::Sales));
	}

	#[test]
	fn effective_search_change_resets_to_page_one() {
		let base = Instant::now();
		let mut query = ListQuery::new(4, None);
		let _ = query.take_request();
		query.set_page(5);
		let _ = query.take_request();

		query.set_search_text("acme", base);
		query.tick(at(base, 600));
		let request = query.take_request().unwrap();
		assert_eq!(request.skip, 0);
		assert_eq!(query.page(), 1);
	}

	#[test]
	fn unchanged_inputs_never_refetch() {
		let base = Instant::now();
		let mut query = ListQuery::new(4, None);
		let _ = query.take_request();

		// Typing the same text back produces the same snapshot.
		query.set_search_text("x", base);
		query.set_search_text("", at(base, 100));
		query.tick(at(base, 700));
		assert!(query.take_request().is_none());

		// Re-selecting the current page is not a change either.
		query.set_page(1);
		assert!(query.take_request().is_none());
	}

	#[test]
	fn force_refresh_reissues_an_identical_snapshot() {
		let mut query = ListQuery::new(4, None);
		let first = query.take_request().unwrap();

		query.force_refresh();
		let second = query.take_request().unwrap();
		assert_eq!(first, second);
	}
}
