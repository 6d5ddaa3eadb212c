//! The search/paginate/fetch synchronization protocol.
//!
//! Every list screen instantiates one [`ListView`] bound to one remote
//! collection. The view owns the input-side state machine
//! ([`sync::ListQuery`]), a background fetch worker
//! ([`worker::FetchRuntime`]), and the last successfully loaded page.

pub mod page;
pub mod sync;
pub mod worker;

use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use tracing::error;

use crate::api::ApiError;
use crate::api::types::{CompanyCategory, Page};
use sync::{ListQuery, PageRequest};
use worker::FetchRuntime;

/// A remote-backed list plus the query state that keeps it current.
///
/// On fetch failure the last-known page is kept: a stale list is
/// better than a broken view.
pub struct ListView<T> {
	pub query: ListQuery,
	runtime: FetchRuntime<PageRequest, Page<T>>,
	items: Vec<T>,
	total: u64,
	pub cursor: usize,
}

impl<T: Send + 'static> ListView<T> {
	pub fn new<F>(page_size: u64, category: Option<CompanyCategory>, fetch: F) -> Self
	where
		F: Fn(&PageRequest) -> Result<Page<T>, ApiError> + Send + 'static,
	{
		Self {
			query: ListQuery::new(page_size, category),
			runtime: FetchRuntime::spawn(fetch),
			items: Vec::new(),
			total: 0,
			cursor: 0,
		}
	}

	pub fn items(&self) -> &[T] {
		&self.items
	}

	pub fn total(&self) -> u64 {
		self.total
	}

	pub fn selected(&self) -> Option<&T> {
		self.items.get(self.cursor)
	}

	pub fn total_pages(&self) -> u64 {
		page::total_pages(self.total, self.query.page_size())
	}

	pub fn is_loading(&self) -> bool {
		self.runtime.is_in_flight()
	}

	/// Promote quiescent edits and issue a fetch if the effective
	/// inputs changed. Call once per event-loop pass.
	pub fn tick(&mut self, now: Instant) {
		self.query.tick(now);
		if let Some(request) = self.query.take_request() {
			self.runtime.issue(request);
		}
	}

	/// Drain worker results, applying only the one that answers the
	/// latest issued request.
	pub fn pump(&mut self) {
		loop {
			match self.runtime.try_recv() {
				Ok(result) => {
					if !self.runtime.matches_latest(result.id) {
						continue;
					}
					self.runtime.record_completion();
					match result.outcome {
						Ok(fetched) => {
							self.items = fetched.data;
							self.total = fetched.total;
							if !self.items.is_empty() {
								self.cursor = self.cursor.min(self.items.len() - 1);
							} else {
								self.cursor = 0;
							}
						}
						Err(err) => {
							// Keep the stale page on screen.
							error!("list fetch failed: {err}");
						}
					}
				}
				Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
			}
		}
	}

	pub fn move_cursor_up(&mut self) {
		self.cursor = self.cursor.saturating_sub(1);
	}

	pub fn move_cursor_down(&mut self) {
		if self.cursor + 1 < self.items.len() {
			self.cursor += 1;
		}
	}

	/// Jump to a page, clamped against the current total.
	pub fn set_page(&mut self, target: u64) {
		let clamped = page::clamp_page(target, self.total_pages());
		self.query.set_page(clamped);
	}

	pub fn previous_page(&mut self) {
		self.set_page(page::previous_page(self.query.page()));
	}

	pub fn next_page(&mut self) {
		self.set_page(page::next_page(self.query.page(), self.total_pages()));
	}

	/// Refetch the current snapshot, e.g. after a suspension commit.
	pub fn refresh(&mut self) {
		self.query.force_refresh();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::thread;
	use std::time::Duration;

	use reqwest::StatusCode;

	use super::*;

	fn wait_for_pump<T: Send + 'static>(view: &mut ListView<T>) {
		let deadline = Instant::now() + Duration::from_secs(2);
		while view.is_loading() {
			view.pump();
			assert!(Instant::now() < deadline, "fetch did not settle in time");
			thread::sleep(Duration::from_millis(5));
		}
	}

	fn numbered_page(request: &PageRequest) -> Page<u64> {
		let data = (request.skip..request.skip + request.limit).collect();
		Page { data, total: 10 }
	}

	#[test]
	fn mount_fetch_populates_the_view() {
		let mut view = ListView::new(4, None, |request: &PageRequest| Ok(numbered_page(request)));
		view.tick(Instant::now());
		wait_for_pump(&mut view);
		assert_eq!(view.items(), &[0, 1, 2, 3]);
		assert_eq!(view.total(), 10);
		assert_eq!(view.total_pages(), 3);
	}

	#[test]
	fn page_three_of_ten_records_requests_skip_eight() {
		let mut view = ListView::new(4, None, |request: &PageRequest| Ok(numbered_page(request)));
		view.tick(Instant::now());
		wait_for_pump(&mut view);

		view.set_page(3);
		view.tick(Instant::now());
		wait_for_pump(&mut view);
		assert_eq!(view.items(), &[8, 9, 10, 11]);
	}

	#[test]
	fn failed_fetch_keeps_the_stale_page() {
		let calls = AtomicUsize::new(0);
		let mut view = ListView::new(4, None, move |request: &PageRequest| {
			if calls.fetch_add(1, Ordering::SeqCst) == 0 {
				Ok(numbered_page(request))
			} else {
				Err(ApiError::Status {
					url: "http://test/companies_installation".into(),
					status: StatusCode::INTERNAL_SERVER_ERROR,
				})
			}
		});
		view.tick(Instant::now());
		wait_for_pump(&mut view);
		assert_eq!(view.total(), 10);

		view.set_page(2);
		view.tick(Instant::now());
		wait_for_pump(&mut view);
		assert_eq!(view.items(), &[0, 1, 2, 3], "failed page left the data alone");
		assert_eq!(view.total(), 10);
	}

	#[test]
	fn cursor_is_clamped_when_a_shorter_page_arrives() {
		let calls = AtomicUsize::new(0);
		let mut view = ListView::new(4, None, move |_request: &PageRequest| {
			if calls.fetch_add(1, Ordering::SeqCst) == 0 {
				Ok(Page {
					data: vec![1, 2, 3, 4],
					total: 5,
				})
			} else {
				Ok(Page {
					data: vec![5],
					total: 5,
				})
			}
		});
		view.tick(Instant::now());
		wait_for_pump(&mut view);
		view.cursor = 3;

		view.set_page(2);
		view.tick(Instant::now());
		wait_for_pump(&mut view);
		assert_eq!(view.cursor, 0);
	}
}
