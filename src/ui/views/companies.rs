//! Company listing: category tabs, debounced search, paginated table,
//! CSV export, and the company-detail overlay.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;
use tracing::error;

use crate::api::ApiClient;
use crate::api::types::{Company, CompanyCategory};
use crate::export;
use crate::query::ListView;
use crate::ui::components::render_spinner;
use crate::ui::components::table::{Column, render_table};
use crate::ui::components::pagination::render_pagination;
use crate::ui::input::SearchInput;
use crate::ui::labels;
use crate::ui::views::{CompanyDetail, render_category_tabs};

const PAGE_SIZE: u64 = 4;
const EXPORT_FILE: &str = "companies.csv";

const COLUMNS: [Column<Company>; 3] = [
	Column {
		title: labels::COMPANY_NAME,
		render: |company| company.name.clone(),
	},
	Column {
		title: labels::COMMERCIAL_NUMBER,
		render: |company| company.commercial_number.clone(),
	},
	Column {
		title: labels::UNIFIED_NUMBER,
		render: |company| company.unified_number.clone(),
	},
];

pub struct CompaniesScreen {
	api: Arc<ApiClient>,
	search: SearchInput,
	pub list: ListView<Company>,
	pub detail: Option<CompanyDetail>,
}

impl CompaniesScreen {
	pub fn new(api: Arc<ApiClient>) -> Self {
		let fetch_api = Arc::clone(&api);
		let list = ListView::new(
			PAGE_SIZE,
			Some(CompanyCategory::Installation),
			move |request| fetch_api.list_companies(request),
		);
		Self {
			api,
			search: SearchInput::default(),
			list,
			detail: None,
		}
	}

	pub fn has_overlay(&self) -> bool {
		self.detail.is_some()
	}

	pub fn close_overlay(&mut self) -> bool {
		self.detail.take().is_some()
	}

	pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<String> {
		if let Some(detail) = &mut self.detail {
			detail.handle_key(key);
			return None;
		}

		match key.code {
			KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				let current = self.list.query.category().unwrap_or_default();
				self.list.query.set_category(current.toggled());
				None
			}
			KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				Some(self.export_visible_page())
			}
			KeyCode::Enter => {
				if let Some(company) = self.list.selected() {
					self.detail = Some(CompanyDetail::new(&self.api, company.clone()));
				}
				None
			}
			KeyCode::Up => {
				self.list.move_cursor_up();
				None
			}
			KeyCode::Down => {
				self.list.move_cursor_down();
				None
			}
			KeyCode::PageUp => {
				self.list.previous_page();
				None
			}
			KeyCode::PageDown => {
				self.list.next_page();
				None
			}
			_ => {
				if self.search.input(key) {
					self.list.query.set_search_text(self.search.text(), now);
				}
				None
			}
		}
	}

	pub fn tick(&mut self, now: Instant) {
		self.list.tick(now);
		if let Some(detail) = &mut self.detail {
			detail.tick(now);
		}
	}

	pub fn pump(&mut self) {
		self.list.pump();
		if let Some(detail) = &mut self.detail {
			detail.pump();
		}
	}

	fn export_visible_page(&self) -> String {
		match export::write_company_csv(Path::new(EXPORT_FILE), self.list.items()) {
			Ok(()) => format!("saved {EXPORT_FILE}"),
			Err(err) => {
				error!("CSV export failed: {err:#}");
				format!("export failed: {err}")
			}
		}
	}

	pub fn render(&self, frame: &mut Frame, area: Rect, throbber: &ThrobberState) {
		let [tabs, search, table, pages] = Layout::vertical([
			Constraint::Length(1),
			Constraint::Length(3),
			Constraint::Fill(1),
			Constraint::Length(1),
		])
		.areas(area);

		let [tabs, spinner] =
			Layout::horizontal([Constraint::Fill(1), Constraint::Length(2)]).areas(tabs);
		render_category_tabs(
			frame,
			tabs,
			self.list.query.category().unwrap_or_default(),
			labels::INSTALLATION_COMPANIES_TAB,
			labels::SALES_COMPANIES_TAB,
		);
		render_spinner(frame, spinner, throbber, self.list.is_loading());

		self.search.render(
			frame,
			search,
			labels::COMPANIES_SCREEN,
			labels::SEARCH_COMPANY_PLACEHOLDER,
			self.detail.is_none(),
		);

		let mut table_state = TableState::default().with_selected(Some(self.list.cursor));
		render_table(frame, table, None, &COLUMNS, self.list.items(), &mut table_state);

		render_pagination(
			frame,
			pages,
			self.list.query.page(),
			self.list.query.page_size(),
			self.list.total(),
		);

		if let Some(detail) = &self.detail {
			detail.render(frame, area);
		}
	}
}
