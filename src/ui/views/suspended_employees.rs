//! Suspended-employee registry: category tabs, debounced search, and
//! the employee intake modal.

use std::sync::Arc;
use std::time::Instant;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;

use crate::api::ApiClient;
use crate::api::types::{CompanyCategory, SuspendedEmployee};
use crate::query::ListView;
use crate::ui::components::pagination::render_pagination;
use crate::ui::components::render_spinner;
use crate::ui::components::table::{Column, render_table};
use crate::ui::components::dialog_frame;
use crate::ui::input::SearchInput;
use crate::ui::intake::{EmployeeIntake, IntakeEvent};
use crate::ui::labels;
use crate::ui::views::render_category_tabs;

const PAGE_SIZE: u64 = 4;

const COLUMNS: [Column<SuspendedEmployee>; 3] = [
	Column {
		title: labels::EMPLOYEE_NAME,
		render: |record| record.employee.name.clone(),
	},
	Column {
		title: labels::COMPANY_NAME,
		render: |record| record.employee.company.name.clone(),
	},
	Column {
		title: labels::EMPLOYEE_NATIONAL_ID,
		render: |record| record.employee.national_id.clone(),
	},
];

pub struct SuspendedEmployeesScreen {
	api: Arc<ApiClient>,
	search: SearchInput,
	pub list: ListView<SuspendedEmployee>,
	pub intake: Option<EmployeeIntake>,
}

impl SuspendedEmployeesScreen {
	pub fn new(api: Arc<ApiClient>) -> Self {
		let fetch_api = Arc::clone(&api);
		let list = ListView::new(
			PAGE_SIZE,
			Some(CompanyCategory::Installation),
			move |request| fetch_api.list_suspended_employees(request),
		);
		Self {
			api,
			search: SearchInput::default(),
			list,
			intake: None,
		}
	}

	pub fn has_overlay(&self) -> bool {
		self.intake.is_some()
	}

	/// Dropping the intake clears its lookup state, so reopening the
	/// modal starts fresh.
	pub fn close_overlay(&mut self) -> bool {
		self.intake.take().is_some()
	}

	pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<String> {
		if let Some(intake) = &mut self.intake {
			intake.handle_key(key, now);
			return None;
		}

		match key.code {
			KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				let current = self.list.query.category().unwrap_or_default();
				self.list.query.set_category(current.toggled());
			}
			KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				let category = self.list.query.category().unwrap_or_default();
				self.intake = Some(EmployeeIntake::for_api(&self.api, category));
			}
			KeyCode::Up => self.list.move_cursor_up(),
			KeyCode::Down => self.list.move_cursor_down(),
			KeyCode::PageUp => self.list.previous_page(),
			KeyCode::PageDown => self.list.next_page(),
			_ => {
				if self.search.input(key) {
					self.list.query.set_search_text(self.search.text(), now);
				}
			}
		}
		None
	}

	pub fn tick(&mut self, now: Instant) {
		self.list.tick(now);
	}

	pub fn pump(&mut self) {
		self.list.pump();
		if let Some(intake) = &mut self.intake {
			if intake.pump() == Some(IntakeEvent::Committed) {
				self.intake = None;
				self.list.refresh();
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
			labels::INSTALLATION_EMPLOYEES_TAB,
			labels::SALES_EMPLOYEES_TAB,
		);
		render_spinner(frame, spinner, throbber, self.list.is_loading());

		self.search.render(
			frame,
			search,
			labels::EMPLOYEES_SCREEN,
			labels::SEARCH_PLACEHOLDER,
			self.intake.is_none(),
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

		if let Some(intake) = &self.intake {
			let inner = dialog_frame(frame, area, labels::ADD_EMPLOYEE_TITLE);
			intake.render(frame, inner);
		}
	}
}
