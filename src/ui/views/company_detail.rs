//! Company detail overlay: company fields, contracted service
//! providers, and a paginated employee roster.

use std::sync::Arc;
use std::time::Instant;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, TableState};

use crate::api::ApiClient;
use crate::api::types::{Company, Employee, Page, ServiceProvider};
use crate::query::ListView;
use crate::ui::components::dialog_frame;
use crate::ui::components::pagination::render_pagination;
use crate::ui::components::render_hints;
use crate::ui::components::table::{Column, render_table};
use crate::ui::labels;

const ROSTER_PAGE_SIZE: u64 = 3;
/// The provider listing is unpaginated; one oversized page fetches it
/// whole through the ordinary list machinery.
const PROVIDERS_PAGE_SIZE: u64 = 500;

const PROVIDER_COLUMNS: [Column<ServiceProvider>; 2] = [
	Column {
		title: labels::PROVIDER_NAME,
		render: |provider| provider.name.clone(),
	},
	Column {
		title: labels::PROVIDER_CODE,
		render: |provider| provider.code.clone(),
	},
];

const ROSTER_COLUMNS: [Column<Employee>; 5] = [
	Column {
		title: labels::EMPLOYEE_NAME,
		render: |employee| employee.name.clone(),
	},
	Column {
		title: labels::JOB_NUMBER,
		render: |employee| employee.job_number.clone(),
	},
	Column {
		title: labels::NATIONAL_ID,
		render: |employee| employee.national_id.clone(),
	},
	Column {
		title: labels::NATIONALITY,
		render: |employee| employee.nationality.clone(),
	},
	Column {
		title: labels::PHONE,
		render: |employee| employee.phone.clone(),
	},
];

pub struct CompanyDetail {
	pub company: Company,
	providers: ListView<ServiceProvider>,
	pub roster: ListView<Employee>,
}

impl CompanyDetail {
	pub fn new(api: &Arc<ApiClient>, company: Company) -> Self {
		let providers_api = Arc::clone(api);
		let roster_api = Arc::clone(api);
		let company_id = company.id;
		Self {
			company,
			providers: ListView::new(PROVIDERS_PAGE_SIZE, None, move |_request| {
				providers_api.list_service_providers().map(Page::whole)
			}),
			roster: ListView::new(ROSTER_PAGE_SIZE, None, move |request| {
				roster_api.list_company_employees(company_id, request.skip, request.limit)
			}),
		}
	}

	pub fn handle_key(&mut self, key: KeyEvent) {
		match key.code {
			KeyCode::PageUp => self.roster.previous_page(),
			KeyCode::PageDown => self.roster.next_page(),
			_ => {}
		}
	}

	pub fn tick(&mut self, now: Instant) {
		self.providers.tick(now);
		self.roster.tick(now);
	}

	pub fn pump(&mut self) {
		self.providers.pump();
		self.roster.pump();
	}

	pub fn render(&self, frame: &mut Frame, area: Rect) {
		let inner = dialog_frame(frame, area, &self.company.name);
		let [fields, providers, roster, pages, hints] = Layout::vertical([
			Constraint::Length(5),
			Constraint::Length(7),
			Constraint::Fill(1),
			Constraint::Length(1),
			Constraint::Length(1),
		])
		.areas(inner);

		let lines = vec![
			Line::from(labels::COMPANY_DATA),
			Line::from(format!("{}: {}", labels::COMPANY_NAME, self.company.name)),
			Line::from(format!(
				"{}: {}",
				labels::COMMERCIAL_NUMBER,
				self.company.commercial_number
			)),
			Line::from(format!(
				"{}: {}",
				labels::UNIFIED_NUMBER,
				self.company.unified_number
			)),
			Line::from(self.company.category.display_label()),
		];
		frame.render_widget(Paragraph::new(lines), fields);

		let mut providers_state = TableState::default();
		render_table(
			frame,
			providers,
			Some(labels::CONTRACTED_PROVIDERS),
			&PROVIDER_COLUMNS,
			self.providers.items(),
			&mut providers_state,
		);

		let mut roster_state = TableState::default();
		render_table(
			frame,
			roster,
			Some(labels::COMPANY_EMPLOYEES),
			&ROSTER_COLUMNS,
			self.roster.items(),
			&mut roster_state,
		);

		render_pagination(
			frame,
			pages,
			self.roster.query.page(),
			self.roster.query.page_size(),
			self.roster.total(),
		);

		render_hints(frame, hints, "PgUp/PgDn: roster pages   Esc: close");
	}
}
