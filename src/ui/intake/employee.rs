//! Employee intake: pick a company of the active category, then one of
//! its employees, and post a suspension on confirm.
//!
//! Company selection immediately fetches that company's roster; a
//! late-arriving roster for a previously selected company is discarded
//! by the request-id check.

use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use chrono::Local;
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use tracing::error;

use crate::api::types::{
	Company, CompanyCategory, Employee, NewSuspendedEmployee, Page, SuspendedEmployee,
};
use crate::api::{ApiClient, ApiError};
use crate::query::worker::FetchRuntime;
use crate::ui::components::render_hints;
use crate::ui::intake::IntakeEvent;
use crate::ui::labels;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
	Companies,
	Employees,
}

pub struct EmployeeIntake {
	category: CompanyCategory,
	companies_rt: FetchRuntime<CompanyCategory, Page<Company>>,
	companies: Vec<Company>,
	roster_rt: FetchRuntime<u64, Page<Employee>>,
	employees: Vec<Employee>,
	company_cursor: usize,
	employee_cursor: Option<usize>,
	focus: Focus,
	submit: FetchRuntime<NewSuspendedEmployee, SuspendedEmployee>,
	submitting: bool,
}

impl EmployeeIntake {
	pub fn new<C, R, S>(category: CompanyCategory, companies: C, roster: R, submit: S) -> Self
	where
		C: Fn(&CompanyCategory) -> Result<Page<Company>, ApiError> + Send + 'static,
		R: Fn(&u64) -> Result<Page<Employee>, ApiError> + Send + 'static,
		S: Fn(&NewSuspendedEmployee) -> Result<SuspendedEmployee, ApiError> + Send + 'static,
	{
		let mut companies_rt = FetchRuntime::spawn(companies);
		companies_rt.issue(category);
		Self {
			category,
			companies_rt,
			companies: Vec::new(),
			roster_rt: FetchRuntime::spawn(roster),
			employees: Vec::new(),
			company_cursor: 0,
			employee_cursor: None,
			focus: Focus::Companies,
			submit: FetchRuntime::spawn(submit),
			submitting: false,
		}
	}

	pub fn for_api(api: &Arc<ApiClient>, category: CompanyCategory) -> Self {
		let companies_api = Arc::clone(api);
		let roster_api = Arc::clone(api);
		let submit_api = Arc::clone(api);
		Self::new(
			category,
			move |category: &CompanyCategory| companies_api.list_companies_for_intake(*category),
			move |company_id: &u64| roster_api.list_all_company_employees(*company_id),
			move |payload: &NewSuspendedEmployee| {
				submit_api.suspend_employee(payload.employee_id, payload.suspended_at)
			},
		)
	}

	pub fn category(&self) -> CompanyCategory {
		self.category
	}

	pub fn selected_company(&self) -> Option<&Company> {
		self.companies.get(self.company_cursor)
	}

	pub fn selected_employee(&self) -> Option<&Employee> {
		self.employees.get(self.employee_cursor?)
	}

	pub fn has_submitted(&self) -> bool {
		self.submit.has_issued()
	}

	pub fn handle_key(&mut self, key: KeyEvent, _now: Instant) {
		match key.code {
			KeyCode::Tab => {
				self.focus = match self.focus {
					Focus::Companies => Focus::Employees,
					Focus::Employees => Focus::Companies,
				};
			}
			KeyCode::Up => self.move_cursor(-1),
			KeyCode::Down => self.move_cursor(1),
			KeyCode::Enter => self.confirm(),
			_ => {}
		}
	}

	fn move_cursor(&mut self, delta: i64) {
		match self.focus {
			Focus::Companies => {
				let moved = step(self.company_cursor, delta, self.companies.len());
				if moved != self.company_cursor {
					self.company_cursor = moved;
					self.select_company();
				}
			}
			Focus::Employees => {
				if self.employees.is_empty() {
					return;
				}
				let current = self.employee_cursor.unwrap_or(0);
				let moved = if self.employee_cursor.is_none() {
					current
				} else {
					step(current, delta, self.employees.len())
				};
				self.employee_cursor = Some(moved);
			}
		}
	}

	/// Fetch the roster of the company under the cursor. The old
	/// roster stays visible until the new one lands; a stale response
	/// is discarded in [`Self::pump`].
	fn select_company(&mut self) {
		self.employee_cursor = None;
		if let Some(company) = self.companies.get(self.company_cursor) {
			self.roster_rt.issue(company.id);
		}
	}

	pub fn pump(&mut self) -> Option<IntakeEvent> {
		loop {
			match self.companies_rt.try_recv() {
				Ok(result) => {
					if !self.companies_rt.matches_latest(result.id) {
						continue;
					}
					self.companies_rt.record_completion();
					match result.outcome {
						Ok(page) => {
							self.companies = page.data;
							self.company_cursor = 0;
							self.select_company();
						}
						Err(err) => error!("intake company listing failed: {err}"),
					}
				}
				Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
			}
		}

		loop {
			match self.roster_rt.try_recv() {
				Ok(result) => {
					if !self.roster_rt.matches_latest(result.id) {
						continue;
					}
					self.roster_rt.record_completion();
					match result.outcome {
						Ok(page) => {
							self.employees = page.data;
							self.employee_cursor = None;
						}
						Err(err) => error!("intake roster fetch failed: {err}"),
					}
				}
				Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
			}
		}

		loop {
			match self.submit.try_recv() {
				Ok(result) => {
					if !self.submit.matches_latest(result.id) {
						continue;
					}
					self.submit.record_completion();
					match result.outcome {
						Ok(_created) => return Some(IntakeEvent::Committed),
						Err(err) => {
							error!("failed to suspend employee: {err}");
							self.submitting = false;
						}
					}
				}
				Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
			}
		}
		None
	}

	/// Rejected client-side while no employee is bound.
	fn confirm(&mut self) {
		if self.submitting {
			return;
		}
		let Some(employee) = self.selected_employee() else {
			return;
		};
		let employee_id = employee.id;
		self.submitting = true;
		self.submit.issue(NewSuspendedEmployee {
			employee_id,
			suspended_at: Local::now().date_naive(),
		});
	}

	pub fn render(&self, frame: &mut Frame, area: Rect) {
		let [pickers, details, hints] = Layout::vertical([
			Constraint::Fill(1),
			Constraint::Length(6),
			Constraint::Length(1),
		])
		.areas(area);
		let [company_pane, employee_pane] =
			Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(pickers);

		render_pick_list(
			frame,
			company_pane,
			labels::PICK_COMPANY,
			self.focus == Focus::Companies,
			self.companies.iter().map(|company| company.name.clone()),
			Some(self.company_cursor),
		);
		render_pick_list(
			frame,
			employee_pane,
			labels::PICK_EMPLOYEE,
			self.focus == Focus::Employees,
			self.employees.iter().map(|employee| employee.name.clone()),
			self.employee_cursor,
		);

		let blank = String::new();
		let company_name = self
			.selected_company()
			.map(|company| company.name.clone())
			.unwrap_or_default();
		let (name, national_id, nationality, phone) = match self.selected_employee() {
			Some(employee) => (
				&employee.name,
				&employee.national_id,
				&employee.nationality,
				&employee.phone,
			),
			None => (&blank, &blank, &blank, &blank),
		};
		let lines = vec![
			Line::from(format!("{}: {name}", labels::EMPLOYEE_NAME)),
			Line::from(format!("{}: {company_name}", labels::COMPANY_NAME)),
			Line::from(format!("{}: {national_id}", labels::NATIONAL_ID)),
			Line::from(format!("{}: {nationality}", labels::NATIONALITY)),
			Line::from(format!("{}: {phone}", labels::PHONE)),
		];
		frame.render_widget(Paragraph::new(lines), details);

		render_hints(
			frame,
			hints,
			"Tab: switch pane   ↑/↓: select   Enter: submit   Esc: cancel",
		);
	}
}

fn step(current: usize, delta: i64, len: usize) -> usize {
	if len == 0 {
		return 0;
	}
	let moved = current as i64 + delta;
	moved.clamp(0, len as i64 - 1) as usize
}

fn render_pick_list(
	frame: &mut Frame,
	area: Rect,
	title: &str,
	focused: bool,
	names: impl Iterator<Item = String>,
	cursor: Option<usize>,
) {
	use ratatui::widgets::{Block, Borders};

	let mut block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.title(title.to_string());
	if focused {
		block = block.border_style(Style::default().add_modifier(Modifier::BOLD));
	}

	let items = names.map(ListItem::new).collect::<Vec<_>>();
	let list = List::new(items)
		.highlight_style(Style::default().add_modifier(Modifier::REVERSED))
		.highlight_symbol("▶ ");
	let mut state = ListState::default();
	state.select(cursor);
	frame.render_stateful_widget(list.block(block), area, &mut state);
}

#[cfg(test)]
mod tests {
	use std::thread;
	use std::time::Duration;

	use chrono::NaiveDate;
	use ratatui::crossterm::event::KeyModifiers;

	use super::*;
	use crate::api::types::{CompanyRef, EmployeeWithCompany};

	fn companies() -> Vec<Company> {
		vec![
			Company {
				id: 1,
				name: "Alpha".into(),
				commercial_number: "CR-1".into(),
				unified_number: "700-1".into(),
				category: CompanyCategory::Installation,
			},
			Company {
				id: 2,
				name: "Beta".into(),
				commercial_number: "CR-2".into(),
				unified_number: "700-2".into(),
				category: CompanyCategory::Installation,
			},
		]
	}

	fn employee(id: u64, company_id: u64) -> Employee {
		Employee {
			id,
			name: format!("employee-{id}"),
			national_id: format!("10{id}"),
			job_number: format!("J-{id}"),
			nationality: "سعودي".into(),
			phone: "0550000000".into(),
			company_id: Some(company_id),
		}
	}

	fn created_record() -> SuspendedEmployee {
		SuspendedEmployee {
			id: 1,
			suspended_at: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
			employee: EmployeeWithCompany {
				id: 10,
				name: "employee-10".into(),
				national_id: "1010".into(),
				job_number: "J-10".into(),
				nationality: "سعودي".into(),
				phone: "0550000000".into(),
				company: CompanyRef {
					id: 1,
					name: "Alpha".into(),
				},
			},
		}
	}

	fn test_intake() -> EmployeeIntake {
		EmployeeIntake::new(
			CompanyCategory::Installation,
			|_category: &CompanyCategory| Ok(Page::whole(companies())),
			|company_id: &u64| {
				let base = company_id * 10;
				Ok(Page::whole(vec![
					employee(base, *company_id),
					employee(base + 1, *company_id),
				]))
			},
			|_payload: &NewSuspendedEmployee| Ok(created_record()),
		)
	}

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn settle(intake: &mut EmployeeIntake, ready: impl Fn(&EmployeeIntake) -> bool) {
		let deadline = Instant::now() + Duration::from_secs(2);
		loop {
			intake.pump();
			if ready(intake) {
				return;
			}
			assert!(Instant::now() < deadline, "intake did not settle in time");
			thread::sleep(Duration::from_millis(5));
		}
	}

	#[test]
	fn opening_loads_companies_and_the_first_roster() {
		let mut intake = test_intake();
		settle(&mut intake, |intake| !intake.employees.is_empty());
		assert_eq!(intake.selected_company().map(|company| company.id), Some(1));
		assert_eq!(intake.employees[0].company_id, Some(1));
	}

	#[test]
	fn changing_company_replaces_the_roster() {
		let mut intake = test_intake();
		settle(&mut intake, |intake| !intake.employees.is_empty());

		intake.handle_key(key(KeyCode::Down), Instant::now());
		settle(&mut intake, |intake| {
			intake
				.employees
				.first()
				.is_some_and(|first| first.company_id == Some(2))
		});
		assert!(intake.selected_employee().is_none(), "binding resets with the roster");
	}

	#[test]
	fn confirming_without_a_bound_employee_sends_nothing() {
		let mut intake = test_intake();
		settle(&mut intake, |intake| !intake.employees.is_empty());

		intake.handle_key(key(KeyCode::Enter), Instant::now());
		assert!(!intake.has_submitted());
	}

	#[test]
	fn confirming_a_bound_employee_commits() {
		let mut intake = test_intake();
		settle(&mut intake, |intake| !intake.employees.is_empty());

		intake.handle_key(key(KeyCode::Tab), Instant::now());
		intake.handle_key(key(KeyCode::Down), Instant::now());
		assert!(intake.selected_employee().is_some());

		intake.handle_key(key(KeyCode::Enter), Instant::now());
		let deadline = Instant::now() + Duration::from_secs(2);
		loop {
			if intake.pump() == Some(IntakeEvent::Committed) {
				break;
			}
			assert!(Instant::now() < deadline, "commit did not settle in time");
			thread::sleep(Duration::from_millis(5));
		}
	}
}
