//! Top-level application state: the active screen, global key
//! routing, and the status line.

use std::sync::Arc;
use std::time::Instant;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::ThrobberState;

use crate::api::ApiClient;
use crate::ui::components::render_hints;
use crate::ui::labels;
use crate::ui::views::{
	CompaniesScreen, SuspendedBeneficiariesScreen, SuspendedEmployeesScreen,
};

const HINTS: &str =
	"Tab: screen   Ctrl+T: category   Ctrl+A: add   Ctrl+E: export   PgUp/PgDn: page   Esc: quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
	Companies,
	SuspendedEmployees,
	SuspendedBeneficiaries,
}

impl Screen {
	fn next(self) -> Self {
		match self {
			Self::Companies => Self::SuspendedEmployees,
			Self::SuspendedEmployees => Self::SuspendedBeneficiaries,
			Self::SuspendedBeneficiaries => Self::Companies,
		}
	}

	fn title(self) -> &'static str {
		match self {
			Self::Companies => labels::COMPANIES_SCREEN,
			Self::SuspendedEmployees => labels::EMPLOYEES_SCREEN,
			Self::SuspendedBeneficiaries => labels::BENEFICIARIES_SCREEN,
		}
	}
}

pub struct App {
	pub screen: Screen,
	pub companies: CompaniesScreen,
	pub employees: SuspendedEmployeesScreen,
	pub beneficiaries: SuspendedBeneficiariesScreen,
	pub throbber: ThrobberState,
	pub status: Option<String>,
	pub should_quit: bool,
}

impl App {
	pub fn new(api: Arc<ApiClient>) -> Self {
		Self {
			screen: Screen::Companies,
			companies: CompaniesScreen::new(Arc::clone(&api)),
			employees: SuspendedEmployeesScreen::new(Arc::clone(&api)),
			beneficiaries: SuspendedBeneficiariesScreen::new(api),
			throbber: ThrobberState::default(),
			status: None,
			should_quit: false,
		}
	}

	pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
		self.status = None;

		match key.code {
			KeyCode::Esc => {
				if !self.close_active_overlay() {
					self.should_quit = true;
				}
			}
			KeyCode::Tab if !self.active_has_overlay() => {
				self.switch_to(self.screen.next());
			}
			_ => {
				let status = match self.screen {
					Screen::Companies => self.companies.handle_key(key, now),
					Screen::SuspendedEmployees => self.employees.handle_key(key, now),
					Screen::SuspendedBeneficiaries => self.beneficiaries.handle_key(key, now),
				};
				if status.is_some() {
					self.status = status;
				}
			}
		}
	}

	/// Entering a screen refetches its list, matching the original's
	/// remount-on-navigation behavior.
	fn switch_to(&mut self, screen: Screen) {
		self.screen = screen;
		match screen {
			Screen::Companies => self.companies.list.refresh(),
			Screen::SuspendedEmployees => self.employees.list.refresh(),
			Screen::SuspendedBeneficiaries => self.beneficiaries.list.refresh(),
		}
	}

	fn active_has_overlay(&self) -> bool {
		match self.screen {
			Screen::Companies => self.companies.has_overlay(),
			Screen::SuspendedEmployees => self.employees.has_overlay(),
			Screen::SuspendedBeneficiaries => self.beneficiaries.has_overlay(),
		}
	}

	fn close_active_overlay(&mut self) -> bool {
		match self.screen {
			Screen::Companies => self.companies.close_overlay(),
			Screen::SuspendedEmployees => self.employees.close_overlay(),
			Screen::SuspendedBeneficiaries => self.beneficiaries.close_overlay(),
		}
	}

	/// Advance debounce windows and issue any due fetch. Only the
	/// active screen runs; every synchronizer is independent.
	pub fn tick(&mut self, now: Instant) {
		match self.screen {
			Screen::Companies => self.companies.tick(now),
			Screen::SuspendedEmployees => self.employees.tick(now),
			Screen::SuspendedBeneficiaries => self.beneficiaries.tick(now),
		}
	}

	pub fn pump(&mut self) {
		match self.screen {
			Screen::Companies => self.companies.pump(),
			Screen::SuspendedEmployees => self.employees.pump(),
			Screen::SuspendedBeneficiaries => self.beneficiaries.pump(),
		}
	}

	pub fn draw(&self, frame: &mut Frame) {
		let [bar, content, footer] = Layout::vertical([
			Constraint::Length(1),
			Constraint::Fill(1),
			Constraint::Length(1),
		])
		.areas(frame.area());

		self.render_screen_bar(frame, bar);

		match self.screen {
			Screen::Companies => self.companies.render(frame, content, &self.throbber),
			Screen::SuspendedEmployees => self.employees.render(frame, content, &self.throbber),
			Screen::SuspendedBeneficiaries => {
				self.beneficiaries.render(frame, content, &self.throbber)
			}
		}

		match &self.status {
			Some(status) => render_hints(frame, footer, status),
			None => render_hints(frame, footer, HINTS),
		}
	}

	fn render_screen_bar(&self, frame: &mut Frame, area: Rect) {
		let mut spans = Vec::new();
		for screen in [
			Screen::Companies,
			Screen::SuspendedEmployees,
			Screen::SuspendedBeneficiaries,
		] {
			let style = if screen == self.screen {
				Style::default()
					.fg(Color::White)
					.add_modifier(Modifier::BOLD | Modifier::REVERSED)
			} else {
				Style::default().fg(Color::DarkGray)
			};
			spans.push(Span::styled(format!(" {} ", screen.title()), style));
			spans.push(Span::raw(" "));
		}
		frame.render_widget(Paragraph::new(Line::from(spans)), area);
	}
}

#[cfg(test)]
mod tests {
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;

	use super::*;

	fn test_app() -> App {
		// Port 1 is never serviced; nothing fetches until tick() runs.
		let api = Arc::new(ApiClient::new("http://127.0.0.1:1").unwrap());
		App::new(api)
	}

	fn draw_to_string(app: &App) -> String {
		let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
		terminal.draw(|frame| app.draw(frame)).unwrap();
		terminal.backend().to_string()
	}

	#[test]
	fn companies_screen_renders_its_tabs_and_columns() {
		let app = test_app();
		let view = draw_to_string(&app);
		assert!(view.contains(labels::INSTALLATION_COMPANIES_TAB));
		assert!(view.contains(labels::COMPANY_NAME));
		assert!(view.contains(labels::PAGE_PREVIOUS));
	}

	#[test]
	fn tab_cycles_through_all_three_screens() {
		use ratatui::crossterm::event::KeyModifiers;

		let mut app = test_app();
		let now = Instant::now();
		let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);

		app.handle_key(tab, now);
		assert_eq!(app.screen, Screen::SuspendedEmployees);
		app.handle_key(tab, now);
		assert_eq!(app.screen, Screen::SuspendedBeneficiaries);
		app.handle_key(tab, now);
		assert_eq!(app.screen, Screen::Companies);
	}

	#[test]
	fn escape_quits_when_no_overlay_is_open() {
		use ratatui::crossterm::event::KeyModifiers;

		let mut app = test_app();
		app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), Instant::now());
		assert!(app.should_quit);
	}

	#[test]
	fn escape_closes_an_open_intake_before_quitting() {
		use ratatui::crossterm::event::KeyModifiers;

		let mut app = test_app();
		let now = Instant::now();
		app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE), now);
		app.handle_key(
			KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
			now,
		);
		assert!(app.employees.has_overlay());

		app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), now);
		assert!(!app.employees.has_overlay());
		assert!(!app.should_quit);

		app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), now);
		assert!(app.should_quit);
	}
}
