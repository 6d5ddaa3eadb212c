//! Suspended-beneficiary registry: debounced search and the
//! beneficiary intake modal.

use std::sync::Arc;
use std::time::Instant;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;

use crate::api::ApiClient;
use crate::api::types::SuspendedBeneficiary;
use crate::query::ListView;
use crate::ui::components::dialog_frame;
use crate::ui::components::pagination::render_pagination;
use crate::ui::components::render_spinner;
use crate::ui::components::table::{Column, render_table};
use crate::ui::input::SearchInput;
use crate::ui::intake::{BeneficiaryIntake, IntakeEvent};
use crate::ui::labels;

const PAGE_SIZE: u64 = 5;

const COLUMNS: [Column<SuspendedBeneficiary>; 2] = [
	Column {
		title: labels::BENEFICIARY_NAME,
		render: |record| record.beneficiary.name.clone(),
	},
	Column {
		title: labels::BENEFICIARY_NATIONAL_ID,
		render: |record| record.beneficiary.national_id.clone(),
	},
];

pub struct SuspendedBeneficiariesScreen {
	api: Arc<ApiClient>,
	search: SearchInput,
	pub list: ListView<SuspendedBeneficiary>,
	pub intake: Option<BeneficiaryIntake>,
}

impl SuspendedBeneficiariesScreen {
	pub fn new(api: Arc<ApiClient>) -> Self {
		let fetch_api = Arc::clone(&api);
		let list = ListView::new(PAGE_SIZE, None, move |request| {
			fetch_api.list_suspended_beneficiaries(request)
		});
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
			KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				self.intake = Some(BeneficiaryIntake::for_api(&self.api));
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
		if let Some(intake) = &mut self.intake {
			intake.tick(now);
		}
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
		let [header, search, table, pages] = Layout::vertical([
			Constraint::Length(1),
			Constraint::Length(3),
			Constraint::Fill(1),
			Constraint::Length(1),
		])
		.areas(area);

		let [_title, spinner] =
			Layout::horizontal([Constraint::Fill(1), Constraint::Length(2)]).areas(header);
		render_spinner(frame, spinner, throbber, self.list.is_loading());

		self.search.render(
			frame,
			search,
			labels::BENEFICIARIES_SCREEN,
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
			let inner = dialog_frame(frame, area, labels::ADD_BENEFICIARY_TITLE);
			intake.render(frame, inner);
		}
	}
}
