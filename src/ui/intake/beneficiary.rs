//! Beneficiary intake: look up a beneficiary by national identifier,
//! show the matched record, and post a suspension on confirm.
//!
//! The identifier field is debounced like every other search input. A
//! not-found lookup clears the bound record and shows a notice instead
//! of an error; confirming with no bound record sends nothing.

use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use chrono::Local;
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tracing::error;

use crate::api::types::{Beneficiary, NewSuspendedBeneficiary, SuspendedBeneficiary};
use crate::api::{ApiClient, ApiError};
use crate::query::sync::DEBOUNCE_QUIET;
use crate::query::worker::FetchRuntime;
use crate::ui::components::render_hints;
use crate::ui::input::SearchInput;
use crate::ui::intake::IntakeEvent;
use crate::ui::labels;

pub struct BeneficiaryIntake {
	input: SearchInput,
	pending_since: Option<Instant>,
	last_lookup: Option<String>,
	lookup: FetchRuntime<String, Beneficiary>,
	submit: FetchRuntime<NewSuspendedBeneficiary, SuspendedBeneficiary>,
	beneficiary: Option<Beneficiary>,
	not_found: bool,
	submitting: bool,
}

impl BeneficiaryIntake {
	pub fn new<L, S>(lookup: L, submit: S) -> Self
	where
		L: Fn(&String) -> Result<Beneficiary, ApiError> + Send + 'static,
		S: Fn(&NewSuspendedBeneficiary) -> Result<SuspendedBeneficiary, ApiError> + Send + 'static,
	{
		Self {
			input: SearchInput::default(),
			pending_since: None,
			last_lookup: None,
			lookup: FetchRuntime::spawn(lookup),
			submit: FetchRuntime::spawn(submit),
			beneficiary: None,
			not_found: false,
			submitting: false,
		}
	}

	pub fn for_api(api: &Arc<ApiClient>) -> Self {
		let lookup_api = Arc::clone(api);
		let submit_api = Arc::clone(api);
		Self::new(
			move |national_id: &String| lookup_api.beneficiary_by_national_id(national_id),
			move |payload: &NewSuspendedBeneficiary| {
				submit_api.suspend_beneficiary(payload.beneficiary_id, payload.suspended_at)
			},
		)
	}

	pub fn beneficiary(&self) -> Option<&Beneficiary> {
		self.beneficiary.as_ref()
	}

	pub fn not_found(&self) -> bool {
		self.not_found
	}

	pub fn has_submitted(&self) -> bool {
		self.submit.has_issued()
	}

	/// Handle a key. Enter confirms; everything else edits the
	/// identifier field.
	pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
		if key.code == KeyCode::Enter {
			self.confirm();
			return;
		}
		if self.input.input(key) {
			self.pending_since = Some(now);
		}
	}

	/// Issue the debounced point lookup once the field goes quiet.
	pub fn tick(&mut self, now: Instant) {
		let Some(since) = self.pending_since else {
			return;
		};
		if now.duration_since(since) < DEBOUNCE_QUIET {
			return;
		}
		self.pending_since = None;

		let national_id = self.input.text().trim().to_string();
		if national_id.is_empty() || self.last_lookup.as_deref() == Some(&national_id) {
			return;
		}
		self.last_lookup = Some(national_id.clone());
		self.lookup.issue(national_id);
	}

	/// Drain lookup and submission results.
	pub fn pump(&mut self) -> Option<IntakeEvent> {
		loop {
			match self.lookup.try_recv() {
				Ok(result) => {
					if !self.lookup.matches_latest(result.id) {
						continue;
					}
					self.lookup.record_completion();
					match result.outcome {
						Ok(found) => {
							self.beneficiary = Some(found);
							self.not_found = false;
						}
						Err(err) => {
							if !err.is_not_found() {
								error!("beneficiary lookup failed: {err}");
							}
							self.beneficiary = None;
							self.not_found = true;
						}
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
							error!("failed to suspend beneficiary: {err}");
							self.submitting = false;
						}
					}
				}
				Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
			}
		}
		None
	}

	/// Submit the suspension. Rejected client-side while no record is
	/// bound, so a not-found lookup can never produce a request.
	fn confirm(&mut self) {
		if self.submitting {
			return;
		}
		let Some(beneficiary) = &self.beneficiary else {
			return;
		};
		self.submitting = true;
		self.submit.issue(NewSuspendedBeneficiary {
			beneficiary_id: beneficiary.id,
			suspended_at: Local::now().date_naive(),
		});
	}

	pub fn render(&self, frame: &mut Frame, area: Rect) {
		let [input_area, data_title, fields, notice, hints] = Layout::vertical([
			Constraint::Length(3),
			Constraint::Length(1),
			Constraint::Length(4),
			Constraint::Length(1),
			Constraint::Length(1),
		])
		.areas(area);

		self.input.render(
			frame,
			input_area,
			labels::BENEFICIARY_NATIONAL_ID,
			labels::ENTER_NATIONAL_ID,
			true,
		);

		frame.render_widget(Paragraph::new(labels::BENEFICIARY_DATA), data_title);

		let blank = String::new();
		let (name, phone, national_id, nationality) = match &self.beneficiary {
			Some(found) => (&found.name, &found.phone, &found.national_id, &found.nationality),
			None => (&blank, &blank, &blank, &blank),
		};
		let lines = vec![
			Line::from(format!("{}: {name}", labels::BENEFICIARY_NAME)),
			Line::from(format!("{}: {phone}", labels::PHONE)),
			Line::from(format!("{}: {national_id}", labels::NATIONAL_ID)),
			Line::from(format!("{}: {nationality}", labels::NATIONALITY)),
		];
		frame.render_widget(Paragraph::new(lines), fields);

		if self.not_found {
			frame.render_widget(
				Paragraph::new(labels::BENEFICIARY_NOT_FOUND)
					.style(Style::default().fg(Color::Red)),
				notice,
			);
		}

		render_hints(frame, hints, "Enter: submit   Esc: cancel");
	}
}

#[cfg(test)]
mod tests {
	use std::thread;
	use std::time::Duration;

	use chrono::NaiveDate;
	use ratatui::crossterm::event::KeyModifiers;

	use super::*;

	fn sample_beneficiary() -> Beneficiary {
		Beneficiary {
			id: 5,
			name: "أحمد".into(),
			national_id: "1012345678".into(),
			phone: "0551234567".into(),
			nationality: "سعودي".into(),
		}
	}

	fn sample_record() -> SuspendedBeneficiary {
		SuspendedBeneficiary {
			id: 1,
			suspended_at: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
			beneficiary: sample_beneficiary(),
		}
	}

	fn type_text(intake: &mut BeneficiaryIntake, text: &str, now: Instant) {
		for ch in text.chars() {
			intake.handle_key(
				KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE),
				now,
			);
		}
	}

	fn settle(intake: &mut BeneficiaryIntake) -> Option<IntakeEvent> {
		let deadline = Instant::now() + Duration::from_secs(2);
		loop {
			if let Some(event) = intake.pump() {
				return Some(event);
			}
			if intake.beneficiary.is_some() || intake.not_found {
				return None;
			}
			assert!(Instant::now() < deadline, "lookup did not settle in time");
			thread::sleep(Duration::from_millis(5));
		}
	}

	#[test]
	fn quiescent_identifier_triggers_one_lookup() {
		let base = Instant::now();
		let mut intake = BeneficiaryIntake::new(
			|national_id: &String| {
				assert_eq!(national_id, "1012345678");
				Ok(sample_beneficiary())
			},
			|_payload| Ok(sample_record()),
		);

		type_text(&mut intake, "1012345678", base);
		intake.tick(base + Duration::from_millis(100));
		assert!(!intake.lookup.has_issued(), "still inside the quiet window");

		intake.tick(base + Duration::from_millis(600));
		settle(&mut intake);
		assert_eq!(intake.beneficiary().map(|found| found.id), Some(5));
		assert!(!intake.not_found());
	}

	#[test]
	fn missing_identifier_raises_the_not_found_notice() {
		let base = Instant::now();
		let mut intake = BeneficiaryIntake::new(
			|_national_id: &String| Err(ApiError::NotFound),
			|_payload| Ok(sample_record()),
		);

		type_text(&mut intake, "999", base);
		intake.tick(base + Duration::from_millis(600));
		settle(&mut intake);
		assert!(intake.not_found());
		assert!(intake.beneficiary().is_none());
	}

	#[test]
	fn confirming_without_a_bound_record_sends_nothing() {
		let base = Instant::now();
		let mut intake = BeneficiaryIntake::new(
			|_national_id: &String| Err(ApiError::NotFound),
			|_payload| Ok(sample_record()),
		);

		type_text(&mut intake, "999", base);
		intake.tick(base + Duration::from_millis(600));
		settle(&mut intake);

		intake.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), base);
		assert!(!intake.has_submitted());
	}

	#[test]
	fn confirming_a_bound_record_commits() {
		let base = Instant::now();
		let mut intake = BeneficiaryIntake::new(
			|_national_id: &String| Ok(sample_beneficiary()),
			|payload: &NewSuspendedBeneficiary| {
				assert_eq!(payload.beneficiary_id, 5);
				Ok(sample_record())
			},
		);

		type_text(&mut intake, "1012345678", base);
		intake.tick(base + Duration::from_millis(600));
		settle(&mut intake);

		intake.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), base);
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
