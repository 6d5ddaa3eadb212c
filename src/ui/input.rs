//! Single-line text input with cursor editing.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Default)]
pub struct SearchInput {
	text: String,
	/// Cursor position in characters, not bytes.
	cursor: usize,
}

impl SearchInput {
	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn clear(&mut self) {
		self.text.clear();
		self.cursor = 0;
	}

	/// Apply a key event. Returns `true` when the text changed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		match key.code {
			KeyCode::Char(ch) => {
				let at = self.byte_index();
				self.text.insert(at, ch);
				self.cursor += 1;
				true
			}
			KeyCode::Backspace => {
				if self.cursor == 0 {
					return false;
				}
				self.cursor -= 1;
				let at = self.byte_index();
				self.text.remove(at);
				true
			}
			KeyCode::Delete => {
				if self.cursor >= self.text.chars().count() {
					return false;
				}
				let at = self.byte_index();
				self.text.remove(at);
				true
			}
			KeyCode::Left => {
				self.cursor = self.cursor.saturating_sub(1);
				false
			}
			KeyCode::Right => {
				self.cursor = (self.cursor + 1).min(self.text.chars().count());
				false
			}
			KeyCode::Home => {
				self.cursor = 0;
				false
			}
			KeyCode::End => {
				self.cursor = self.text.chars().count();
				false
			}
			_ => false,
		}
	}

	fn byte_index(&self) -> usize {
		self.text
			.char_indices()
			.nth(self.cursor)
			.map(|(idx, _)| idx)
			.unwrap_or(self.text.len())
	}

	/// Render inside a bordered block, with a placeholder when empty.
	pub fn render(
		&self,
		frame: &mut Frame,
		area: Rect,
		title: &str,
		placeholder: &str,
		focused: bool,
	) {
		let block = Block::default()
			.borders(Borders::ALL)
			.border_set(ratatui::symbols::border::ROUNDED)
			.title(title.to_string());

		let inner = block.inner(area);
		frame.render_widget(block, area);

		if self.text.is_empty() {
			let hint = Paragraph::new(Line::from(placeholder.to_string()))
				.style(Style::default().fg(Color::DarkGray));
			frame.render_widget(hint, inner);
		} else {
			frame.render_widget(Paragraph::new(self.text.as_str()), inner);
		}

		if focused {
			let prefix: String = self.text.chars().take(self.cursor).collect();
			let x = inner.x + prefix.width() as u16;
			frame.set_cursor_position(Position::new(x.min(inner.right()), inner.y));
		}
	}
}

#[cfg(test)]
mod tests {
	use ratatui::crossterm::event::KeyModifiers;

	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	#[test]
	fn typing_reports_a_change_and_cursor_moves_do_not() {
		let mut input = SearchInput::default();
		assert!(input.input(key(KeyCode::Char('a'))));
		assert!(input.input(key(KeyCode::Char('b'))));
		assert!(!input.input(key(KeyCode::Left)));
		assert!(input.input(key(KeyCode::Char('x'))));
		assert_eq!(input.text(), "axb");
	}

	#[test]
	fn editing_handles_multibyte_text() {
		let mut input = SearchInput::default();
		for ch in "شركة".chars() {
			input.input(key(KeyCode::Char(ch)));
		}
		assert!(input.input(key(KeyCode::Backspace)));
		assert_eq!(input.text(), "شرك");
		input.input(key(KeyCode::Home));
		assert!(input.input(key(KeyCode::Delete)));
		assert_eq!(input.text(), "رك");
	}

	#[test]
	fn backspace_at_the_start_is_a_no_op() {
		let mut input = SearchInput::default();
		assert!(!input.input(key(KeyCode::Backspace)));
		assert_eq!(input.text(), "");
	}
}
