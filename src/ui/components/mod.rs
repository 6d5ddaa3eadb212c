pub mod pagination;
pub mod table;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};

/// Spinner shown while a fetch is in flight.
pub fn render_spinner(frame: &mut Frame, area: Rect, state: &ThrobberState, loading: bool) {
	if !loading || area.width == 0 || area.height == 0 {
		return;
	}
	let spinner = Throbber::default().style(Style::default().fg(Color::Yellow));
	let span = spinner.to_symbol_span(state);
	frame.render_widget(Paragraph::new(Line::from(span)), area);
}

/// Clear a centered region and draw a bordered dialog frame, returning
/// the inner area for the caller's content.
pub fn dialog_frame(frame: &mut Frame, area: Rect, title: &str) -> Rect {
	let dialog = centered_rect(area, 80, 80);
	frame.render_widget(Clear, dialog);
	let block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED)
		.title(title.to_string());
	let inner = block.inner(dialog);
	frame.render_widget(block, dialog);
	inner
}

/// Footer line of key hints.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &str) {
	frame.render_widget(
		Paragraph::new(Line::from(hints.to_string())).style(Style::default().fg(Color::DarkGray)),
		area,
	);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
	let width = area.width * percent_x / 100;
	let height = area.height * percent_y / 100;
	Rect {
		x: area.x + (area.width.saturating_sub(width)) / 2,
		y: area.y + (area.height.saturating_sub(height)) / 2,
		width,
		height,
	}
}
