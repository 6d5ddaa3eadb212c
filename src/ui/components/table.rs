//! Generic tabular renderer.
//!
//! A view supplies an ordered slice of entities and a statically typed
//! list of `{title, render}` column descriptors; the renderer produces
//! one header cell per descriptor and one row per entity. Sorting,
//! filtering, and selection policy stay with the caller.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

pub const HIGHLIGHT_SYMBOL: &str = "▶ ";

/// One column: a header title and a cell renderer.
pub struct Column<T> {
	pub title: &'static str,
	pub render: fn(&T) -> String,
}

/// Render a bordered table for `items` using the column descriptors.
/// `state` carries the caller's row highlight, if any.
pub fn render_table<T>(
	frame: &mut Frame,
	area: Rect,
	title: Option<&str>,
	columns: &[Column<T>],
	items: &[T],
	state: &mut TableState,
) {
	let mut block = Block::default()
		.borders(Borders::ALL)
		.border_set(ratatui::symbols::border::ROUNDED);
	if let Some(title) = title {
		block = block.title(title.to_string());
	}
	let inner = block.inner(area);
	frame.render_widget(block, area);

	let header = Row::new(
		columns
			.iter()
			.map(|column| Cell::from(column.title))
			.collect::<Vec<_>>(),
	)
	.style(Style::default().add_modifier(Modifier::BOLD))
	.height(1)
	.bottom_margin(1);

	let rows = items
		.iter()
		.map(|item| {
			Row::new(
				columns
					.iter()
					.map(|column| Cell::from((column.render)(item)))
					.collect::<Vec<_>>(),
			)
		})
		.collect::<Vec<_>>();

	let widths = vec![Constraint::Fill(1); columns.len().max(1)];
	let table = Table::new(rows, widths)
		.header(header)
		.column_spacing(1)
		.row_highlight_style(
			Style::default()
				.bg(Color::Blue)
				.add_modifier(Modifier::BOLD),
		)
		.highlight_symbol(HIGHLIGHT_SYMBOL);

	frame.render_stateful_widget(table, inner, state);
}
