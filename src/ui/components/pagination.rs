//! Page-link strip with previous/next actions.
//!
//! A pure function of `{page, page_size, total}`: it renders
//! `ceil(total / page_size)` page links and disables previous/next at
//! the edges. An empty collection renders no links at all.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::query::page::total_pages;
use crate::ui::labels;

/// The page numbers to render, in order. Empty when `total == 0`.
pub fn page_links(total: u64, page_size: u64) -> Vec<u64> {
	(1..=total_pages(total, page_size)).collect()
}

pub fn render_pagination(frame: &mut Frame, area: Rect, page: u64, page_size: u64, total: u64) {
	let pages = total_pages(total, page_size);
	let edge = Style::default().fg(Color::DarkGray);
	let active = Style::default().fg(Color::White);

	let mut spans = Vec::new();
	spans.push(Span::styled(
		labels::PAGE_PREVIOUS,
		if page <= 1 { edge } else { active },
	));
	spans.push(Span::raw("  "));
	for link in page_links(total, page_size) {
		if link == page {
			spans.push(Span::styled(
				format!("[{link}]"),
				Style::default().add_modifier(Modifier::BOLD),
			));
		} else {
			spans.push(Span::raw(format!(" {link} ")));
		}
	}
	spans.push(Span::raw("  "));
	spans.push(Span::styled(
		labels::PAGE_NEXT,
		if pages == 0 || page >= pages { edge } else { active },
	));

	frame.render_widget(Paragraph::new(Line::from(spans)).centered(), area);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ten_records_in_pages_of_four_render_three_links() {
		assert_eq!(page_links(10, 4), vec![1, 2, 3]);
	}

	#[test]
	fn an_empty_collection_renders_no_links() {
		assert!(page_links(0, 5).is_empty());
	}

	#[test]
	fn an_exact_multiple_does_not_gain_a_page() {
		assert_eq!(page_links(8, 4), vec![1, 2]);
	}
}
