//! One module per screen, each owning its own list synchronizer.

mod companies;
mod company_detail;
mod suspended_beneficiaries;
mod suspended_employees;

pub use companies::CompaniesScreen;
pub use company_detail::CompanyDetail;
pub use suspended_beneficiaries::SuspendedBeneficiariesScreen;
pub use suspended_employees::SuspendedEmployeesScreen;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::api::types::CompanyCategory;

/// Category switcher shared by the company and employee screens.
pub(crate) fn render_category_tabs(
	frame: &mut Frame,
	area: Rect,
	active: CompanyCategory,
	installation_label: &str,
	sales_label: &str,
) {
	let selected = Style::default()
		.fg(Color::White)
		.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
	let idle = Style::default().fg(Color::DarkGray);

	let style_for = |category: CompanyCategory| {
		if category == active { selected } else { idle }
	};

	let line = Line::from(vec![
		Span::styled(installation_label.to_string(), style_for(CompanyCategory::Installation)),
		Span::raw("   "),
		Span::styled(sales_label.to_string(), style_for(CompanyCategory::Sales)),
	]);
	frame.render_widget(Paragraph::new(line), area);
}
