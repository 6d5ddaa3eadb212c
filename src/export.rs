//! CSV report of the company list.
//!
//! The report matches what the back office expects to open in Excel:
//! UTF-8 with a byte-order mark, every field double-quoted, Arabic
//! header row, and the category mapped to its display label.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};

use crate::api::ApiClient;
use crate::api::types::{Company, CompanyCategory};
use crate::query::sync::PageRequest;

const BOM: &str = "\u{feff}";

/// Page size for the one-shot CLI export, which walks the whole
/// filtered collection rather than a single visible page.
const EXPORT_FETCH_LIMIT: u64 = 100;

pub const COMPANY_HEADERS: [&str; 4] = [
	"اسم الشركة",
	"رقم السجل التجاري",
	"الرقم الموحد للمنشأة",
	"النوع",
];

/// Render the company rows as a CSV document, BOM included.
pub fn company_csv(companies: &[Company]) -> Result<String> {
	let mut writer = WriterBuilder::new()
		.quote_style(QuoteStyle::Always)
		.from_writer(Vec::new());

	writer
		.write_record(COMPANY_HEADERS)
		.context("failed to write the CSV header row")?;
	for company in companies {
		writer
			.write_record([
				company.name.as_str(),
				company.commercial_number.as_str(),
				company.unified_number.as_str(),
				company.category.display_label(),
			])
			.context("failed to write a CSV company row")?;
	}

	let bytes = writer
		.into_inner()
		.map_err(|err| anyhow::anyhow!("failed to flush the CSV writer: {err}"))?;
	let body = String::from_utf8(bytes).context("CSV output was not valid UTF-8")?;
	Ok(format!("{BOM}{body}"))
}

/// Write the report to disk.
pub fn write_company_csv(path: &Path, companies: &[Company]) -> Result<()> {
	let document = company_csv(companies)?;
	fs::write(path, document)
		.with_context(|| format!("failed to write the CSV report to {}", path.display()))
}

/// One-shot CLI export: walk every page of the filtered company list
/// and write the full report.
pub fn export_companies(
	api: &ApiClient,
	category: CompanyCategory,
	search: &str,
	path: &Path,
) -> Result<()> {
	let search = search.trim().to_lowercase();
	let mut companies = Vec::new();
	let mut skip = 0;
	loop {
		let request = PageRequest {
			skip,
			limit: EXPORT_FETCH_LIMIT,
			search: search.clone(),
			category: Some(category),
		};
		let page = api
			.list_companies(&request)
			.context("failed to fetch a company page for export")?;
		let fetched = page.data.len() as u64;
		companies.extend(page.data);
		skip += fetched;
		if fetched == 0 || skip >= page.total {
			break;
		}
	}
	write_company_csv(path, &companies)
}

#[cfg(test)]
mod tests {
	use crate::api::types::CompanyCategory;

	use super::*;

	fn company(id: u64, name: &str, category: CompanyCategory) -> Company {
		Company {
			id,
			name: name.to_string(),
			commercial_number: format!("CR-{id}"),
			unified_number: format!("700-{id}"),
			category,
		}
	}

	#[test]
	fn two_rows_produce_three_lines() {
		let companies = vec![
			company(1, "شركة البناء الحديث", CompanyCategory::Installation),
			company(2, "شركة الأفق للمبيعات", CompanyCategory::Sales),
		];
		let document = company_csv(&companies).unwrap();
		assert_eq!(document.lines().count(), 3);
	}

	#[test]
	fn document_starts_with_a_byte_order_mark() {
		let document = company_csv(&[]).unwrap();
		assert!(document.starts_with('\u{feff}'));
		assert_eq!(document.lines().count(), 1, "header only");
	}

	#[test]
	fn every_field_is_double_quoted() {
		let companies = vec![company(9, "Acme", CompanyCategory::Installation)];
		let document = company_csv(&companies).unwrap();
		let row = document.lines().nth(1).unwrap();
		assert_eq!(row, r#""Acme","CR-9","700-9","شركة تركيب""#);
	}

	#[test]
	fn category_maps_to_its_display_label() {
		let companies = vec![company(3, "Acme", CompanyCategory::Sales)];
		let document = company_csv(&companies).unwrap();
		assert!(document.contains("شركة مبيعات"));
		assert!(!document.contains("sales"));
	}
}
