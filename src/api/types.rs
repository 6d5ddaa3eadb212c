//! Wire models for the suspension-registry API.
//!
//! Every entity here is owned by the remote service; the client holds
//! transient copies only and never assigns identifiers itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Partition applied to companies and, derivatively, their employees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyCategory {
	#[default]
	Installation,
	Sales,
}

impl CompanyCategory {
	/// Value used in query strings (`type` / `company_type`).
	pub fn as_query(self) -> &'static str {
		match self {
			Self::Installation => "installation",
			Self::Sales => "sales",
		}
	}

	/// Display label used in tables and the CSV report.
	pub fn display_label(self) -> &'static str {
		match self {
			Self::Installation => "شركة تركيب",
			Self::Sales => "شركة مبيعات",
		}
	}

	pub fn toggled(self) -> Self {
		match self {
			Self::Installation => Self::Sales,
			Self::Sales => Self::Installation,
		}
	}
}

/// One page of a remote collection, as every list endpoint returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
	pub data: Vec<T>,
	pub total: u64,
}

impl<T> Page<T> {
	/// Wrap an unpaginated listing so it can flow through the same channels.
	pub fn whole(data: Vec<T>) -> Self {
		let total = data.len() as u64;
		Self { data, total }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Company {
	pub id: u64,
	pub name: String,
	pub commercial_number: String,
	pub unified_number: String,
	#[serde(rename = "type")]
	pub category: CompanyCategory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Employee {
	pub id: u64,
	pub name: String,
	pub national_id: String,
	pub job_number: String,
	pub nationality: String,
	pub phone: String,
	#[serde(default)]
	pub company_id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Beneficiary {
	pub id: u64,
	pub name: String,
	pub national_id: String,
	pub phone: String,
	pub nationality: String,
}

/// Company reference embedded in a suspended-employee record.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyRef {
	pub id: u64,
	pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeWithCompany {
	pub id: u64,
	pub name: String,
	pub national_id: String,
	pub job_number: String,
	pub nationality: String,
	pub phone: String,
	pub company: CompanyRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuspendedEmployee {
	pub id: u64,
	pub suspended_at: NaiveDate,
	pub employee: EmployeeWithCompany,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuspendedBeneficiary {
	pub id: u64,
	pub suspended_at: NaiveDate,
	pub beneficiary: Beneficiary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceProvider {
	pub id: u64,
	pub name: String,
	pub id_number: String,
	pub code: String,
}

/// Creation payload for a suspended-employee record.
#[derive(Debug, Clone, Serialize)]
pub struct NewSuspendedEmployee {
	pub employee_id: u64,
	pub suspended_at: NaiveDate,
}

/// Creation payload for a suspended-beneficiary record.
#[derive(Debug, Clone, Serialize)]
pub struct NewSuspendedBeneficiary {
	pub beneficiary_id: u64,
	pub suspended_at: NaiveDate,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn company_category_comes_from_the_type_field() {
		let company: Company = serde_json::from_str(
			r#"{
				"id": 7,
				"name": "شركة البناء الحديث",
				"commercial_number": "CR-1001",
				"unified_number": "700-200",
				"type": "installation"
			}"#,
		)
		.unwrap();
		assert_eq!(company.category, CompanyCategory::Installation);
		assert_eq!(company.category.display_label(), "شركة تركيب");
	}

	#[test]
	fn suspended_employee_embeds_its_company() {
		let page: Page<SuspendedEmployee> = serde_json::from_str(
			r#"{
				"data": [{
					"id": 3,
					"suspended_at": "2025-11-02",
					"employee": {
						"id": 12,
						"name": "سالم",
						"national_id": "1098765432",
						"job_number": "J-44",
						"nationality": "سعودي",
						"phone": "0550000000",
						"company": { "id": 7, "name": "شركة البناء الحديث" }
					}
				}],
				"total": 9
			}"#,
		)
		.unwrap();
		assert_eq!(page.total, 9);
		assert_eq!(page.data[0].employee.company.id, 7);
		assert_eq!(
			page.data[0].suspended_at,
			NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()
		);
	}

	#[test]
	fn creation_payload_uses_calendar_dates() {
		let payload = NewSuspendedBeneficiary {
			beneficiary_id: 5,
			suspended_at: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
		};
		let json = serde_json::to_string(&payload).unwrap();
		assert_eq!(json, r#"{"beneficiary_id":5,"suspended_at":"2026-08-28"}"#);
	}

	#[test]
	fn employee_tolerates_a_missing_company_reference() {
		let employee: Employee = serde_json::from_str(
			r#"{
				"id": 1,
				"name": "نورة",
				"national_id": "1033332222",
				"job_number": "J-9",
				"nationality": "سعودية",
				"phone": "0551112222"
			}"#,
		)
		.unwrap();
		assert_eq!(employee.company_id, None);
	}
}
