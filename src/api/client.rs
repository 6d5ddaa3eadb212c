//! Blocking HTTP client for the suspension-registry service.
//!
//! The base URL is injected at construction so the client can be
//! pointed at any host, including a test double. Calls are expected to
//! run on worker threads, never on the UI thread.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::api::types::{
	Beneficiary, Company, CompanyCategory, Employee, NewSuspendedBeneficiary,
	NewSuspendedEmployee, Page, ServiceProvider, SuspendedBeneficiary, SuspendedEmployee,
};
use crate::query::sync::PageRequest;

/// Upper bound on any single request so a dead server cannot pin a
/// fetch worker forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ApiClient {
	http: Client,
	base_url: String,
}

impl ApiClient {
	pub fn new(base_url: &str) -> Result<Self> {
		let http = Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.context("failed to construct the HTTP client")?;
		Ok(Self {
			http,
			base_url: base_url.trim_end_matches('/').to_string(),
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn url(&self, path: &str) -> String {
		format!("{}/{path}", self.base_url)
	}

	/// Companies of one category, paginated and searched server-side.
	/// The category selects which collection endpoint is queried.
	pub fn list_companies(&self, request: &PageRequest) -> Result<Page<Company>, ApiError> {
		let path = match request.category.unwrap_or_default() {
			CompanyCategory::Installation => "companies_installation",
			CompanyCategory::Sales => "companies_sales",
		};
		let url = self.url(path);
		let builder = self.http.get(&url).query(&[
			("skip", request.skip.to_string()),
			("limit", request.limit.to_string()),
			("search", request.search.clone()),
		]);
		send_json(builder, url)
	}

	/// Unpaginated company listing used by the employee-intake picker.
	pub fn list_companies_for_intake(
		&self,
		category: CompanyCategory,
	) -> Result<Page<Company>, ApiError> {
		let url = self.url("companies");
		let builder = self.http.get(&url).query(&[("type", category.as_query())]);
		send_json(builder, url)
	}

	pub fn list_company_employees(
		&self,
		company_id: u64,
		skip: u64,
		limit: u64,
	) -> Result<Page<Employee>, ApiError> {
		let url = self.url("company_employees");
		let builder = self.http.get(&url).query(&[
			("company_id", company_id.to_string()),
			("skip", skip.to_string()),
			("limit", limit.to_string()),
		]);
		send_json(builder, url)
	}

	/// Full employee roster of one company, for the intake picker.
	pub fn list_all_company_employees(&self, company_id: u64) -> Result<Page<Employee>, ApiError> {
		let url = self.url("company_employees");
		let builder = self
			.http
			.get(&url)
			.query(&[("company_id", company_id.to_string())]);
		send_json(builder, url)
	}

	pub fn list_suspended_employees(
		&self,
		request: &PageRequest,
	) -> Result<Page<SuspendedEmployee>, ApiError> {
		let url = self.url("suspended_employees");
		let builder = self.http.get(&url).query(&[
			(
				"company_type",
				request.category.unwrap_or_default().as_query().to_string(),
			),
			("skip", request.skip.to_string()),
			("limit", request.limit.to_string()),
			("search", request.search.clone()),
		]);
		send_json(builder, url)
	}

	pub fn list_suspended_beneficiaries(
		&self,
		request: &PageRequest,
	) -> Result<Page<SuspendedBeneficiary>, ApiError> {
		let url = self.url("suspended_beneficiaries");
		let builder = self.http.get(&url).query(&[
			("skip", request.skip.to_string()),
			("limit", request.limit.to_string()),
			("search", request.search.clone()),
		]);
		send_json(builder, url)
	}

	/// Point lookup by national identifier; a 404 maps to
	/// [`ApiError::NotFound`] so the intake form can show its notice.
	pub fn beneficiary_by_national_id(&self, national_id: &str) -> Result<Beneficiary, ApiError> {
		let url = self.url(&format!("beneficiaries/{}", national_id.trim()));
		let builder = self.http.get(&url);
		send_json(builder, url)
	}

	pub fn list_service_providers(&self) -> Result<Vec<ServiceProvider>, ApiError> {
		let url = self.url("service_providers");
		let builder = self.http.get(&url);
		send_json(builder, url)
	}

	pub fn suspend_employee(
		&self,
		employee_id: u64,
		suspended_at: NaiveDate,
	) -> Result<SuspendedEmployee, ApiError> {
		let url = self.url("suspended_employees");
		let payload = NewSuspendedEmployee {
			employee_id,
			suspended_at,
		};
		self.post_json(url, &payload)
	}

	pub fn suspend_beneficiary(
		&self,
		beneficiary_id: u64,
		suspended_at: NaiveDate,
	) -> Result<SuspendedBeneficiary, ApiError> {
		let url = self.url("suspended_beneficiaries");
		let payload = NewSuspendedBeneficiary {
			beneficiary_id,
			suspended_at,
		};
		self.post_json(url, &payload)
	}

	fn post_json<B: Serialize, T: DeserializeOwned>(
		&self,
		url: String,
		body: &B,
	) -> Result<T, ApiError> {
		let builder = self.http.post(&url).json(body);
		send_json(builder, url)
	}
}

fn send_json<T: DeserializeOwned>(builder: RequestBuilder, url: String) -> Result<T, ApiError> {
	let response = builder.send().map_err(|source| ApiError::Transport {
		url: url.clone(),
		source,
	})?;
	decode(response, url)
}

fn decode<T: DeserializeOwned>(response: Response, url: String) -> Result<T, ApiError> {
	let status = response.status();
	if status == StatusCode::NOT_FOUND {
		return Err(ApiError::NotFound);
	}
	if !status.is_success() {
		return Err(ApiError::Status { url, status });
	}
	response.json().map_err(|source| ApiError::Decode { url, source })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_loses_its_trailing_slash() {
		let client = ApiClient::new("http://127.0.0.1:8000/").unwrap();
		assert_eq!(client.base_url(), "http://127.0.0.1:8000");
		assert_eq!(
			client.url("service_providers"),
			"http://127.0.0.1:8000/service_providers"
		);
	}
}
