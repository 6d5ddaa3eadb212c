use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes for one remote call: transport failure, a non-2xx
/// status (with not-found split out for point lookups), or a body
/// that does not decode.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("request to {url} failed: {source}")]
	Transport {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("{url} returned status {status}")]
	Status { url: String, status: StatusCode },

	#[error("no record matched the requested identifier")]
	NotFound,

	#[error("failed to decode response from {url}: {source}")]
	Decode {
		url: String,
		#[source]
		source: reqwest::Error,
	},
}

impl ApiError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound)
	}
}
