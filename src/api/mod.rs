//! Remote API surface: wire models, the blocking client, and the
//! error taxonomy shared by every fetch worker.

mod client;
mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
