//! Terminal console for the sales/installation suspension registry.
//!
//! All persistent state lives behind a remote HTTP API; the crate's
//! core is the search/paginate/fetch synchronization protocol in
//! [`query`], which every list screen instantiates against one remote
//! collection.

pub mod api;
pub mod app_dirs;
pub mod cli;
pub mod export;
pub mod logging;
pub mod query;
pub mod settings;
pub mod ui;
