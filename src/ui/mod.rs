//! Terminal front end: screens, shared components, and the event loop.

pub mod app;
pub mod components;
pub mod input;
pub mod intake;
pub mod labels;
mod runtime;
pub mod views;

pub use runtime::run;
