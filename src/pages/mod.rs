//! Screen view models and their text rendering.
//!
//! Each page is a pure function of state: `build_*` produces a view model
//! that tests can inspect, `render_*` lays it out for the terminal. Pages
//! never issue requests.

pub mod dashboard;
pub mod study;
