//! Session and study state.
//!
//! DESIGN
//! ======
//! State is split by concern (`busy`, `quiz_form`, `study`, `session`) so
//! the page builders can depend on small focused models. The shell owns a
//! single [`session::SessionState`] and passes it by reference; there are
//! no globals.

pub mod busy;
pub mod quiz_form;
pub mod session;
pub mod study;

#[cfg(test)]
pub(crate) mod test_helpers;
