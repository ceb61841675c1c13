//! Networking modules for the StudyMate backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the configured `reqwest` client, `api` defines the study
//! collaborator contract on top of it, and `types` defines the shared wire
//! schema.

pub mod api;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod test_backend;
