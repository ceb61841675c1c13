//! # studymate
//!
//! Terminal study companion: a dashboard of quiz progress and a study view
//! for picking a chapter, configuring quiz generation and asking the tutor.
//!
//! This crate contains the session state model, pure view models for both
//! screens, the typed HTTP client for the StudyMate backend, and the
//! interactive shell that hosts them. The `studymate` binary wires these
//! together with configuration and logging.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod net;
pub mod pages;
pub mod shell;
pub mod state;
