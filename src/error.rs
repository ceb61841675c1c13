//! Shared error classification.

/// Grepable error code and retryable flag for user-facing notices.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
