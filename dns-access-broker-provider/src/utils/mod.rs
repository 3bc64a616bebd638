//! Utility modules.

/// Timestamp helpers for SigV4 and credential expirations.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
