//! Uniform response envelope.
//!
//! Every payload leaving the system is wrapped as
//! `{success, message, data, meta}`; `data` and `meta` are omitted from the
//! serialized form when absent. This module is purely presentational - it
//! never touches the database.

use crate::core::pagination::PageMeta;
use serde::Serialize;

/// The envelope every response is shipped in
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable outcome description
    pub message: String,
    /// The payload, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Pagination metadata, on listing responses only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a successful payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: None,
        }
    }

    /// Wraps a successful listing payload with its pagination metadata.
    pub fn ok_with_meta(message: impl Into<String>, data: T, meta: PageMeta) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    /// Wraps a failure; the message carries the error description.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            meta: None,
        }
    }
}

/// Service identity served at the root route
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    /// Package name
    pub service: &'static str,
    /// Package version
    pub version: &'static str,
    /// One-line package description
    pub description: &'static str,
}

impl ServiceInfo {
    /// Builds the identity of the running build from compile-time metadata.
    #[must_use]
    pub const fn current() -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
        }
    }
}
