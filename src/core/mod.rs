//! Core business logic - framework-agnostic organization, product, and order
//! operations over a SeaORM connection.

pub mod order;
pub mod organization;
pub mod pagination;
pub mod product;

use crate::errors::{Error, Result};

/// Minimum length for free-text request fields (name, category, ...).
const MIN_TEXT_LEN: usize = 3;

/// Validates a free-text request field: trimmed, non-empty, at least three
/// characters. Returns the trimmed value that gets stored.
pub(crate) fn validate_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: format!("{field} cannot be empty"),
        });
    }

    if trimmed.chars().count() < MIN_TEXT_LEN {
        return Err(Error::Validation {
            message: format!("{field} must be at least {MIN_TEXT_LEN} characters"),
        });
    }

    Ok(trimmed.to_string())
}
