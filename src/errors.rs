//! Unified error types and result handling.
//!
//! Every failure in the crate flows through [`Error`]. Reference failures keep
//! the exact messages the API contract exposes ("Invalid Order ID",
//! "An order cannot reference itself", ...) so the transport layer can surface
//! them verbatim. All errors are terminal for the request that raised them;
//! nothing in the crate retries.

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// A request field failed validation before any store logic ran
    #[error("Validation failed: {message}")]
    Validation {
        /// What was wrong with the field
        message: String,
    },

    /// No live organization with this id
    #[error("Organization not found")]
    OrganizationNotFound {
        /// The id that did not resolve
        id: i64,
    },

    /// No live product with this id
    #[error("Product not found")]
    ProductNotFound {
        /// The id that did not resolve
        id: i64,
    },

    /// No live order with this id
    #[error("Order not found")]
    OrderNotFound {
        /// The id that did not resolve
        id: i64,
    },

    /// An id in a request's `orders` list did not resolve to a live order
    #[error("Invalid Order ID")]
    InvalidOrderReference,

    /// A `product_id` in a request's line items did not resolve to a live product
    #[error("Invalid Product ID")]
    InvalidProductReference,

    /// An order update tried to reference the order being updated
    #[error("An order cannot reference itself")]
    SelfReference {
        /// The order id that referenced itself
        id: i64,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Datastore failure, propagated as-is
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Whether this error means "the addressed record does not exist".
    ///
    /// Transports map these to 404; every other request error maps to 400.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::OrganizationNotFound { .. }
                | Self::ProductNotFound { .. }
                | Self::OrderNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    // The transport surfaces these strings verbatim; they are part of the
    // API contract.
    #[test]
    fn test_reference_error_messages() {
        assert_eq!(Error::InvalidOrderReference.to_string(), "Invalid Order ID");
        assert_eq!(
            Error::InvalidProductReference.to_string(),
            "Invalid Product ID"
        );
        assert_eq!(
            Error::SelfReference { id: 1 }.to_string(),
            "An order cannot reference itself"
        );
        assert_eq!(
            Error::OrderNotFound { id: 1 }.to_string(),
            "Order not found"
        );
    }

    #[test]
    fn test_not_found_classification() {
        assert!(Error::OrganizationNotFound { id: 1 }.is_not_found());
        assert!(Error::ProductNotFound { id: 1 }.is_not_found());
        assert!(Error::OrderNotFound { id: 1 }.is_not_found());
        assert!(!Error::InvalidOrderReference.is_not_found());
        assert!(!Error::SelfReference { id: 1 }.is_not_found());
    }
}
