//! Error types for Bargain Wala

use thiserror::Error;

/// Main error type for Bargain Wala
#[derive(Error, Debug)]
pub enum BargainError {
    // Price input errors
    #[error("Price is empty")]
    EmptyPrice,

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Price must not be negative: {0}")]
    NegativePrice(String),

    #[error("Retail price must be positive: {0}")]
    NonPositiveRetail(String),

    #[error("Price exceeds the maximum of {max}: {price}")]
    PriceTooLarge { price: String, max: String },

    // Item errors
    #[error("Product name is empty")]
    EmptyProductName,

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Product not found in catalog: {0}")]
    ProductNotFound(String),

    // Negotiation errors
    #[error("Item is already negotiating: {0}")]
    AlreadyNegotiating(String),

    #[error("Invalid negotiation state transition: {0}")]
    InvalidStateTransition(String),

    // Configuration errors
    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Bargain Wala operations
pub type Result<T> = std::result::Result<T, BargainError>;
