//! Error taxonomy for the portfolio
//!
//! Store failures travel up to the gallery controller, which turns them into
//! a visible error state. The error is `Clone` so it can ride inside an
//! iced `Message` when a fetch completes.

use thiserror::Error;

/// Everything that can go wrong while loading or interacting with a gallery
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortfolioError {
    /// The document could not be fetched (missing or unreadable source)
    #[error("network error: {0}")]
    Network(String),

    /// The document was fetched but does not have the expected shape
    #[error("malformed data: {0}")]
    DataShape(String),

    /// A requested photographer or media subset does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// An operation was attempted on a gallery that is not ready for it
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl PortfolioError {
    /// Message shown to the user in place of the page content
    pub fn user_message(&self) -> &'static str {
        match self {
            PortfolioError::Network(_) => {
                "The portfolio data could not be loaded. Please try again later."
            }
            PortfolioError::DataShape(_) => "The portfolio data is damaged and cannot be displayed.",
            PortfolioError::NotFound(_) => "This photographer could not be found.",
            PortfolioError::InvalidState(_) => "This action is not available right now.",
        }
    }
}

/// Result alias used across the crate
pub type PortfolioResult<T> = Result<T, PortfolioError>;
