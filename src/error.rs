// error: Crate error type

use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,
    #[error("Not signed in: log in before starting a quote")]
    NotAuthenticated,
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("Failed to create PDF: {0}")]
    PdfError(String),
    #[error("Failed to read quote file: {0}")]
    QuoteFileError(String),
    #[error("Invalid item '{0}': expected DESCRIPTION:QUANTITY:PRICE")]
    ItemSyntax(String),
    #[error("Failed to read company config: {0}")]
    ConfigError(String),
    #[error("Invalid date format: {0}")]
    DateError(String),
    #[error("Failed to load logo: {0}")]
    LogoError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
