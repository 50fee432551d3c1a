// src/error/types.rs
use crate::domain::DomainError;
use crate::integrations::pokeapi::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Failure while talking to the upstream PokeAPI catalog.
    ///
    /// Covers transport failures, upstream HTTP error responses and
    /// validation failures on otherwise well-formed responses. A response
    /// failure carries the upstream status and body; transport and
    /// validation failures carry neither.
    #[error("Error occurred during PokeAPI call: {message}")]
    Catalog {
        message: String,
        status: Option<u16>,
        body: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Not enough Pokemon available to create a battle")]
    InsufficientCatalog,

    #[error("Battle not found with id: {0}")]
    BattleNotFound(i64),
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let (status, body) = match &err {
            FetchError::UpstreamStatus { status, body, .. } => {
                (Some(*status), Some(body.clone()))
            }
            FetchError::Connection { .. } | FetchError::Decode { .. } => (None, None),
        };
        AppError::Catalog {
            message: err.to_string(),
            status,
            body,
            source: Some(Box::new(err)),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
