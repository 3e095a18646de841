use thiserror::Error;

pub type PageResult<T> = Result<T, PageError>;

#[derive(Error, Debug, Clone)]
pub enum PageError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate block id '{id}': catalog ids must be unique")]
    DuplicateBlockId { id: String },

    #[error("Block '{block}' has an empty '{field}' template")]
    EmptyTemplate { block: String, field: String },

    #[error("Invalid variable name '{name}' declared by block '{block}': must be dotted word segments (e.g. customer.name)")]
    InvalidVariableName { block: String, name: String },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<serde_json::Error> for PageError {
    fn from(err: serde_json::Error) -> Self {
        PageError::DeserializationError(err.to_string())
    }
}
