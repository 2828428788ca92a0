use thiserror::Error;

/// Schema and value problems found while building a [`super::model::SessionTable`].
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset has no '{0}' column")]
    MissingColumn(String),

    #[error("row {row}: '{value}' is not a valid session date")]
    InvalidDate { row: usize, value: String },
}

/// Raised when a chart asks for a column the loaded table does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("column '{0}' not present in table")]
    MissingColumn(String),
}
