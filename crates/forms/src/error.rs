use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("record could not be loaded into the form: {0}")]
    InvalidRecord(String),
}
