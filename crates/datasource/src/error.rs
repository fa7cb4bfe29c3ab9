use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Loaded data failed validation: {0}")]
    Invalid(#[from] core_types::CoreError),

    #[error("Unknown currency {0}; only the fixed rate table is supported")]
    UnknownCurrency(String),
}
