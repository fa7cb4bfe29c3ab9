use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Record {id}: negative reporting amount {amount}")]
    NegativeAmount { id: String, amount: String },

    #[error("Record {id}: date {date} is outside the declared coverage window {start}..={end}")]
    DateOutOfCoverage {
        id: String,
        date: chrono::NaiveDate,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Opportunity {id}: probability {probability} is inconsistent with stage {stage}")]
    InvalidProbability {
        id: String,
        probability: String,
        stage: String,
    },

    #[error("Duplicate cash record for country {country} at {date}")]
    DuplicateCashRecord {
        country: String,
        date: chrono::NaiveDate,
    },
}
