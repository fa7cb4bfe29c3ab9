pub mod enums;
pub mod error;
pub mod filter;
pub mod records;
pub mod snapshot;

// Re-export the core types to provide a clean public API.
pub use enums::{EmployeeStatus, ExpenseCategory, PaymentStatus, PipelineStage, RevenueCategory};
pub use error::CoreError;
pub use filter::{DateRange, FilterSelection};
pub use records::{
    CashRecord, ExpenseRecord, HeadcountRecord, PipelineOpportunity, RevenueRecord,
};
pub use snapshot::DataSnapshot;
