use serde::{Deserialize, Serialize};

/// Collection state of a revenue transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

/// Commercial model of a revenue transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevenueCategory {
    Retainer,
    ProjectBased,
    License,
}

/// Top-level expense classification. `Cogs` is split out from everything
/// else when building the P&L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Personnel,
    Marketing,
    Operations,
    Cogs,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Personnel => "Personnel",
            ExpenseCategory::Marketing => "Marketing",
            ExpenseCategory::Operations => "Operations",
            ExpenseCategory::Cogs => "COGS",
        }
    }
}

/// Sales pipeline stage. Declaration order is funnel order (increasing
/// certainty of close), and `Ord` follows declaration order, so funnel
/// presentation must never re-sort alphabetically or by magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PipelineStage {
    Proposal,
    Contract,
    PaymentPending,
    ClosedWon,
}

impl PipelineStage {
    /// All stages in funnel progression order.
    pub const ALL: [PipelineStage; 4] = [
        PipelineStage::Proposal,
        PipelineStage::Contract,
        PipelineStage::PaymentPending,
        PipelineStage::ClosedWon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Proposal => "Proposal",
            PipelineStage::Contract => "Contract",
            PipelineStage::PaymentPending => "Payment Pending",
            PipelineStage::ClosedWon => "Closed Won",
        }
    }
}

/// Employment state. Only `Active` records count toward headcount-derived
/// metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}
