//! # Finsight Analytics Engine
//!
//! This crate turns the filtered raw record sets into every derived
//! time-series and point-in-time KPI the dashboard shows: monthly cash
//! flow, runway, the P&L summary with margins, pipeline valuation,
//! per-team productivity, and the AR risk buckets.
//!
//! ## Architectural Principles
//!
//! - **Pure logic crate:** no I/O, no clock, no global state. It depends
//!   only on `core-types` and computes over an immutable `DataSnapshot`
//!   passed in by reference.
//! - **Stateless calculation:** `MetricsEngine` is a stateless calculator.
//!   Any filter change simply recomputes the whole `DashboardReport` from
//!   the current selection; there is no incremental update to invalidate.
//!
//! ## Public API
//!
//! - `MetricsEngine`: the main struct that contains the calculation logic.
//! - `DashboardReport`: the standardized struct holding every computed metric.
//! - The per-component modules (`aggregate`, `cashflow`, `pnl`, ...) for
//!   callers that need a single metric rather than the full report.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod cashflow;
pub mod engine;
pub mod filter;
pub mod kpi;
pub mod pnl;
pub mod pipeline;
pub mod productivity;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{DimensionTotal, DimensionedMonthlyTotal, MonthlyTotal};
pub use cashflow::{MonthlyCashFlow, RunwaySummary};
pub use engine::MetricsEngine;
pub use kpi::{ArSummary, KpiSummary};
pub use pipeline::{PipelineSummary, StageTotal};
pub use pnl::{PnlRow, PnlStatement};
pub use productivity::TeamProductivity;
pub use report::DashboardReport;
