use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_types::{PipelineOpportunity, PipelineStage};

use crate::aggregate::{totals_by, DimensionTotal};

/// One funnel step: total opportunity value sitting at a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTotal {
    pub stage: PipelineStage,
    pub total: Decimal,
}

/// Raw and probability-weighted valuation of the sales pipeline.
///
/// The pipeline is not date/filter-scoped in the current design: every
/// opportunity contributes regardless of the active selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub raw_total: Decimal,
    pub weighted_total: Decimal,
    pub closed_total: Decimal,
    /// Ordered by funnel progression, never alphabetically or by magnitude.
    pub by_stage: Vec<StageTotal>,
    pub by_team: Vec<DimensionTotal>,
}

impl PipelineSummary {
    pub fn build(opportunities: &[PipelineOpportunity]) -> Self {
        let raw_total = opportunities.iter().map(|o| o.amount_reporting).sum();
        let weighted_total = opportunities.iter().map(|o| o.weighted_amount()).sum();
        let closed_total = opportunities
            .iter()
            .filter(|o| o.stage == PipelineStage::ClosedWon)
            .map(|o| o.amount_reporting)
            .sum();

        // Fixed funnel order; stages with no opportunities still appear.
        let by_stage = PipelineStage::ALL
            .iter()
            .map(|&stage| StageTotal {
                stage,
                total: opportunities
                    .iter()
                    .filter(|o| o.stage == stage)
                    .map(|o| o.amount_reporting)
                    .sum(),
            })
            .collect();

        let by_team = totals_by(
            opportunities
                .iter()
                .map(|o| (o.team.clone(), o.amount_reporting)),
        );

        Self {
            raw_total,
            weighted_total,
            closed_total,
            by_stage,
            by_team,
        }
    }
}
