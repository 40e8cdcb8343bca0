//! Pipeline operations on a single order.
//!
//! Handled by [`Document::handle_action`](doc_framework::Document::handle_action)
//! in [`entity`](super::entity).

use crate::model::OrderStatus;
use std::str::FromStr;

/// How a status advance treats a stored status that moved since the caller
/// observed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyMode {
    /// The write lands unless it would move the order backwards. Two staff
    /// members advancing the same order both write; the last one wins.
    #[default]
    LastWriteWins,
    /// The write lands only if the stored status still equals the observed one.
    ExpectPrior,
}

impl FromStr for ConcurrencyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-write-wins" | "lww" => Ok(ConcurrencyMode::LastWriteWins),
            "expect-prior" | "conditional" => Ok(ConcurrencyMode::ExpectPrior),
            other => Err(format!("Unknown concurrency mode: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move to the successor of `observed`.
    Advance {
        observed: OrderStatus,
        mode: ConcurrencyMode,
    },
    /// Close an open order as part of a table settlement.
    ///
    /// # Errors
    /// Fails with [`OrderError::NotOpen`](super::OrderError::NotOpen) so that
    /// the enclosing batch is rejected as a whole.
    Settle,
    /// Cancel an order the kitchen has not finished.
    Cancel,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Advanced(AdvanceOutcome),
    Settled { from: OrderStatus },
    /// `false` when the order was already past the point of cancelling.
    Cancelled(bool),
}

/// What an advance request did to the stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Advanced { from: OrderStatus, to: OrderStatus },
    /// The observed status has no successor. Nothing was written.
    Terminal,
    /// The write would have lowered the stored status. Nothing was written.
    Stale { current: OrderStatus },
    /// The stored status differs from the observed one. Nothing was written.
    Conflict { current: OrderStatus },
}

impl AdvanceOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, AdvanceOutcome::Advanced { .. })
    }
}
