//! Error kinds the core recognizes (spec §7).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PilotError {
    /// Grid dimensions out of range, pilot position off-grid, `v_max`
    /// non-positive — fatal for the turn, the driver emits zero
    /// acceleration.
    #[error("invalid observation: {0}")]
    InvalidObservation(String),

    /// A* exhausted the open set without reaching the goal. Recovered
    /// by the §4.8 relaxation fallback where possible. Fuel exhaustion
    /// on every branch also surfaces this way.
    #[error("no path to goal")]
    NoPath,

    /// Even with opponents relaxed away, no successor of the start
    /// state is legal.
    #[error("no legal move from the start state")]
    NoLegalMove,
}
