// 6.0.2: result types and errors for engine operations.

use crate::instrument::Instrument;
use crate::order::OrderStatus;
use crate::params::ParamsError;
use crate::state::StateError;
use crate::types::{Cash, InstrumentId, OrderId, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a successfully executed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub execution_price: Price,
    pub fee: Cash,
    /// Instrument state after the trade committed.
    pub instrument: Instrument,
}

/// Outcome of a successfully applied event shock on one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockApplied {
    pub instrument_id: InstrumentId,
    pub shocked_price: Price,
    /// Pre-shock price the instrument will decay back toward.
    pub baseline: Price,
    pub impact_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("quantity must be a positive integer, got {0}")]
    InvalidQuantity(u64),

    #[error("impact of {0}% would drive the price non-positive")]
    InvalidImpact(Decimal),

    #[error("actor is not authorized for admin operations")]
    Unauthorized,

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    State(#[from] StateError),
}
