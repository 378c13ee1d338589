// 7.0 api.rs: transport-neutral command and query surface. an external
// transport (socket server, test harness, REPL) builds these payloads and
// hands them to the hub; nothing here knows about wire formats.

use crate::engine::{EngineError, OrderResult};
use crate::instrument::Instrument;
use crate::logs::{ActionRecord, EventRecord, OrderRecord};
use crate::params::ParamUpdate;
use crate::seat::Seat;
use crate::state::StateError;
use crate::types::{InstrumentId, Price, SeatId, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mutating commands accepted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineCommand {
    SubmitOrder {
        instrument_id: InstrumentId,
        seat_id: SeatId,
        quantity: u64,
        side: Side,
    },
    SubmitEvent {
        title: String,
        targets: Vec<InstrumentId>,
        impact_percent: Decimal,
        description: String,
    },
    OverridePrice {
        instrument_id: InstrumentId,
        new_price: Decimal,
    },
    UpdateParams {
        update: ParamUpdate,
    },
}

/// Read queries answered from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineQuery {
    Instruments,
    Seats,
    OrderLog,
    EventLog,
    ActionLog,
}

/// Per-instrument outcome of a `SubmitEvent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub instrument_id: InstrumentId,
    pub shocked_price: Option<Price>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ApiResponse {
    Order(OrderResult),
    Event(Vec<EventOutcome>),
    Instrument(Instrument),
    Ack,
    Instruments(Vec<Instrument>),
    Seats(Vec<Seat>),
    OrderLog(Vec<OrderRecord>),
    EventLog(Vec<EventRecord>),
    ActionLog(Vec<ActionRecord>),
}

/// Stable error codes for transports that cannot carry rich enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    UnknownInstrument,
    UnknownSeat,
    InvalidQuantity,
    InvalidPrice,
    InvalidImpact,
    InsufficientFunds,
    InsufficientShares,
    Unauthorized,
    InvalidParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&EngineError> for ErrorCode {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::InvalidQuantity(_) => ErrorCode::InvalidQuantity,
            EngineError::InvalidImpact(_) => ErrorCode::InvalidImpact,
            EngineError::Unauthorized => ErrorCode::Unauthorized,
            EngineError::Params(_) => ErrorCode::InvalidParams,
            EngineError::State(state) => match state {
                StateError::UnknownInstrument(_) => ErrorCode::UnknownInstrument,
                StateError::UnknownSeat(_) => ErrorCode::UnknownSeat,
                StateError::InvalidPrice(_) => ErrorCode::InvalidPrice,
                StateError::InsufficientFunds { .. } => ErrorCode::InsufficientFunds,
                StateError::InsufficientShares { .. } => ErrorCode::InsufficientShares,
            },
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError {
            code: ErrorCode::from(&err),
            message: err.to_string(),
        }
    }
}
