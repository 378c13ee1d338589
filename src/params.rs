// 4.0 params.rs: all tunable coefficients in one place. nothing here is a
// hard-wired constant; admins replace whole parameter blocks at runtime and
// the change applies to subsequently processed commands only.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Order pipeline coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderParams {
    /// Scales the bounded random perturbation on execution prices.
    pub volatility: Decimal,
    /// Fee as a fraction of notional, charged on both sides.
    pub trading_fee: Decimal,
    /// Fraction of price shift per unit quantity.
    pub price_impact: Decimal,
}

impl Default for OrderParams {
    fn default() -> Self {
        Self {
            volatility: dec!(0.02),
            trading_fee: dec!(0.001),
            price_impact: dec!(0.0001),
        }
    }
}

impl OrderParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.volatility < Decimal::ZERO || self.volatility > Decimal::ONE {
            return Err(ParamsError::InvalidOrder {
                reason: "volatility must be within [0, 1]".to_string(),
            });
        }
        if self.trading_fee < Decimal::ZERO || self.trading_fee >= Decimal::ONE {
            return Err(ParamsError::InvalidOrder {
                reason: "trading fee must be within [0, 1)".to_string(),
            });
        }
        if self.price_impact < Decimal::ZERO || self.price_impact >= Decimal::ONE {
            return Err(ParamsError::InvalidOrder {
                reason: "price impact must be within [0, 1)".to_string(),
            });
        }
        Ok(())
    }
}

/// Event shock and recovery coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventParams {
    /// Multiplier applied to the raw impact percentage.
    pub event_impact_multiplier: Decimal,
    /// Fraction of the remaining gap closed per recovery tick.
    pub recovery_rate: Decimal,
    /// Gap below which recovery stops and the baseline clears.
    pub recovery_threshold: Decimal,
}

impl Default for EventParams {
    fn default() -> Self {
        Self {
            event_impact_multiplier: dec!(1.0),
            recovery_rate: dec!(0.5),
            recovery_threshold: dec!(0.01),
        }
    }
}

impl EventParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.event_impact_multiplier <= Decimal::ZERO {
            return Err(ParamsError::InvalidEvent {
                reason: "impact multiplier must be positive".to_string(),
            });
        }
        if self.recovery_rate <= Decimal::ZERO || self.recovery_rate > Decimal::ONE {
            return Err(ParamsError::InvalidEvent {
                reason: "recovery rate must be within (0, 1]".to_string(),
            });
        }
        if self.recovery_threshold <= Decimal::ZERO {
            return Err(ParamsError::InvalidEvent {
                reason: "recovery threshold must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// The complete simulation parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationParams {
    pub order: OrderParams,
    pub event: EventParams,
}

impl SimulationParams {
    /// Noise disabled. Execution prices follow the impact formula exactly,
    /// useful for exercises that are scored against hand-computed figures.
    pub fn calm() -> Self {
        Self {
            order: OrderParams {
                volatility: Decimal::ZERO,
                ..OrderParams::default()
            },
            event: EventParams::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        self.order.validate()?;
        self.event.validate()
    }
}

/// A whole-block parameter replacement, as submitted by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamUpdate {
    Order(OrderParams),
    Event(EventParams),
}

impl ParamUpdate {
    pub fn scope(&self) -> ParamScope {
        match self {
            ParamUpdate::Order(_) => ParamScope::Order,
            ParamUpdate::Event(_) => ParamScope::Event,
        }
    }
}

/// Which engine a parameter update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamScope {
    Order,
    Event,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    #[error("invalid order params: {reason}")]
    InvalidOrder { reason: String },

    #[error("invalid event params: {reason}")]
    InvalidEvent { reason: String },
}
