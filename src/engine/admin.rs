//! Admin override channel.
//!
//! Privileged direct mutations: price overrides and parameter updates. Both
//! require an admin actor and land in the action log, never in the order or
//! event logs.

use super::core::Engine;
use super::results::EngineError;
use crate::instrument::Instrument;
use crate::logs::{ActionKind, ActionRecord};
use crate::params::ParamUpdate;
use crate::types::{InstrumentId, SeatId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Who is issuing a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Actor {
    Admin { name: String },
    Seat(SeatId),
}

impl Actor {
    pub fn admin(name: &str) -> Self {
        Actor::Admin {
            name: name.to_string(),
        }
    }

    fn admin_name(&self) -> Option<&str> {
        match self {
            Actor::Admin { name } => Some(name),
            Actor::Seat(_) => None,
        }
    }
}

impl Engine {
    /// Set a price directly, bypassing trade and impact math. Clears any
    /// active recovery baseline: the admin's figure is authoritative.
    pub fn override_price(
        &mut self,
        actor: &Actor,
        instrument_id: InstrumentId,
        new_price: Decimal,
    ) -> Result<Instrument, EngineError> {
        let name = actor.admin_name().ok_or(EngineError::Unauthorized)?.to_string();
        let updated = self
            .state
            .override_price(instrument_id, new_price, self.current_time)?;
        self.state.set_recovery_baseline(instrument_id, None)?;
        self.state.append_action_log(ActionRecord {
            kind: ActionKind::PriceOverride {
                instrument_id,
                new_price: updated.current_price,
            },
            actor: name.clone(),
            at: self.current_time,
        });
        tracing::info!(
            instrument = %updated.symbol,
            price = %updated.current_price,
            actor = %name,
            "admin price override"
        );
        Ok(updated)
    }

    /// Replace one engine's parameter block. Takes effect for subsequently
    /// processed commands only.
    pub fn update_params(
        &mut self,
        actor: &Actor,
        update: ParamUpdate,
    ) -> Result<(), EngineError> {
        let name = actor.admin_name().ok_or(EngineError::Unauthorized)?.to_string();
        match update {
            ParamUpdate::Order(order) => {
                order.validate()?;
                self.params.order = order;
            }
            ParamUpdate::Event(event) => {
                event.validate()?;
                self.params.event = event;
            }
        }
        self.state.append_action_log(ActionRecord {
            kind: ActionKind::SettingsUpdate {
                scope: update.scope(),
            },
            actor: name.clone(),
            at: self.current_time,
        });
        tracing::info!(scope = ?update.scope(), actor = %name, "simulation parameters updated");
        Ok(())
    }
}
