//! Event impact and recovery.
//!
//! An exogenous shock moves an instrument's price by a scaled percentage and
//! records the pre-shock price as a recovery baseline. Subsequent recovery
//! ticks close a fraction of the remaining gap each time, approaching the
//! baseline asymptotically without overshoot. The tick is driven externally
//! (see `RecoveryDriver`), never by the mutation pipelines themselves.

use super::core::Engine;
use super::results::{EngineError, ShockApplied};
use crate::logs::EventRecord;
use crate::state::StateError;
use crate::types::InstrumentId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

impl Engine {
    /// Apply one shock to one instrument.
    pub fn process_event(
        &mut self,
        instrument_id: InstrumentId,
        impact_percent: Decimal,
        title: &str,
        description: &str,
    ) -> Result<ShockApplied, EngineError> {
        let result = self.shock_instrument(instrument_id, impact_percent);
        self.log_event(instrument_id, impact_percent, title, description, &result);
        result
    }

    /// Apply one titled event across several instruments. Each target is
    /// processed independently: a failure on one neither blocks the others
    /// nor is hidden from the caller.
    pub fn process_event_batch(
        &mut self,
        title: &str,
        targets: &[InstrumentId],
        impact_percent: Decimal,
        description: &str,
    ) -> Vec<(InstrumentId, Result<ShockApplied, EngineError>)> {
        targets
            .iter()
            .map(|&instrument_id| {
                let result = self.shock_instrument(instrument_id, impact_percent);
                self.log_event(instrument_id, impact_percent, title, description, &result);
                (instrument_id, result)
            })
            .collect()
    }

    fn shock_instrument(
        &mut self,
        instrument_id: InstrumentId,
        impact_percent: Decimal,
    ) -> Result<ShockApplied, EngineError> {
        let instrument = self
            .state
            .instrument(instrument_id)
            .ok_or(StateError::UnknownInstrument(instrument_id))?;
        let pre_shock = instrument.current_price;
        let active_baseline = instrument.recovery_baseline;

        let scaled = impact_percent * self.params.event.event_impact_multiplier / dec!(100);
        let shocked = pre_shock.value() * (Decimal::ONE + scaled);
        if shocked <= Decimal::ZERO {
            return Err(EngineError::InvalidImpact(impact_percent));
        }

        self.state
            .override_price(instrument_id, shocked, self.current_time)?;

        // layered shocks keep decaying toward the original pre-event price
        let baseline = active_baseline.unwrap_or(pre_shock);
        self.state
            .set_recovery_baseline(instrument_id, Some(baseline))?;

        let applied = ShockApplied {
            instrument_id,
            shocked_price: crate::types::Price::new_unchecked(shocked),
            baseline,
            impact_percent,
        };
        tracing::info!(
            instrument = instrument_id.0,
            impact = %impact_percent,
            shocked = %applied.shocked_price,
            baseline = %baseline,
            "event shock applied"
        );
        Ok(applied)
    }

    fn log_event(
        &mut self,
        instrument_id: InstrumentId,
        impact_percent: Decimal,
        title: &str,
        description: &str,
        result: &Result<ShockApplied, EngineError>,
    ) {
        self.state.append_event_log(EventRecord {
            title: title.to_string(),
            instrument_id,
            impact_percent,
            description: description.to_string(),
            applied_price: result.as_ref().ok().map(|s| s.shocked_price),
            failure: result.as_ref().err().map(|e| e.to_string()),
            at: self.current_time,
        });
    }

    /// One decay step for every instrument with an active baseline:
    /// `price += recovery_rate * (baseline - price)`. Once the gap falls
    /// below the threshold the baseline clears and decay stops. Returns the
    /// number of instruments still recovering after this tick.
    pub fn recovery_tick(&mut self) -> usize {
        let rate = self.params.event.recovery_rate;
        let threshold = self.params.event.recovery_threshold;
        let mut still_recovering = 0;

        for (instrument_id, current, baseline) in self.state.recovery_candidates() {
            let gap = baseline.value() - current.value();
            if gap.abs() < threshold {
                let _ = self.state.set_recovery_baseline(instrument_id, None);
                continue;
            }

            let next = current.value() + rate * gap;
            if self
                .state
                .override_price(instrument_id, next, self.current_time)
                .is_err()
            {
                // a non-positive step cannot happen while price and baseline
                // are both positive; drop the baseline rather than loop on it
                let _ = self.state.set_recovery_baseline(instrument_id, None);
                continue;
            }

            if (baseline.value() - next).abs() < threshold {
                let _ = self.state.set_recovery_baseline(instrument_id, None);
            } else {
                still_recovering += 1;
            }
        }
        still_recovering
    }
}
