//! Order processing pipeline.
//!
//! Validate, form the execution price from the impact model, charge the fee,
//! and settle through `MarketState::apply_trade`. Both outcomes land in the
//! order log; a rejection propagates the same error the log records, so log
//! and state never diverge.

use super::core::Engine;
use super::results::{EngineError, OrderResult};
use crate::logs::OrderRecord;
use crate::order::Order;
use crate::state::StateError;
use crate::types::{Cash, InstrumentId, Price, SeatId, Side};
use rust_decimal::Decimal;

impl Engine {
    pub fn process_order(
        &mut self,
        instrument_id: InstrumentId,
        seat_id: SeatId,
        quantity: u64,
        side: Side,
    ) -> Result<OrderResult, EngineError> {
        if quantity == 0 {
            return Err(EngineError::InvalidQuantity(quantity));
        }
        let instrument = self
            .state
            .instrument(instrument_id)
            .ok_or(StateError::UnknownInstrument(instrument_id))?;
        let reference_price = instrument.current_price;
        if self.state.seat(seat_id).is_none() {
            return Err(StateError::UnknownSeat(seat_id).into());
        }

        let mut order = Order::new(
            self.next_order_id(),
            instrument_id,
            seat_id,
            side,
            quantity,
            reference_price,
            self.current_time,
        );
        order.mark_validated();

        // price formation: impact shifts the price in the order's direction,
        // noise perturbs it identically for both sides
        let q = Decimal::from(quantity);
        let impact = side.sign() * self.params.order.price_impact * q;
        let noise = self.params.order.volatility * self.noise_unit();
        let formed = reference_price.value() * (Decimal::ONE + impact) * (Decimal::ONE + noise);

        let execution_price = match Price::new(formed) {
            Some(price) => price,
            None => {
                order.mark_rejected();
                let err = StateError::InvalidPrice(formed);
                self.log_rejection(&order, None, None, &err);
                return Err(err.into());
            }
        };
        let fee = Cash::new(self.params.order.trading_fee * q * execution_price.value());

        match self.state.apply_trade(
            instrument_id,
            seat_id,
            side,
            quantity,
            execution_price,
            fee,
            self.current_time,
        ) {
            Ok(applied) => {
                order.mark_executed();
                self.state.append_order_log(OrderRecord {
                    order_id: order.id,
                    instrument_id,
                    seat_id,
                    side,
                    quantity,
                    execution_price: Some(execution_price),
                    fee: Some(fee),
                    status: order.status,
                    reason: None,
                    at: self.current_time,
                });
                tracing::info!(
                    order_id = order.id.0,
                    instrument = %applied.instrument.symbol,
                    seat = seat_id.0,
                    %side,
                    quantity,
                    price = %execution_price,
                    %fee,
                    "order executed"
                );
                Ok(OrderResult {
                    order_id: order.id,
                    status: order.status,
                    execution_price,
                    fee,
                    instrument: applied.instrument,
                })
            }
            Err(err) => {
                order.mark_rejected();
                self.log_rejection(&order, Some(execution_price), Some(fee), &err);
                Err(err.into())
            }
        }
    }

    fn log_rejection(
        &mut self,
        order: &Order,
        execution_price: Option<Price>,
        fee: Option<Cash>,
        err: &StateError,
    ) {
        self.state.append_order_log(OrderRecord {
            order_id: order.id,
            instrument_id: order.instrument_id,
            seat_id: order.seat_id,
            side: order.side,
            quantity: order.quantity,
            execution_price,
            fee,
            status: order.status,
            reason: Some(err.to_string()),
            at: self.current_time,
        });
        tracing::warn!(
            order_id = order.id.0,
            instrument = order.instrument_id.0,
            seat = order.seat_id.0,
            side = %order.side,
            quantity = order.quantity,
            %err,
            "order rejected"
        );
    }
}
