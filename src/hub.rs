// 8.0 hub.rs: coordination boundary. all mutations funnel through a single
// writer lock, which gives strict submission-order serialization per
// instrument (and globally). committed notifications are drained inside the
// lock and delivered outside it, fire-and-forget: a slow or disconnected
// subscriber can never hold up or fail a commit.

use crate::api::{ApiError, ApiResponse, EngineCommand, EngineQuery, EventOutcome};
use crate::engine::{Actor, Engine};
use crate::notify::Notification;
use crate::state::MarketSnapshot;
use crate::types::Timestamp;
use crossbeam::channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug)]
struct HubInner {
    engine: Mutex<Engine>,
    subscribers: Mutex<Vec<Sender<Notification>>>,
}

/// Shared handle to the market. Cheap to clone; every clone talks to the
/// same single-writer engine.
#[derive(Debug)]
pub struct MarketHub {
    inner: Arc<HubInner>,
}

impl Clone for MarketHub {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl MarketHub {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(HubInner {
                engine: Mutex::new(engine),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a notification consumer. The receiver sees every commit from
    /// this point on, in order, tagged with increasing sequence numbers.
    pub fn subscribe(&self) -> Receiver<Notification> {
        let (tx, rx) = unbounded();
        self.inner.subscribers.lock().push(tx);
        rx
    }

    /// Execute one mutating command. The lock is held for the mutation only;
    /// notification delivery happens after release.
    pub fn execute(&self, actor: &Actor, command: EngineCommand) -> Result<ApiResponse, ApiError> {
        let (result, notifications) = {
            let mut engine = self.inner.engine.lock();
            engine.set_time(Timestamp::now());
            let result = Self::dispatch(&mut engine, actor, command);
            (result, engine.take_notifications())
        };
        self.publish(notifications);
        result
    }

    fn dispatch(
        engine: &mut Engine,
        actor: &Actor,
        command: EngineCommand,
    ) -> Result<ApiResponse, ApiError> {
        match command {
            EngineCommand::SubmitOrder {
                instrument_id,
                seat_id,
                quantity,
                side,
            } => {
                let result = engine.process_order(instrument_id, seat_id, quantity, side)?;
                Ok(ApiResponse::Order(result))
            }
            EngineCommand::SubmitEvent {
                title,
                targets,
                impact_percent,
                description,
            } => {
                let outcomes = engine
                    .process_event_batch(&title, &targets, impact_percent, &description)
                    .into_iter()
                    .map(|(instrument_id, result)| match result {
                        Ok(shock) => EventOutcome {
                            instrument_id,
                            shocked_price: Some(shock.shocked_price),
                            error: None,
                        },
                        Err(err) => EventOutcome {
                            instrument_id,
                            shocked_price: None,
                            error: Some(err.into()),
                        },
                    })
                    .collect();
                Ok(ApiResponse::Event(outcomes))
            }
            EngineCommand::OverridePrice {
                instrument_id,
                new_price,
            } => {
                let updated = engine.override_price(actor, instrument_id, new_price)?;
                Ok(ApiResponse::Instrument(updated))
            }
            EngineCommand::UpdateParams { update } => {
                engine.update_params(actor, update)?;
                Ok(ApiResponse::Ack)
            }
        }
    }

    /// Answer a read query from a copy-out snapshot.
    pub fn query(&self, query: EngineQuery) -> ApiResponse {
        let snapshot = self.snapshot();
        match query {
            EngineQuery::Instruments => ApiResponse::Instruments(snapshot.instruments),
            EngineQuery::Seats => ApiResponse::Seats(snapshot.seats),
            EngineQuery::OrderLog => ApiResponse::OrderLog(snapshot.order_log),
            EngineQuery::EventLog => ApiResponse::EventLog(snapshot.event_log),
            EngineQuery::ActionLog => ApiResponse::ActionLog(snapshot.action_log),
        }
    }

    pub fn snapshot(&self) -> MarketSnapshot {
        self.inner.engine.lock().snapshot()
    }

    /// One recovery decay step. Called by the periodic driver.
    pub fn recovery_tick(&self) -> usize {
        let (still_recovering, notifications) = {
            let mut engine = self.inner.engine.lock();
            engine.set_time(Timestamp::now());
            let n = engine.recovery_tick();
            (n, engine.take_notifications())
        };
        self.publish(notifications);
        still_recovering
    }

    fn publish(&self, notifications: Vec<Notification>) {
        if notifications.is_empty() {
            return;
        }
        let mut subscribers = self.inner.subscribers.lock();
        // drop subscribers whose receiving side has gone away
        subscribers.retain(|tx| {
            notifications
                .iter()
                .all(|note| tx.send(note.clone()).is_ok())
        });
    }

    /// Subscribers still connected. Mostly useful in tests.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }
}
