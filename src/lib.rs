// tradefloor-core: multiplayer trading exercise engine.
// one canonical market state, two mutation pipelines: order execution
// (price formation from trade flow) and event shocks with decay.
// all engine computation is deterministic under a supplied seed.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: InstrumentId, SeatId, Side, Price, Cash, SeqNo
//   2.x  logs.rs: bounded newest-first activity logs (order/event/action)
//   3.x  notify.rs: commit notifications with sequence numbers
//   4.x  params.rs: tunable simulation coefficients
//   5.x  state.rs: MarketState: canonical store, atomic mutations, snapshots
//   6.x  engine/: order pipeline, event impact, recovery, admin channel
//   7.x  api.rs: transport-neutral command/query surface
//   8.x  hub.rs: single-writer coordination + subscriber fan-out
//   9.x  driver.rs: periodic recovery tick thread
//   instrument.rs, seat.rs, order.rs, roster.rs: entity records

// canonical state and records
pub mod instrument;
pub mod logs;
pub mod notify;
pub mod order;
pub mod roster;
pub mod seat;
pub mod state;
pub mod types;

// mutation pipelines
pub mod engine;
pub mod params;

// coordination and boundary
pub mod api;
pub mod driver;
pub mod hub;

// re exports for convenience
pub use api::*;
pub use driver::RecoveryDriver;
pub use engine::*;
pub use hub::MarketHub;
pub use instrument::*;
pub use logs::*;
pub use notify::*;
pub use order::*;
pub use params::*;
pub use roster::*;
pub use seat::*;
pub use state::*;
pub use types::*;
