// 3.0: every committed mutation produces notifications. these cross the
// publish/subscribe boundary to connected clients; the sequence number lets a
// consumer detect reordered or stale deliveries. delivery is decoupled from
// commit: the state machine fills an outbox, the hub drains and fans out.

use crate::logs::LogKind;
use crate::types::{Cash, InstrumentId, Price, SeatId, SeqNo, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub seq: SeqNo,
    pub at: Timestamp,
    pub payload: NotificationPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationPayload {
    /// An instrument's price changed (trade, shock, recovery, or override).
    InstrumentUpdated {
        instrument_id: InstrumentId,
        price: Price,
        change: Decimal,
    },
    /// A seat's cash or holdings changed.
    SeatUpdated {
        seat_id: SeatId,
        cash: Cash,
    },
    /// An entry was appended to one of the bounded logs.
    LogAppended {
        kind: LogKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn serializes_round_trip() {
        let n = Notification {
            seq: SeqNo(7),
            at: Timestamp::from_millis(1000),
            payload: NotificationPayload::InstrumentUpdated {
                instrument_id: InstrumentId(1),
                price: Price::new_unchecked(dec!(151.50)),
                change: dec!(1.00),
            },
        };
        let json = serde_json::to_string(&n).unwrap();
        let back: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }
}
