//! Instrument identity shared across the feed, subscription, and codec layers.

use serde::{Deserialize, Serialize};

pub use crate::types::enums::ExchangeSegment;

/// An (exchange-segment, security-id) pair identifying a single tradable.
///
/// This is the domain type used internally for subscription bookkeeping and
/// placement; see [`WireInstrument`] for the JSON shape sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instrument {
    pub exchange_segment: ExchangeSegment,
    pub security_id: i32,
}

impl Instrument {
    /// Construct a new instrument.
    pub fn new(exchange_segment: ExchangeSegment, security_id: i32) -> Self {
        Self {
            exchange_segment,
            security_id,
        }
    }
}

impl From<&Instrument> for WireInstrument {
    fn from(inst: &Instrument) -> Self {
        Self {
            ExchangeSegment: format!("{:?}", inst.exchange_segment),
            SecurityId: inst.security_id.to_string(),
        }
    }
}

/// The JSON-wire representation of an instrument inside a subscribe or
/// unsubscribe frame — PascalCase field names, security ID as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct WireInstrument {
    pub ExchangeSegment: String,
    pub SecurityId: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_instrument_matches_subscribe_shape() {
        let inst = Instrument::new(ExchangeSegment::NSE_EQ, 11536);
        let wire = WireInstrument::from(&inst);
        assert_eq!(wire.ExchangeSegment, "NSE_EQ");
        assert_eq!(wire.SecurityId, "11536");
    }
}
