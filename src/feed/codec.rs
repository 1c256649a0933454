//! Binary wire codec for market-data packets.
//!
//! Every packet starts with an 8-byte little-endian header: response code
//! (1 byte), message length (2 bytes), exchange segment (1 byte), security
//! ID (4 bytes). The remaining bytes are a fixed-size payload for all
//! variants except depth, whose level count is derived from payload length.
//!
//! Decoding is pure and allocation-free for the fixed-shape variants; the
//! object pool in [`crate::feed::pool`] is what makes the hot path
//! allocation-free end to end by reusing the records this module decodes
//! into.

use crate::error::{BrokerError, Result};
use crate::types::enums::{ExchangeSegment, FeedResponseCode};

/// Size in bytes of every packet header.
pub const HEADER_LEN: usize = 8;

/// Size in bytes of a single depth level (bid/ask qty, orders, price).
pub const DEPTH_LEVEL_LEN: usize = 20;

/// Header parsed from the first 8 bytes of every binary packet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacketHeader {
    /// The response code identifying the packet type.
    pub response_code: FeedResponseCode,
    /// Total message length in bytes, as declared by the upstream.
    pub message_length: u16,
    /// Exchange segment the data belongs to, if the raw byte is recognized.
    pub exchange_segment: Option<ExchangeSegment>,
    /// Raw exchange-segment byte, always available even for an unknown segment.
    pub exchange_segment_raw: u8,
    /// Security ID of the instrument.
    pub security_id: i32,
}

#[inline(always)]
fn read_u16_le(data: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([data[off], data[off + 1]])
}

#[inline(always)]
fn read_i32_le(data: &[u8], off: usize) -> i32 {
    i32::from_le_bytes(data[off..off + 4].try_into().unwrap())
}

#[inline(always)]
fn read_u32_le(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(data[off..off + 4].try_into().unwrap())
}

#[inline(always)]
fn read_u16_le_at(data: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([data[off], data[off + 1]])
}

#[inline(always)]
fn read_f32_le(data: &[u8], off: usize) -> f32 {
    f32::from_le_bytes(data[off..off + 4].try_into().unwrap())
}

/// Parse the 8-byte packet header from the start of `data`.
pub fn parse_header(data: &[u8]) -> Result<PacketHeader> {
    if data.len() < HEADER_LEN {
        return Err(BrokerError::MalformedPacket(format!(
            "packet too short for header: {} bytes",
            data.len()
        )));
    }
    let response_code_byte = data[0];
    let response_code = FeedResponseCode::from_byte(response_code_byte).ok_or_else(|| {
        BrokerError::MalformedPacket(format!("unknown feed response code: {response_code_byte}"))
    })?;
    let message_length = read_u16_le(data, 1);
    let exchange_segment_raw = data[3];
    let exchange_segment = ExchangeSegment::from_segment_code(exchange_segment_raw);
    let security_id = read_i32_le(data, 4);

    Ok(PacketHeader {
        response_code,
        message_length,
        exchange_segment,
        exchange_segment_raw,
        security_id,
    })
}

/// Serialize a header back to its 8-byte wire form.
pub fn encode_header(header: &PacketHeader) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    out[0] = header.response_code as u8;
    out[1..3].copy_from_slice(&header.message_length.to_le_bytes());
    out[3] = header.exchange_segment_raw;
    out[4..8].copy_from_slice(&header.security_id.to_le_bytes());
    out
}

/// Last traded price + trade time. Response code 2, 16 bytes total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickerRecord {
    pub header: Option<PacketHeader>,
    pub ltp: f32,
    pub ltt: i32,
}

const TICKER_PAYLOAD_LEN: usize = 8;

/// Decode a Ticker payload (header already stripped).
pub fn decode_ticker(header: PacketHeader, payload: &[u8]) -> Result<TickerRecord> {
    if payload.len() < TICKER_PAYLOAD_LEN {
        return Err(BrokerError::MalformedPacket(format!(
            "ticker payload too short: {} bytes",
            payload.len()
        )));
    }
    Ok(TickerRecord {
        header: Some(header),
        ltp: read_f32_le(payload, 0),
        ltt: read_i32_le(payload, 4),
    })
}

/// Encode a [`TickerRecord`] back to its wire bytes, header included.
pub fn encode_ticker(record: &TickerRecord) -> Vec<u8> {
    let header = record.header.expect("encode_ticker requires a header");
    let mut out = Vec::with_capacity(HEADER_LEN + TICKER_PAYLOAD_LEN);
    out.extend_from_slice(&encode_header(&header));
    out.extend_from_slice(&record.ltp.to_le_bytes());
    out.extend_from_slice(&record.ltt.to_le_bytes());
    out
}

/// Previous day close + open interest. Response code 6, 16 bytes total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrevCloseRecord {
    pub header: Option<PacketHeader>,
    pub prev_close: f32,
    pub prev_oi: u32,
}

const PREV_CLOSE_PAYLOAD_LEN: usize = 8;

/// Decode a PrevClose payload (header already stripped).
pub fn decode_prev_close(header: PacketHeader, payload: &[u8]) -> Result<PrevCloseRecord> {
    if payload.len() < PREV_CLOSE_PAYLOAD_LEN {
        return Err(BrokerError::MalformedPacket(format!(
            "prev-close payload too short: {} bytes",
            payload.len()
        )));
    }
    Ok(PrevCloseRecord {
        header: Some(header),
        prev_close: read_f32_le(payload, 0),
        prev_oi: read_u32_le(payload, 4),
    })
}

/// Encode a [`PrevCloseRecord`] back to its wire bytes, header included.
pub fn encode_prev_close(record: &PrevCloseRecord) -> Vec<u8> {
    let header = record.header.expect("encode_prev_close requires a header");
    let mut out = Vec::with_capacity(HEADER_LEN + PREV_CLOSE_PAYLOAD_LEN);
    out.extend_from_slice(&encode_header(&header));
    out.extend_from_slice(&record.prev_close.to_le_bytes());
    out.extend_from_slice(&record.prev_oi.to_le_bytes());
    out
}

/// Quote data: LTP, qty, ATP, volume, OHLC. Response code 4, 50 bytes total
/// (42-byte payload). The wire layout carries 2 reserved bytes after LTQ
/// with no defined meaning; they're skipped rather than stored (see
/// `DESIGN.md`), so `time` is read starting at payload offset 6.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuoteRecord {
    pub header: Option<PacketHeader>,
    pub ltp: f32,
    pub ltq: u16,
    pub time: i32,
    pub atp: f32,
    pub volume: u32,
    pub sell_qty: u32,
    pub buy_qty: u32,
    pub open: f32,
    pub close: f32,
    pub high: f32,
    pub low: f32,
}

const QUOTE_PAYLOAD_LEN: usize = 42;

/// Decode a Quote payload (header already stripped).
pub fn decode_quote(header: PacketHeader, payload: &[u8]) -> Result<QuoteRecord> {
    if payload.len() < QUOTE_PAYLOAD_LEN {
        return Err(BrokerError::MalformedPacket(format!(
            "quote payload too short: {} bytes",
            payload.len()
        )));
    }
    Ok(decode_quote_fields(payload))
}

fn decode_quote_fields(payload: &[u8]) -> QuoteRecord {
    QuoteRecord {
        header: None,
        ltp: read_f32_le(payload, 0),
        ltq: read_u16_le_at(payload, 4),
        time: read_i32_le(payload, 6),
        atp: read_f32_le(payload, 10),
        volume: read_u32_le(payload, 14),
        sell_qty: read_u32_le(payload, 18),
        buy_qty: read_u32_le(payload, 22),
        open: read_f32_le(payload, 26),
        close: read_f32_le(payload, 30),
        high: read_f32_le(payload, 34),
        low: read_f32_le(payload, 38),
    }
}

fn encode_quote_fields(out: &mut Vec<u8>, record: &QuoteRecord) {
    out.extend_from_slice(&record.ltp.to_le_bytes());
    out.extend_from_slice(&record.ltq.to_le_bytes());
    out.extend_from_slice(&record.time.to_le_bytes());
    out.extend_from_slice(&record.atp.to_le_bytes());
    out.extend_from_slice(&record.volume.to_le_bytes());
    out.extend_from_slice(&record.sell_qty.to_le_bytes());
    out.extend_from_slice(&record.buy_qty.to_le_bytes());
    out.extend_from_slice(&record.open.to_le_bytes());
    out.extend_from_slice(&record.close.to_le_bytes());
    out.extend_from_slice(&record.high.to_le_bytes());
    out.extend_from_slice(&record.low.to_le_bytes());
}

/// Encode a [`QuoteRecord`] back to its wire bytes, header included.
pub fn encode_quote(record: &QuoteRecord) -> Vec<u8> {
    let header = record.header.expect("encode_quote requires a header");
    let mut out = Vec::with_capacity(HEADER_LEN + QUOTE_PAYLOAD_LEN);
    out.extend_from_slice(&encode_header(&header));
    encode_quote_fields(&mut out, record);
    out
}

/// Open interest. Response code 5, 12 bytes total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OiRecord {
    pub header: Option<PacketHeader>,
    pub oi: u32,
}

const OI_PAYLOAD_LEN: usize = 4;

/// Decode an OI payload (header already stripped).
pub fn decode_oi(header: PacketHeader, payload: &[u8]) -> Result<OiRecord> {
    if payload.len() < OI_PAYLOAD_LEN {
        return Err(BrokerError::MalformedPacket(format!(
            "OI payload too short: {} bytes",
            payload.len()
        )));
    }
    Ok(OiRecord {
        header: Some(header),
        oi: read_u32_le(payload, 0),
    })
}

/// Encode an [`OiRecord`] back to its wire bytes, header included.
pub fn encode_oi(record: &OiRecord) -> Vec<u8> {
    let header = record.header.expect("encode_oi requires a header");
    let mut out = Vec::with_capacity(HEADER_LEN + OI_PAYLOAD_LEN);
    out.extend_from_slice(&encode_header(&header));
    out.extend_from_slice(&record.oi.to_le_bytes());
    out
}

/// A single level of market depth (bid or ask side). 20 bytes on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DepthLevel {
    pub bid_qty: u32,
    pub ask_qty: u32,
    pub bid_orders: u16,
    pub ask_orders: u16,
    pub bid_price: f32,
    pub ask_price: f32,
}

fn decode_depth_level(data: &[u8]) -> DepthLevel {
    DepthLevel {
        bid_qty: read_u32_le(data, 0),
        ask_qty: read_u32_le(data, 4),
        bid_orders: read_u16_le_at(data, 8),
        ask_orders: read_u16_le_at(data, 10),
        bid_price: read_f32_le(data, 12),
        ask_price: read_f32_le(data, 16),
    }
}

fn encode_depth_level(out: &mut Vec<u8>, level: &DepthLevel) {
    out.extend_from_slice(&level.bid_qty.to_le_bytes());
    out.extend_from_slice(&level.ask_qty.to_le_bytes());
    out.extend_from_slice(&level.bid_orders.to_le_bytes());
    out.extend_from_slice(&level.ask_orders.to_le_bytes());
    out.extend_from_slice(&level.bid_price.to_le_bytes());
    out.extend_from_slice(&level.ask_price.to_le_bytes());
}

/// Full packet: quote fields + a fixed 5 levels of depth. Response code 8,
/// 150 bytes total (8-byte header + 42-byte quote payload + 100 bytes of
/// depth). See `DESIGN.md` for why this omits the open-interest fields the
/// teacher's original Full packet carried — the wire table this codec
/// targets defines Full as exactly quote-payload-plus-depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FullRecord {
    pub header: Option<PacketHeader>,
    pub quote: QuoteRecord,
    pub depth: [DepthLevel; 5],
}

impl Default for FullRecord {
    fn default() -> Self {
        Self {
            header: None,
            quote: QuoteRecord::default(),
            depth: [DepthLevel::default(); 5],
        }
    }
}

const FULL_PAYLOAD_LEN: usize = QUOTE_PAYLOAD_LEN + 5 * DEPTH_LEVEL_LEN;

/// Decode a Full payload (header already stripped).
pub fn decode_full(header: PacketHeader, payload: &[u8]) -> Result<FullRecord> {
    if payload.len() < FULL_PAYLOAD_LEN {
        return Err(BrokerError::MalformedPacket(format!(
            "full payload too short: {} bytes (need >= {FULL_PAYLOAD_LEN})",
            payload.len()
        )));
    }
    let quote = decode_quote_fields(&payload[..QUOTE_PAYLOAD_LEN]);
    let mut depth = [DepthLevel::default(); 5];
    for (i, level) in depth.iter_mut().enumerate() {
        let off = QUOTE_PAYLOAD_LEN + i * DEPTH_LEVEL_LEN;
        *level = decode_depth_level(&payload[off..off + DEPTH_LEVEL_LEN]);
    }
    Ok(FullRecord {
        header: Some(header),
        quote,
        depth,
    })
}

/// Encode a [`FullRecord`] back to its wire bytes, header included.
pub fn encode_full(record: &FullRecord) -> Vec<u8> {
    let header = record.header.expect("encode_full requires a header");
    let mut out = Vec::with_capacity(HEADER_LEN + FULL_PAYLOAD_LEN);
    out.extend_from_slice(&encode_header(&header));
    encode_quote_fields(&mut out, &record.quote);
    for level in &record.depth {
        encode_depth_level(&mut out, level);
    }
    out
}

/// A variable-depth market-depth packet (response code 41 or 51). The level
/// count is derived from payload length, not hardcoded per variant, so the
/// same record and decode path serve both the 20-level and 200-level feeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepthRecord {
    pub header: Option<PacketHeader>,
    pub levels: Vec<DepthLevel>,
}

/// Decode a depth payload (header already stripped) into `out`, reusing its
/// existing capacity. `out` is cleared first, so previous contents never
/// leak into the next record.
pub fn decode_depth_into(header: PacketHeader, payload: &[u8], out: &mut DepthRecord) -> Result<()> {
    if payload.len() % DEPTH_LEVEL_LEN != 0 {
        return Err(BrokerError::MalformedPacket(format!(
            "depth payload length {} is not a multiple of {DEPTH_LEVEL_LEN}",
            payload.len()
        )));
    }
    out.header = Some(header);
    out.levels.clear();
    let level_count = payload.len() / DEPTH_LEVEL_LEN;
    out.levels.reserve(level_count);
    for i in 0..level_count {
        let off = i * DEPTH_LEVEL_LEN;
        out.levels
            .push(decode_depth_level(&payload[off..off + DEPTH_LEVEL_LEN]));
    }
    Ok(())
}

/// Decode a depth payload into a freshly allocated [`DepthRecord`].
pub fn decode_depth(header: PacketHeader, payload: &[u8]) -> Result<DepthRecord> {
    let mut record = DepthRecord::default();
    decode_depth_into(header, payload, &mut record)?;
    Ok(record)
}

/// Encode a [`DepthRecord`] back to its wire bytes, header included.
pub fn encode_depth(record: &DepthRecord) -> Vec<u8> {
    let header = record.header.expect("encode_depth requires a header");
    let mut out = Vec::with_capacity(HEADER_LEN + record.levels.len() * DEPTH_LEVEL_LEN);
    out.extend_from_slice(&encode_header(&header));
    for level in &record.levels {
        encode_depth_level(&mut out, level);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header(code: FeedResponseCode, security_id: i32) -> PacketHeader {
        PacketHeader {
            response_code: code,
            message_length: 0,
            exchange_segment: Some(ExchangeSegment::NSE_EQ),
            exchange_segment_raw: ExchangeSegment::NSE_EQ.segment_code(),
            security_id,
        }
    }

    // Ticker decode for segment=NSE_EQ, security=11536, LTP=800.0,
    // time=0x12345678: a 4-byte f32 LTP followed by a 4-byte i32 timestamp,
    // with header fields (code, len-u16, segment, security-u32) carried
    // separately from the payload.
    #[test]
    fn ticker_decode_round_trips_documented_layout() {
        let header = sample_header(FeedResponseCode::Ticker, 11536);
        let mut payload = Vec::new();
        payload.extend_from_slice(&800.0f32.to_le_bytes());
        payload.extend_from_slice(&0x1234_5678i32.to_le_bytes());

        let record = decode_ticker(header, &payload).unwrap();
        assert_eq!(record.ltp, 800.0);
        assert_eq!(record.ltt, 0x1234_5678);
        assert_eq!(record.header.unwrap().security_id, 11536);
        assert_eq!(
            record.header.unwrap().exchange_segment,
            Some(ExchangeSegment::NSE_EQ)
        );
    }

    #[test]
    fn ticker_round_trip() {
        let header = sample_header(FeedResponseCode::Ticker, 11536);
        let record = TickerRecord {
            header: Some(header),
            ltp: 800.0,
            ltt: 0x1234_5678,
        };
        let bytes = encode_ticker(&record);
        let parsed_header = parse_header(&bytes).unwrap();
        let decoded = decode_ticker(parsed_header, &bytes[HEADER_LEN..]).unwrap();
        assert_eq!(decoded.ltp, record.ltp);
        assert_eq!(decoded.ltt, record.ltt);
        assert_eq!(encode_ticker(&decoded), bytes);
    }

    #[test]
    fn quote_round_trip() {
        let header = sample_header(FeedResponseCode::Quote, 1333);
        let record = QuoteRecord {
            header: Some(header),
            ltp: 1.5,
            ltq: 10,
            time: 42,
            atp: 1.25,
            volume: 1000,
            sell_qty: 5,
            buy_qty: 7,
            open: 1.0,
            close: 2.0,
            high: 2.5,
            low: 0.5,
        };
        let bytes = encode_quote(&record);
        assert_eq!(bytes.len(), HEADER_LEN + QUOTE_PAYLOAD_LEN);
        let parsed_header = parse_header(&bytes).unwrap();
        let decoded = decode_quote(parsed_header, &bytes[HEADER_LEN..]).unwrap();
        assert_eq!(decoded.ltp, record.ltp);
        assert_eq!(decoded.volume, record.volume);
        assert_eq!(encode_quote(&decoded), bytes);
    }

    #[test]
    fn full_round_trip() {
        let header = sample_header(FeedResponseCode::Full, 11536);
        let mut depth = [DepthLevel::default(); 5];
        for (i, level) in depth.iter_mut().enumerate() {
            level.bid_qty = i as u32;
            level.ask_qty = i as u32 + 1;
            level.bid_price = i as f32;
            level.ask_price = i as f32 + 0.5;
        }
        let record = FullRecord {
            header: Some(header),
            quote: QuoteRecord {
                header: None,
                ltp: 1.5,
                ..Default::default()
            },
            depth,
        };
        let bytes = encode_full(&record);
        assert_eq!(bytes.len(), HEADER_LEN + FULL_PAYLOAD_LEN);
        let parsed_header = parse_header(&bytes).unwrap();
        let decoded = decode_full(parsed_header, &bytes[HEADER_LEN..]).unwrap();
        assert_eq!(decoded.quote.ltp, 1.5);
        assert_eq!(decoded.depth, depth);
    }

    #[test]
    fn depth_level_count_derived_from_payload_len() {
        let header = sample_header(FeedResponseCode::Depth20, 11536);
        let levels: Vec<DepthLevel> = (0..20)
            .map(|i| DepthLevel {
                bid_qty: i,
                ..Default::default()
            })
            .collect();
        let record = DepthRecord {
            header: Some(header),
            levels,
        };
        let bytes = encode_depth(&record);
        assert_eq!(bytes.len(), HEADER_LEN + 20 * DEPTH_LEVEL_LEN);

        let mut reused = DepthRecord::default();
        let parsed_header = parse_header(&bytes).unwrap();
        decode_depth_into(parsed_header, &bytes[HEADER_LEN..], &mut reused).unwrap();
        assert_eq!(reused.levels.len(), 20);
        assert_eq!(reused.levels[19].bid_qty, 19);
    }

    #[test]
    fn depth_non_multiple_of_20_is_malformed() {
        let header = sample_header(FeedResponseCode::Depth20, 11536);
        let bad_payload = vec![0u8; 21];
        let err = decode_depth(header, &bad_payload).unwrap_err();
        assert!(matches!(err, BrokerError::MalformedPacket(_)));
    }

    #[test]
    fn short_payload_is_malformed() {
        let header = sample_header(FeedResponseCode::Ticker, 1);
        let err = decode_ticker(header, &[0u8; 4]).unwrap_err();
        assert!(matches!(err, BrokerError::MalformedPacket(_)));
    }

    #[test]
    fn parse_header_rejects_short_input() {
        let err = parse_header(&[0u8; 4]).unwrap_err();
        assert!(matches!(err, BrokerError::MalformedPacket(_)));
    }

    #[test]
    fn parse_header_rejects_unknown_response_code() {
        let bytes = [0xFFu8, 0, 0, 1, 0, 0, 0, 0];
        let err = parse_header(&bytes).unwrap_err();
        assert!(matches!(err, BrokerError::MalformedPacket(_)));
    }
}
