//! Scoped-callback object pool for decoded packet records.
//!
//! The hot receive path must not allocate once warmed up. Each packet
//! variant gets its own lock-free free list (`crossbeam_queue::ArrayQueue`)
//! of pre-built records; decoding writes into a borrowed slot instead of
//! returning an owned value, and the slot is returned to the pool when the
//! caller's scope ends — including when the caller's callback returns an
//! error or panics, since that's handled by the guard's `Drop` impl rather
//! than manual bookkeeping.
//!
//! Pool exhaustion under a traffic burst falls back to a fresh heap
//! allocation (`T::default()`) so correctness never depends on sizing the
//! pool exactly right; it only costs an allocation outside of steady state.

use std::ops::{Deref, DerefMut};

use crossbeam_queue::ArrayQueue;

use crate::error::Result;
use crate::feed::codec::{
    DepthRecord, FullRecord, OiRecord, PacketHeader, PrevCloseRecord, QuoteRecord, TickerRecord,
    decode_depth_into, decode_full, decode_oi, decode_prev_close, decode_quote, decode_ticker,
};

/// A lock-free free list of reusable `T` values.
pub struct RecordPool<T> {
    free: ArrayQueue<T>,
}

impl<T: Default> RecordPool<T> {
    /// Pre-allocate `capacity` default records.
    pub fn new(capacity: usize) -> Self {
        let free = ArrayQueue::new(capacity.max(1));
        for _ in 0..capacity {
            // ArrayQueue::push only fails when full, which cannot happen here.
            let _ = free.push(T::default());
        }
        Self { free }
    }

    fn acquire(&self) -> T {
        self.free.pop().unwrap_or_default()
    }

    fn release(&self, value: T) {
        // A full queue means the pool grew past its configured capacity
        // during a burst; drop the value rather than grow the pool.
        let _ = self.free.push(value);
    }

    /// Number of records currently parked in the free list.
    pub fn available(&self) -> usize {
        self.free.len()
    }
}

/// RAII handle to a pooled record. Returns the record to its pool on drop,
/// regardless of how the scope is exited.
struct PooledGuard<'a, T: Default> {
    pool: &'a RecordPool<T>,
    value: Option<T>,
}

impl<'a, T: Default> PooledGuard<'a, T> {
    fn acquire(pool: &'a RecordPool<T>) -> Self {
        Self {
            pool,
            value: Some(pool.acquire()),
        }
    }
}

impl<T: Default> Deref for PooledGuard<'_, T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.value.as_ref().expect("guard value taken before drop")
    }
}

impl<T: Default> DerefMut for PooledGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_mut().expect("guard value taken before drop")
    }
}

impl<T: Default> Drop for PooledGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.release(value);
        }
    }
}

/// Acquire a record, decode into it, invoke `f` with a borrowed reference,
/// and return the record to the pool before returning. The borrowed
/// reference cannot outlive this call.
fn with_scoped<T, D, F, R>(pool: &RecordPool<T>, decode: D, f: F) -> Result<R>
where
    T: Default,
    D: FnOnce(&mut T) -> Result<()>,
    F: FnOnce(&T) -> Result<R>,
{
    let mut guard = PooledGuard::acquire(pool);
    decode(&mut guard)?;
    f(&guard)
}

/// Pool of [`TickerRecord`] slots.
pub type TickerPool = RecordPool<TickerRecord>;
/// Pool of [`QuoteRecord`] slots.
pub type QuotePool = RecordPool<QuoteRecord>;
/// Pool of [`OiRecord`] slots.
pub type OiPool = RecordPool<OiRecord>;
/// Pool of [`PrevCloseRecord`] slots.
pub type PrevClosePool = RecordPool<PrevCloseRecord>;
/// Pool of [`FullRecord`] slots.
pub type FullPool = RecordPool<FullRecord>;
/// Pool of [`DepthRecord`] slots. Each slot retains its `Vec<DepthLevel>`
/// capacity across reuse; only growth beyond the high-water mark allocates.
pub type DepthPool = RecordPool<DepthRecord>;

/// Decode a Ticker payload via the pool and invoke `f` with the borrowed record.
pub fn with_ticker<F, R>(pool: &TickerPool, header: PacketHeader, payload: &[u8], f: F) -> Result<R>
where
    F: FnOnce(&TickerRecord) -> Result<R>,
{
    with_scoped(
        pool,
        |rec| {
            *rec = decode_ticker(header, payload)?;
            Ok(())
        },
        f,
    )
}

/// Decode a Quote payload via the pool and invoke `f` with the borrowed record.
pub fn with_quote<F, R>(pool: &QuotePool, header: PacketHeader, payload: &[u8], f: F) -> Result<R>
where
    F: FnOnce(&QuoteRecord) -> Result<R>,
{
    with_scoped(
        pool,
        |rec| {
            *rec = decode_quote(header, payload)?;
            Ok(())
        },
        f,
    )
}

/// Decode an OI payload via the pool and invoke `f` with the borrowed record.
pub fn with_oi<F, R>(pool: &OiPool, header: PacketHeader, payload: &[u8], f: F) -> Result<R>
where
    F: FnOnce(&OiRecord) -> Result<R>,
{
    with_scoped(
        pool,
        |rec| {
            *rec = decode_oi(header, payload)?;
            Ok(())
        },
        f,
    )
}

/// Decode a PrevClose payload via the pool and invoke `f` with the borrowed record.
pub fn with_prev_close<F, R>(
    pool: &PrevClosePool,
    header: PacketHeader,
    payload: &[u8],
    f: F,
) -> Result<R>
where
    F: FnOnce(&PrevCloseRecord) -> Result<R>,
{
    with_scoped(
        pool,
        |rec| {
            *rec = decode_prev_close(header, payload)?;
            Ok(())
        },
        f,
    )
}

/// Decode a Full payload via the pool and invoke `f` with the borrowed record.
pub fn with_full<F, R>(pool: &FullPool, header: PacketHeader, payload: &[u8], f: F) -> Result<R>
where
    F: FnOnce(&FullRecord) -> Result<R>,
{
    with_scoped(
        pool,
        |rec| {
            *rec = decode_full(header, payload)?;
            Ok(())
        },
        f,
    )
}

/// Decode a depth payload via the pool and invoke `f` with the borrowed
/// record. The record's level `Vec` is cleared and refilled in place,
/// reusing its capacity across calls.
pub fn with_depth<F, R>(pool: &DepthPool, header: PacketHeader, payload: &[u8], f: F) -> Result<R>
where
    F: FnOnce(&DepthRecord) -> Result<R>,
{
    with_scoped(pool, |rec| decode_depth_into(header, payload, rec), f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::codec::encode_ticker;
    use crate::types::enums::{ExchangeSegment, FeedResponseCode};

    fn sample_header() -> PacketHeader {
        PacketHeader {
            response_code: FeedResponseCode::Ticker,
            message_length: 16,
            exchange_segment: Some(ExchangeSegment::NSE_EQ),
            exchange_segment_raw: ExchangeSegment::NSE_EQ.segment_code(),
            security_id: 11536,
        }
    }

    #[test]
    fn pool_returns_record_after_successful_callback() {
        let pool = TickerPool::new(2);
        assert_eq!(pool.available(), 2);

        let header = sample_header();
        let record = TickerRecord {
            header: Some(header),
            ltp: 1.0,
            ltt: 1,
        };
        let bytes = encode_ticker(&record);
        let payload = &bytes[8..];

        let result = with_ticker(&pool, header, payload, |rec| {
            assert_eq!(rec.ltp, 1.0);
            Ok(42)
        })
        .unwrap();

        assert_eq!(result, 42);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn pool_returns_record_even_when_callback_errors() {
        let pool = TickerPool::new(1);
        let header = sample_header();
        let record = TickerRecord {
            header: Some(header),
            ltp: 1.0,
            ltt: 1,
        };
        let bytes = encode_ticker(&record);
        let payload = &bytes[8..];

        let err = with_ticker(&pool, header, payload, |_rec| {
            Err(crate::error::BrokerError::HandlerFault("boom".into()))
        })
        .unwrap_err();

        assert!(matches!(err, crate::error::BrokerError::HandlerFault(_)));
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn pool_steady_state_count_does_not_grow() {
        let pool = TickerPool::new(4);
        let header = sample_header();
        let record = TickerRecord {
            header: Some(header),
            ltp: 1.0,
            ltt: 1,
        };
        let bytes = encode_ticker(&record);
        let payload = &bytes[8..];

        for _ in 0..1000 {
            with_ticker(&pool, header, payload, |_rec| Ok(())).unwrap();
        }
        assert_eq!(pool.available(), 4);
    }

    #[test]
    fn depth_pool_reuses_vec_capacity() {
        let pool = DepthPool::new(1);
        let header = PacketHeader {
            response_code: FeedResponseCode::Depth20,
            ..sample_header()
        };
        let levels: Vec<u8> = vec![0u8; 20 * 20];

        with_depth(&pool, header, &levels, |rec| {
            assert_eq!(rec.levels.len(), 20);
            Ok(())
        })
        .unwrap();

        // Second call with fewer levels should clear, not leak stale entries.
        let fewer: Vec<u8> = vec![0u8; 5 * 20];
        with_depth(&pool, header, &fewer, |rec| {
            assert_eq!(rec.levels.len(), 5);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn pool_falls_back_to_heap_allocation_on_exhaustion() {
        let pool = TickerPool::new(1);
        let header = sample_header();
        let record = TickerRecord {
            header: Some(header),
            ltp: 1.0,
            ltt: 1,
        };
        let bytes = encode_ticker(&record);
        let payload = &bytes[8..];

        // Hold one guard open across a nested acquire to force exhaustion.
        let outer = PooledGuard::acquire(&pool);
        let result = with_ticker(&pool, header, payload, |rec| Ok(rec.ltp)).unwrap();
        assert_eq!(result, 1.0);
        drop(outer);
        // The pool is back to capacity 1 since the fallback record is
        // dropped instead of pushed back onto an already-full queue.
        assert_eq!(pool.available(), 1);
    }
}
