//! Bounded price-history recorder for multiplier drag events
//!
//! Samples arrive continuously while the slider is dragged. Each one is
//! rounded to [`HISTORY_DECIMALS`] places and compared with the last value
//! that was actually recorded; repeats are dropped so sub-precision jitter
//! does not flood the table. Records are kept most-recent-first and the
//! oldest fall off once the buffer is full.

use std::collections::VecDeque;

use crate::math::{compute_il, round_to, IlSeverity, Pool};
use crate::{HISTORY_CAPACITY, HISTORY_DECIMALS};

/// One row of the history table (immutable once recorded)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HistoryRecord {
    /// Monotonic per recorder, starting at 1
    pub id: u64,
    /// Multiplier rounded to 3 decimals
    pub multiplier: f64,
    /// Spot price y/x at that multiplier
    pub price: f64,
    pub x: f64,
    pub y: f64,
    /// Impermanent loss as a fraction (-0.2 = -20%)
    pub il: f64,
    pub classification: IlSeverity,
}

#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    last_rounded: Option<f64>,
    next_id: u64,
    buffer: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl Default for HistoryRecorder {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl HistoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder holding at most `capacity` rows (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            last_rounded: None,
            next_id: 1,
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Feed one multiplier sample
    ///
    /// Rounding follows [`round_to`], so a sample such as 1.0005 records as
    /// 1.001 (see its note on ties).
    ///
    /// Position, price and IL are computed at the rounded multiplier so a
    /// row always describes the value shown in its multiplier column.
    ///
    /// # Returns
    /// * `Some(record)` when the rounded value differs from the last recorded one
    /// * `None` when the sample was suppressed as a repeat, or rounds to a
    ///   multiplier the projector cannot use (<= 0 or not finite)
    pub fn record(&mut self, multiplier: f64, pool: &Pool) -> Option<&HistoryRecord> {
        let rounded = round_to(multiplier, HISTORY_DECIMALS);
        if !(rounded.is_finite() && rounded > 0.0) {
            log::debug!("history: ignoring unusable multiplier {}", multiplier);
            return None;
        }
        if self.last_rounded == Some(rounded) {
            log::trace!("history: suppressed repeat {:.3}", rounded);
            return None;
        }

        let pos = pool.position(rounded);
        let il = compute_il(rounded);
        let record = HistoryRecord {
            id: self.next_id,
            multiplier: rounded,
            price: pos.price(),
            x: pos.x,
            y: pos.y,
            il,
            classification: IlSeverity::classify(il),
        };

        self.next_id += 1;
        self.last_rounded = Some(rounded);
        self.buffer.push_front(record);
        if self.buffer.len() > self.capacity {
            self.buffer.truncate(self.capacity);
            log::trace!("history: evicted oldest, keeping {}", self.capacity);
        }

        self.buffer.front()
    }

    /// Drop every row and forget the last recorded value
    ///
    /// Ids keep counting up so a cleared table never reuses one.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.last_rounded = None;
    }

    /// Rows, most recent first
    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> + '_ {
        self.buffer.iter()
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.buffer.front()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Pool {
        Pool::new(1000.0, 1000.0).unwrap()
    }

    #[test]
    fn test_dedup_on_rounded_value() {
        let mut h = HistoryRecorder::new();
        let pool = pool();
        for r in [1.0001, 1.0002, 1.05] {
            h.record(r, &pool);
        }

        let rows: Vec<_> = h.records().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].multiplier, 1.05);
        assert_eq!(rows[1].multiplier, 1.0);
        assert_eq!(rows[0].id, 2);
        assert_eq!(rows[1].id, 1);
    }

    #[test]
    fn test_compares_against_last_recorded_not_last_raw() {
        let mut h = HistoryRecorder::new();
        let pool = pool();
        assert!(h.record(1.0004, &pool).is_some());
        // Drifts upward sample by sample but never leaves 1.000 after rounding
        assert!(h.record(1.0001, &pool).is_none());
        assert!(h.record(1.0004, &pool).is_none());
        assert!(h.record(1.0006, &pool).is_some());
        // Returning to an earlier (non-adjacent) value records again
        assert!(h.record(1.0, &pool).is_some());
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut h = HistoryRecorder::new();
        let pool = pool();
        for i in 1..=60 {
            h.record(1.0 + i as f64 * 0.01, &pool);
        }

        assert_eq!(h.len(), HISTORY_CAPACITY);
        let ids: Vec<u64> = h.records().map(|r| r.id).collect();
        assert_eq!(ids.first(), Some(&60));
        assert_eq!(ids.last(), Some(&11));
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_record_contents() {
        let mut h = HistoryRecorder::new();
        let rec = *h.record(4.0, &pool()).unwrap();

        assert_eq!(rec.multiplier, 4.0);
        assert!((rec.x - 500.0).abs() < 1e-9);
        assert!((rec.y - 2000.0).abs() < 1e-9);
        assert!((rec.price - 4.0).abs() < 1e-9);
        assert!((rec.il + 0.2).abs() < 1e-9);
        assert_eq!(rec.classification, IlSeverity::Severe);
    }

    #[test]
    fn test_classification_bands() {
        let mut h = HistoryRecorder::new();
        let pool = pool();
        assert_eq!(h.record(1.0, &pool).unwrap().classification, IlSeverity::None);
        // IL(1.1) ~ -0.11%
        assert_eq!(h.record(1.1, &pool).unwrap().classification, IlSeverity::Mild);
        assert_eq!(h.record(2.0, &pool).unwrap().classification, IlSeverity::Severe);
    }

    #[test]
    fn test_clear_keeps_ids_monotonic() {
        let mut h = HistoryRecorder::new();
        let pool = pool();
        h.record(1.5, &pool);
        h.record(2.0, &pool);
        h.clear();
        assert!(h.is_empty());
        assert!(h.latest().is_none());

        // Same value as before the clear is recorded again
        let rec = h.record(2.0, &pool).unwrap();
        assert_eq!(rec.id, 3);
    }

    #[test]
    fn test_tie_rounds_away_from_zero() {
        let mut h = HistoryRecorder::new();
        let pool = pool();
        assert_eq!(h.record(1.0005, &pool).unwrap().multiplier, 1.001);
        assert!(h.record(1.001, &pool).is_none());
    }

    #[test]
    fn test_ignores_unusable_multiplier() {
        let mut h = HistoryRecorder::new();
        let pool = pool();
        assert!(h.record(0.0004, &pool).is_none());
        assert!(h.record(-1.0, &pool).is_none());
        assert!(h.record(f64::NAN, &pool).is_none());
        assert!(h.is_empty());
    }

    #[test]
    fn test_custom_capacity() {
        let mut h = HistoryRecorder::with_capacity(3);
        let pool = pool();
        for r in [1.1, 1.2, 1.3, 1.4, 1.5] {
            h.record(r, &pool);
        }
        let mults: Vec<f64> = h.records().map(|r| r.multiplier).collect();
        assert_eq!(mults, vec![1.5, 1.4, 1.3]);
        assert_eq!(HistoryRecorder::with_capacity(0).capacity(), 1);
    }
}
