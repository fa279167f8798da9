//! Rolling multi-series histogram buffer for sparkline charts.
//!
//! A [`HistogramBuffer`] keeps the last `capacity` sample vectors, each holding
//! one value per series (for a CPU: idle, interrupt, sys, nice, user). Once the
//! ring is full, every update overwrites the oldest slot.
//!
//! # Consumption Contract
//!
//! [`HistogramBuffer::iter`] always yields exactly `capacity` slots, oldest
//! first. Slots that were never written yield all-zero vectors, so a chart
//! drawn from a young buffer is right-aligned: empty columns on the left, the
//! history growing in from the right. The renderer never has to special-case a
//! partially filled ring.
//!
//! # Storage
//!
//! Samples live in one flat `Vec<f32>` of `capacity * series` values allocated
//! up front. Slot `i` occupies `data[i * series..(i + 1) * series]`. Nothing is
//! allocated after construction.

/// Fixed-capacity ring of multi-series samples.
#[derive(Clone, Debug)]
pub struct HistogramBuffer {
    /// Flat sample storage, `capacity * series` values.
    data: Vec<f32>,

    /// Number of time slots.
    capacity: usize,

    /// Values per slot.
    series: usize,

    /// Next slot to write. Also the oldest slot once the ring is full.
    head: usize,

    /// Total updates received (saturating).
    written: u64,
}

impl HistogramBuffer {
    /// Allocate a zeroed ring of `capacity` slots of `series` values.
    ///
    /// # Panics
    /// Panics if `capacity` or `series` is zero.
    pub fn new(
        capacity: usize,
        series: usize,
    ) -> Self {
        assert!(capacity > 0, "histogram capacity must be non-zero");
        assert!(series > 0, "histogram series count must be non-zero");
        Self {
            data: vec![0.0; capacity * series],
            capacity,
            series,
            head: 0,
            written: 0,
        }
    }

    /// Number of time slots (columns when rendered).
    #[inline]
    pub const fn capacity(&self) -> usize { self.capacity }

    /// Number of values per slot.
    #[inline]
    pub const fn series(&self) -> usize { self.series }

    /// Total number of updates received so far.
    #[inline]
    pub const fn samples_written(&self) -> u64 { self.written }

    /// Write `sample` into the next slot, overwriting the oldest one.
    ///
    /// # Panics
    /// Panics if `sample.len()` differs from the series count. A mismatch means
    /// the widget and its buffer were configured for different series.
    pub fn update(
        &mut self,
        sample: &[f32],
    ) {
        assert_eq!(
            sample.len(),
            self.series,
            "sample has {} values but the histogram tracks {} series",
            sample.len(),
            self.series
        );

        let start = self.head * self.series;
        self.data[start..start + self.series].copy_from_slice(sample);
        self.head = (self.head + 1) % self.capacity;
        self.written = self.written.saturating_add(1);
    }

    /// Iterate over all `capacity` slots from oldest to newest.
    pub fn iter(&self) -> HistogramIter<'_> {
        HistogramIter {
            buffer: self,
            pos: self.head,
            remaining: self.capacity,
        }
    }
}

impl<'a> IntoIterator for &'a HistogramBuffer {
    type IntoIter = HistogramIter<'a>;
    type Item = &'a [f32];

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Iterator over histogram slots (oldest to newest).
///
/// Starts at the write head: before the ring wraps, those slots are the
/// never-written zeros, which is exactly the leading padding the chart needs.
pub struct HistogramIter<'a> {
    buffer: &'a HistogramBuffer,
    pos: usize,
    remaining: usize,
}

impl<'a> Iterator for HistogramIter<'a> {
    type Item = &'a [f32];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let series = self.buffer.series;
        let start = self.pos * series;
        self.pos = (self.pos + 1) % self.buffer.capacity;
        self.remaining -= 1;
        Some(&self.buffer.data[start..start + series])
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl ExactSizeIterator for HistogramIter<'_> {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(hist: &HistogramBuffer) -> Vec<Vec<f32>> { hist.iter().map(<[f32]>::to_vec).collect() }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_is_all_zero() {
        let hist = HistogramBuffer::new(5, 3);
        assert_eq!(hist.capacity(), 5);
        assert_eq!(hist.series(), 3);
        assert_eq!(hist.samples_written(), 0);

        let slots = collect(&hist);
        assert_eq!(slots.len(), 5, "fresh buffer still yields every slot");
        assert!(slots.iter().all(|s| s == &[0.0, 0.0, 0.0]));
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn test_zero_capacity_panics() { let _ = HistogramBuffer::new(0, 2); }

    #[test]
    #[should_panic(expected = "series")]
    fn test_zero_series_panics() { let _ = HistogramBuffer::new(4, 0); }

    // -------------------------------------------------------------------------
    // Partially Filled Ring
    // -------------------------------------------------------------------------

    #[test]
    fn test_partial_fill_has_leading_zeros() {
        let mut hist = HistogramBuffer::new(5, 2);
        hist.update(&[1.0, 2.0]);
        hist.update(&[3.0, 4.0]);

        let slots = collect(&hist);
        assert_eq!(
            slots,
            vec![
                vec![0.0, 0.0],
                vec![0.0, 0.0],
                vec![0.0, 0.0],
                vec![1.0, 2.0],
                vec![3.0, 4.0],
            ],
            "k updates should be the last k slots, oldest first"
        );
    }

    #[test]
    fn test_exactly_full() {
        let mut hist = HistogramBuffer::new(3, 1);
        for v in [1.0, 2.0, 3.0] {
            hist.update(&[v]);
        }
        assert_eq!(collect(&hist), vec![vec![1.0], vec![2.0], vec![3.0]]);
    }

    // -------------------------------------------------------------------------
    // Overwrite
    // -------------------------------------------------------------------------

    #[test]
    fn test_overwrite_keeps_last_capacity_samples() {
        let mut hist = HistogramBuffer::new(4, 2);
        for (a, b) in [(1.0, 9.0), (2.0, 8.0), (3.0, 7.0), (4.0, 6.0), (5.0, 5.0)] {
            hist.update(&[a, b]);
        }

        assert_eq!(
            collect(&hist),
            vec![vec![2.0, 8.0], vec![3.0, 7.0], vec![4.0, 6.0], vec![5.0, 5.0]]
        );
        assert_eq!(hist.samples_written(), 5);
    }

    #[test]
    fn test_many_wraps() {
        let mut hist = HistogramBuffer::new(3, 1);
        for v in 0..100 {
            hist.update(&[v as f32]);
        }
        assert_eq!(collect(&hist), vec![vec![97.0], vec![98.0], vec![99.0]]);
    }

    // -------------------------------------------------------------------------
    // Iteration
    // -------------------------------------------------------------------------

    #[test]
    fn test_iter_is_restartable_and_exact_size() {
        let mut hist = HistogramBuffer::new(6, 2);
        hist.update(&[1.0, 1.0]);

        let iter = hist.iter();
        assert_eq!(iter.len(), 6);
        let first: Vec<_> = iter.collect();
        let second: Vec<_> = (&hist).into_iter().collect();
        assert_eq!(first, second, "iterating twice should give the same view");
    }

    // -------------------------------------------------------------------------
    // Contract Violations
    // -------------------------------------------------------------------------

    #[test]
    #[should_panic(expected = "series")]
    fn test_short_sample_panics() {
        let mut hist = HistogramBuffer::new(4, 3);
        hist.update(&[1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "series")]
    fn test_long_sample_panics() {
        let mut hist = HistogramBuffer::new(4, 1);
        hist.update(&[1.0, 2.0]);
    }
}
