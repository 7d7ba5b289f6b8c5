//! Hit counts over the pixel grid.
//!
//! During sampling every worker owns one chunk of a single arena
//! allocation, so nothing in the hot loop is shared.  Once every
//! worker has been joined the chunks are summed into one histogram.

use std::ops::AddAssign;

/// An `N*N` grid of 64-bit hit counters, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    size: usize,
    counts: Vec<u64>,
}

impl Histogram {
    /// An all-zero histogram of side `size`.
    pub fn new(size: usize) -> Self {
        Histogram {
            size,
            counts: vec![0; size * size],
        }
    }

    /// Wraps an existing row-major buffer of counts.
    pub fn from_counts(size: usize, counts: Vec<u64>) -> Self {
        assert_eq!(counts.len(), size * size, "counts do not fill the grid");
        Histogram { size, counts }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The counts in row-major order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Count at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> u64 {
        self.counts[y * self.size + x]
    }

    /// Sum of every counter.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `ln(max(1, count))` for every cell, so empty cells and cells
    /// hit once both come out as zero.
    pub fn log_scaled(&self) -> Vec<f64> {
        self.counts
            .iter()
            .map(|&c| (c.max(1) as f64).ln())
            .collect()
    }
}

impl<'a> AddAssign<&'a [u64]> for Histogram {
    fn add_assign(&mut self, other: &'a [u64]) {
        assert_eq!(self.counts.len(), other.len(), "histograms differ in size");
        for (acc, v) in self.counts.iter_mut().zip(other.iter()) {
            *acc += *v;
        }
    }
}

impl<'a> AddAssign<&'a Histogram> for Histogram {
    fn add_assign(&mut self, other: &'a Histogram) {
        *self += other.counts.as_slice();
    }
}

/// One zeroed counter block per worker, laid out back to back.
pub fn arena(size: usize, workers: usize) -> Vec<u64> {
    vec![0; size * size * workers]
}

/// Given the per-worker blocks of an arena, merge them all into a
/// single histogram.  Must only run after every writer has finished.
pub fn merge(size: usize, arena: &[u64]) -> Histogram {
    let mut merged = Histogram::new(size);
    if merged.counts.is_empty() {
        return merged;
    }
    for region in arena.chunks(merged.counts.len()) {
        merged += region;
    }
    merged
}

/// Smallest and largest value of a field, or `None` if it is empty.
/// NaNs are skipped.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(values: &[u64]) -> Vec<u64> {
        values.to_vec()
    }

    #[test]
    fn merge_sums_every_block() {
        let mut arena = block(&[1, 2, 3, 4]);
        arena.extend(block(&[10, 20, 30, 40]));
        arena.extend(block(&[100, 0, 0, 1]));
        let merged = merge(2, &arena);
        assert_eq!(merged.counts(), &[111, 22, 33, 45]);
        assert_eq!(merged.get(1, 1), 45);
        assert_eq!(merged.total(), 211);
    }

    #[test]
    fn merge_is_order_independent() {
        let a = block(&[5, 0, 7, 1, 1, 2, 0, 9, 3]);
        let b = block(&[0, 4, 0, 8, 8, 8, 1, 0, 2]);
        let c = block(&[6, 6, 0, 0, 3, 1, 4, 4, 4]);

        let abc: Vec<u64> = [a.clone(), b.clone(), c.clone()].concat();
        let cab: Vec<u64> = [c.clone(), a.clone(), b.clone()].concat();
        assert_eq!(merge(3, &abc), merge(3, &cab));

        // (a + b) + c == a + (b + c)
        let mut left = merge(3, &[a.clone(), b.clone()].concat());
        left += c.as_slice();
        let mut right = Histogram::from_counts(3, a);
        right += &merge(3, &[b, c].concat());
        assert_eq!(left, right);
    }

    #[test]
    fn merge_of_an_empty_arena_is_zero() {
        assert_eq!(merge(3, &[]).total(), 0);
        assert_eq!(merge(0, &[]).counts().len(), 0);
    }

    #[test]
    fn log_scale_floors_at_one() {
        let h = Histogram::from_counts(2, vec![0, 1, 10, 100]);
        let scaled = h.log_scaled();
        assert_eq!(scaled[0], 0.0);
        assert_eq!(scaled[1], 0.0);
        assert!((scaled[2] - 10f64.ln()).abs() < 1e-12);
        assert!((scaled[3] - 100f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn min_max_of_a_field() {
        assert_eq!(min_max(&[]), None);
        assert_eq!(min_max(&[3.0, -1.0, 7.5, 0.0]), Some((-1.0, 7.5)));
        assert_eq!(min_max(&[::std::f64::NAN, 2.0]), Some((2.0, 2.0)));
    }
}
