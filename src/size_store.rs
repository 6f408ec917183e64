use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::{EstimateSize, Error, Result};

/// Per-index item sizes plus a prefix-sum tree over them.
///
/// A measurement patches the tree in `O(log n)`; leading edges and offset lookups are
/// `O(log n)` as well. Estimate changes rebuild the tree from scratch.
#[derive(Clone, Debug)]
pub struct SizeStore {
    estimate: EstimateSize,
    measured: Vec<Option<f64>>,
    sums: Fenwick,
}

impl SizeStore {
    pub fn new(count: usize, estimate: EstimateSize) -> Result<Self> {
        estimate.validate()?;
        vdebug!(count, "SizeStore::new");
        let sums = Fenwick::from_sizes((0..count).map(|i| estimate.get(i)));
        Ok(Self {
            estimate,
            measured: alloc::vec![None; count],
            sums,
        })
    }

    pub fn count(&self) -> usize {
        self.measured.len()
    }

    pub fn estimate(&self) -> &EstimateSize {
        &self.estimate
    }

    /// Sets the fallback size for unmeasured items.
    ///
    /// Measured sizes are kept.
    pub fn set_estimate(&mut self, size: f64) -> Result<()> {
        self.replace_estimate(EstimateSize::Fixed(size))
    }

    pub fn set_estimate_fn(&mut self, estimate: impl Fn(usize) -> f64 + Send + Sync + 'static) {
        self.estimate = EstimateSize::PerIndex(Arc::new(estimate));
        vdebug!("SizeStore::set_estimate_fn");
        self.rebuild();
    }

    /// Swaps the estimate, invalidating cached offsets only if it actually changed.
    pub fn replace_estimate(&mut self, estimate: EstimateSize) -> Result<()> {
        if let Err(err) = estimate.validate() {
            vwarn!(?estimate, "rejected estimated item size");
            return Err(err);
        }
        if self.estimate.same_as(&estimate) {
            return Ok(());
        }
        vdebug!(?estimate, "SizeStore::replace_estimate");
        self.estimate = estimate;
        self.rebuild();
        Ok(())
    }

    /// Grows or shrinks the store. Measurements below `count` survive.
    pub fn set_count(&mut self, count: usize) {
        let prev = self.measured.len();
        if prev == count {
            return;
        }
        vdebug!(prev, count, "SizeStore::set_count");
        self.measured.resize(count, None);
        if count < prev {
            self.sums.truncate(count);
        } else {
            for i in prev..count {
                self.sums.push_value(self.estimate.get(i));
            }
        }
    }

    /// Records an authoritative size for `index`.
    ///
    /// Returns `Ok(true)` when the item's size changed. Non-finite or negative sizes are
    /// dropped and the previous value kept.
    pub fn record_measurement(&mut self, index: usize, size: f64) -> Result<bool> {
        let count = self.count();
        if index >= count {
            return Err(Error::out_of_range(index, count));
        }
        if !(size.is_finite() && size >= 0.0) {
            vwarn!(index, size, "dropped invalid measurement");
            return Ok(false);
        }
        let prev = self.size_of(index);
        self.measured[index] = Some(size);
        if prev == size {
            return Ok(false);
        }
        vtrace!(index, prev, size, "SizeStore::record_measurement");
        self.sums.add(index, size - prev);
        Ok(true)
    }

    /// Forgets all measurements.
    pub fn reset_measurements(&mut self) {
        self.measured.iter_mut().for_each(|m| *m = None);
        self.rebuild();
    }

    pub fn is_measured(&self, index: usize) -> bool {
        matches!(self.measured.get(index), Some(Some(_)))
    }

    pub fn measured_count(&self) -> usize {
        self.measured.iter().filter(|m| m.is_some()).count()
    }

    pub fn size_of(&self, index: usize) -> f64 {
        match self.measured.get(index) {
            Some(Some(size)) => *size,
            _ => self.estimate.get(index),
        }
    }

    /// Leading edge of item `index`: the sum of the sizes of items `0..index`.
    ///
    /// Indexes past the item count are extrapolated with the estimate.
    pub fn cumulative_offset(&self, index: usize) -> f64 {
        let count = self.count();
        let mut offset = self.sums.prefix_sum(index.min(count));
        for i in count..index {
            offset += self.estimate.get(i);
        }
        offset
    }

    pub fn total_extent(&self, item_count: usize) -> f64 {
        self.cumulative_offset(item_count)
    }

    /// Index of the item covering `offset`, i.e. the smallest `i` with
    /// `cumulative_offset(i + 1) > offset`, clamped to the last item.
    ///
    /// Returns `None` for an empty store or a non-finite offset.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        let count = self.count();
        if count == 0 || !offset.is_finite() {
            return None;
        }
        Some(self.sums.lower_bound(offset).min(count - 1))
    }

    fn rebuild(&mut self) {
        let sums = Fenwick::from_sizes((0..self.count()).map(|i| self.size_of(i)));
        self.sums = sums;
    }
}
