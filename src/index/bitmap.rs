//! Ordered index over integer keys backed by compressed bitmaps
//!
//! One roaring bitmap per distinct value, keys sorted ascending. Built once
//! from a full column and immutable afterwards, which makes it safe to share
//! across reader threads. The one query shape it serves is "rows strictly
//! greater than a threshold", answered by a parallel union over a suffix of
//! the bitmaps.

use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;
use roaring::RoaringBitmap;

use crate::base::{Len, RowId};

/// Number of partial unions computed in parallel by `greater`. Performance
/// knob only: the result is identical for any fan-out.
const UNION_FANOUT: usize = 4;

pub struct BitmapPostingsIndex {
    // Sorted distinct values; bitmaps[i] holds the rows where values[i]
    // occurs
    values: Vec<i64>,
    bitmaps: Vec<RoaringBitmap>,
}

impl BitmapPostingsIndex {
    /// Builds the index from a column in one pass; the row id of a value is
    /// its position in the column.
    pub fn build(column: &[i64]) -> Self {
        let mut groups = BTreeMap::<i64, RoaringBitmap>::new();
        for (row, &value) in column.iter().enumerate() {
            groups.entry(value).or_default().insert(row as RowId);
        }
        debug!(
            "bitmap index over {} rows, {} distinct values",
            column.len(),
            groups.len()
        );

        let (values, bitmaps) = groups.into_iter().unzip();
        Self { values, bitmaps }
    }

    /// Rows whose value is strictly greater than `threshold`: returns the
    /// count and an ascending iterator over the row ids.
    ///
    /// The union over the qualifying bitmaps is computed with a bounded
    /// fan-out reduction; the call blocks until the full union is ready.
    pub fn greater(&self, threshold: i64) -> (u64, impl Iterator<Item = RowId>) {
        // First value > threshold
        let start = self.values.partition_point(|&v| v <= threshold);
        debug!(
            "> {}: union over {} of {} bitmaps",
            threshold,
            self.bitmaps.len() - start,
            self.bitmaps.len()
        );
        let union = par_union(&self.bitmaps[start..]);
        (union.len(), union.into_iter())
    }

    /// Total serialized footprint of the bitmaps, in bytes (informational)
    pub fn size_in_bytes(&self) -> u64 {
        self.bitmaps.iter().map(|bm| bm.serialized_size() as u64).sum()
    }
}

impl Len for BitmapPostingsIndex {
    /// Number of distinct values
    fn len(&self) -> usize {
        self.values.len()
    }
}

/// Union of a slice of bitmaps, split into at most `UNION_FANOUT` partial
/// unions computed in parallel and then combined
fn par_union(bitmaps: &[RoaringBitmap]) -> RoaringBitmap {
    if bitmaps.is_empty() {
        return RoaringBitmap::new();
    }
    let chunk = (bitmaps.len() + UNION_FANOUT - 1) / UNION_FANOUT;
    bitmaps
        .par_chunks(chunk)
        .map(|part| {
            let mut acc = RoaringBitmap::new();
            for bm in part {
                acc |= bm;
            }
            acc
        })
        .reduce(RoaringBitmap::new, |mut a, b| {
            a |= b;
            a
        })
}
