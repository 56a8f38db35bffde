/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

[`SampleIndexGenerator`]: the continuous/discrete bridge. A generator maps a
sample index `k` to the half-open continuous interval it covers, and a
continuous ordinate to the index of the sample it falls in.

*/

use crate::interval::ContinuousInterval;
use crate::ordinate::Ordinate;

/// `{ sample_rate_hz, start_index }`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleIndexGenerator {
    pub sample_rate_hz: f64,
    pub start_index: i64,
}

impl SampleIndexGenerator {
    pub fn new(sample_rate_hz: f64, start_index: i64) -> Self {
        SampleIndexGenerator {
            sample_rate_hz,
            start_index,
        }
    }

    /// The half-open continuous interval covered by sample `k`:
    /// `[(k - start_index) / rate, (k - start_index + 1) / rate)`.
    pub fn index_to_interval(&self, k: i64) -> ContinuousInterval {
        let rel = (k - self.start_index) as f64;
        let start = rel / self.sample_rate_hz;
        let end = (rel + 1.0) / self.sample_rate_hz;
        ContinuousInterval::new(Ordinate::from_f64(start), Ordinate::from_f64(end))
    }

    /// The sample index that continuous ordinate `t` falls within:
    /// `floor(t * rate) + start_index`.
    pub fn ordinate_to_index(&self, t: Ordinate) -> i64 {
        (t.as_f64() * self.sample_rate_hz).floor() as i64 + self.start_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_ordinate() {
        let gen = SampleIndexGenerator::new(24.0, 0);
        for k in -5..5 {
            let iv = gen.index_to_interval(k);
            assert_eq!(gen.ordinate_to_index(iv.start), k);
        }
    }

    #[test]
    fn nonzero_start_index_offsets_correctly() {
        let gen = SampleIndexGenerator::new(10.0, 100);
        let iv = gen.index_to_interval(100);
        assert_eq!(iv.start, Ordinate::from_f64(0.0));
        assert_eq!(iv.end, Ordinate::from_f64(0.1));
        assert_eq!(gen.ordinate_to_index(Ordinate::from_f64(0.05)), 100);
    }
}
