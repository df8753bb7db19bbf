//! Capture interval statistics
//!
//! Diagnostic summary of the raw edge intervals of one capture,
//! computed before decoding. When a bus misbehaves, the spread between
//! the median and the extremes usually shows whether the problem is
//! timing drift, spurious edges, or a dead line.

use heapless::Vec;

use dlbus_protocol::EdgeSample;

use crate::capture::MAX_EDGES;

/// Summary statistics over the edge intervals of one capture
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalStats {
    /// Upper median interval
    pub median_us: u16,
    pub mean_us: f32,
    /// Population standard deviation
    pub stddev_us: f32,
    pub min_us: u16,
    pub max_us: u16,
}

impl IntervalStats {
    /// Compute over a capture's intervals; `None` for an empty slice.
    ///
    /// Callers exclude the anchor sample, whose interval is measured
    /// against nothing.
    pub fn from_samples(samples: &[EdgeSample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted: Vec<u16, MAX_EDGES> = Vec::new();
        for s in samples.iter().take(MAX_EDGES) {
            // Cannot fail: bounded by the take
            let _ = sorted.push(s.interval_us);
        }
        sorted.sort_unstable();

        let n = sorted.len();
        let sum: u32 = sorted.iter().map(|&t| t as u32).sum();
        let mean = sum as f32 / n as f32;
        let variance = sorted
            .iter()
            .map(|&t| {
                let d = t as f32 - mean;
                d * d
            })
            .sum::<f32>()
            / n as f32;

        Some(Self {
            median_us: sorted[n / 2],
            mean_us: mean,
            stddev_us: libm::sqrtf(variance),
            min_us: sorted[0],
            max_us: sorted[n - 1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples_of(intervals: &[u16]) -> std::vec::Vec<EdgeSample> {
        intervals
            .iter()
            .map(|&t| EdgeSample::new(t, true))
            .collect()
    }

    #[test]
    fn test_stats_over_known_intervals() {
        let samples = samples_of(&[1000, 2000, 3000, 4000, 1000, 2000, 3000, 4000]);
        let stats = IntervalStats::from_samples(&samples).unwrap();

        assert_eq!(stats.median_us, 3000);
        assert!((stats.mean_us - 2500.0).abs() < 0.1);
        assert!((stats.stddev_us - 1118.03).abs() < 0.1);
        assert_eq!(stats.min_us, 1000);
        assert_eq!(stats.max_us, 4000);
    }

    #[test]
    fn test_empty_capture_has_no_stats() {
        assert_eq!(IntervalStats::from_samples(&[]), None);
    }

    #[test]
    fn test_single_interval() {
        let samples = samples_of(&[1024]);
        let stats = IntervalStats::from_samples(&samples).unwrap();
        assert_eq!(stats.median_us, 1024);
        assert_eq!(stats.mean_us, 1024.0);
        assert_eq!(stats.stddev_us, 0.0);
        assert_eq!(stats.min_us, 1024);
        assert_eq!(stats.max_us, 1024);
    }
}
