// src/analysis/summary.rs

use serde::{Deserialize, Serialize};

use super::sampler::SampleSet;
use crate::error::{Result, SimulationError};

const STANDARD_CONFIDENCE_LEVELS: [f64; 3] = [0.90, 0.95, 0.99];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceInterval {
    pub confidence_level: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub width: f64,
    pub count: usize,
}

/// Descriptive statistics and histogram data for one sample set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub confidence_intervals: Vec<ConfidenceInterval>,
    pub histogram: Vec<HistogramBin>,
}

impl SampleSummary {
    pub fn from_samples(samples: &SampleSet, bins: usize) -> Result<Self> {
        if samples.is_empty() {
            return Err(SimulationError::invalid("cannot summarize an empty sample set"));
        }
        if bins == 0 {
            return Err(SimulationError::invalid("histogram needs at least one bin"));
        }

        let values = samples.as_slice();
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Ok(Self {
            count: n,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            confidence_intervals: Self::confidence_intervals(&sorted),
            histogram: Self::histogram(values, min, max, bins),
        })
    }

    /// Percentile intervals from sorted samples, starting with the full min/max range.
    fn confidence_intervals(sorted: &[f64]) -> Vec<ConfidenceInterval> {
        let n = sorted.len();
        let mut intervals = vec![ConfidenceInterval {
            confidence_level: 1.0,
            lower_bound: sorted[0],
            upper_bound: sorted[n - 1],
        }];

        intervals.extend(STANDARD_CONFIDENCE_LEVELS.iter().map(|&confidence| {
            let alpha = 1.0 - confidence;
            let lower_index = (((alpha / 2.0) * n as f64).round() as usize).min(n - 1);
            let upper_index = (((1.0 - alpha / 2.0) * n as f64).round() as usize).min(n - 1);

            ConfidenceInterval {
                confidence_level: confidence,
                lower_bound: sorted[lower_index],
                upper_bound: sorted[upper_index],
            }
        }));

        intervals
    }

    fn histogram(values: &[f64], min: f64, max: f64, bins: usize) -> Vec<HistogramBin> {
        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];

        for &x in values {
            let index = if width > 0.0 {
                // The maximum lands exactly on the upper edge; keep it in the last bin.
                (((x - min) / width) as usize).min(bins - 1)
            } else {
                0
            };
            counts[index] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                width,
                count,
            })
            .collect()
    }

    pub fn interval(&self, confidence_level: f64) -> Option<&ConfidenceInterval> {
        self.confidence_intervals
            .iter()
            .find(|ci| (ci.confidence_level - confidence_level).abs() < 1e-9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_statistics() {
        let samples = SampleSet::from_values(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let summary = SampleSummary::from_samples(&samples, 4).unwrap();
        assert_eq!(summary.count, 8);
        assert!((summary.mean - 5.0).abs() < 1e-12);
        assert!((summary.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
    }

    #[test]
    fn histogram_counts_every_sample() {
        let samples = SampleSet::from_values((0..=100).map(f64::from).collect());
        let summary = SampleSummary::from_samples(&samples, 30).unwrap();
        assert_eq!(summary.histogram.len(), 30);
        assert_eq!(summary.histogram.iter().map(|b| b.count).sum::<usize>(), 101);
        assert_eq!(summary.histogram[0].start, 0.0);
        assert!(summary.histogram.last().unwrap().count > 0);
    }

    #[test]
    fn constant_samples_fill_first_bin() {
        let samples = SampleSet::from_values(vec![3.0; 5]);
        let summary = SampleSummary::from_samples(&samples, 10).unwrap();
        assert_eq!(summary.histogram[0].count, 5);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn single_sample_has_zero_deviation() {
        let summary = SampleSummary::from_samples(&SampleSet::from_values(vec![600.0]), 30).unwrap();
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.interval(0.95).unwrap().lower_bound, 600.0);
    }

    #[test]
    fn intervals_are_nested() {
        let samples = SampleSet::from_values((0..1000).map(f64::from).collect());
        let summary = SampleSummary::from_samples(&samples, 30).unwrap();
        let full = summary.interval(1.0).unwrap();
        let p99 = summary.interval(0.99).unwrap();
        let p90 = summary.interval(0.90).unwrap();
        assert!(full.lower_bound <= p99.lower_bound && p99.lower_bound <= p90.lower_bound);
        assert!(full.upper_bound >= p99.upper_bound && p99.upper_bound >= p90.upper_bound);
    }

    #[test]
    fn rejects_empty_and_zero_bins() {
        assert!(SampleSummary::from_samples(&SampleSet::default(), 30).is_err());
        assert!(SampleSummary::from_samples(&SampleSet::from_values(vec![1.0]), 0).is_err());
    }
}
