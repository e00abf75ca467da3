use std::fmt;

use num_traits::ToPrimitive;

use crate::error::{Error, Result};

const BAR_WIDTH: usize = 50;

/// Summary of a load vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMetrics {
    pub median: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub p25: f64,
    pub p75: f64,
    pub variance: f64,
}

impl LoadMetrics {
    pub fn from_loads<T: ToPrimitive>(loads: &[T]) -> Result<Self> {
        let mut values = to_f64s(loads)?;
        values.sort_by(f64::total_cmp);

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Ok(LoadMetrics {
            median: percentile(&values, 50.0),
            mean,
            min: values[0],
            max: values[values.len() - 1],
            p25: percentile(&values, 25.0),
            p75: percentile(&values, 75.0),
            variance,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

impl fmt::Display for LoadMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Median Load: {}", self.median)?;
        writeln!(f, "Average Load: {}", self.mean)?;
        writeln!(f, "Minimum Load: {}", self.min)?;
        writeln!(f, "Maximum Load: {}", self.max)?;
        writeln!(f, "25th Percentile Load: {}", self.p25)?;
        write!(f, "75th Percentile Load: {}", self.p75)
    }
}

fn to_f64s<T: ToPrimitive>(loads: &[T]) -> Result<Vec<f64>> {
    if loads.is_empty() {
        return Err(Error::invalid("no load values"));
    }
    loads
        .iter()
        .map(|v| {
            v.to_f64()
                .ok_or_else(|| Error::invalid("load value not representable as f64"))
        })
        .collect()
}

// linear interpolation between closest ranks; `sorted` must be non-empty
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Equal-width histogram of load values.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl Histogram {
    pub fn new<T: ToPrimitive>(loads: &[T], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(Error::invalid("histogram needs at least one bin"));
        }
        let values = to_f64s(loads)?;
        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0; bins];
        for v in values {
            let bin = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[bin] += 1;
        }
        Ok(Histogram { edges, counts })
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// `(lower, upper)` bounds of each bin.
    pub fn ranges(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.edges.windows(2).map(|w| (w[0], w[1]))
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let peak = self.counts.iter().copied().max().unwrap_or(0).max(1);
        for ((lo, hi), &count) in self.ranges().zip(&self.counts) {
            let bar = "#".repeat(count * BAR_WIDTH / peak);
            writeln!(f, "[{:>9.1}, {:>9.1}) {:>6} {}", lo, hi, count, bar)?;
        }
        Ok(())
    }
}
