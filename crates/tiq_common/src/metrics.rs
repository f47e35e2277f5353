//! Statistical primitives shared by the aggregator and the series builders.
//!
//! All functions take an ordered slice of reals, never mutate their input,
//! and return the documented identity on empty input instead of raising.

/// Smoothing factor used when callers do not pick their own
pub const DEFAULT_EWMA_ALPHA: f64 = 0.2;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by N); 0 for an empty slice
pub fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Percentile with linear interpolation between closest ranks.
///
/// `p` is in `[0, 1]`; 0.5 is the median. Empty input yields 0.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let idx = (sorted.len() - 1) as f64 * p;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (idx - lo as f64)
}

/// Exponentially weighted moving average, one output per input.
///
/// The first output equals the first input; each later output is
/// `alpha * x + (1 - alpha) * previous`. Outputs are rounded to two
/// decimals while the accumulator itself stays unrounded. Callers that
/// only want the latest smoothed value take the last element.
pub fn ewma(values: &[f64], alpha: f64) -> Vec<f64> {
    let Some((&first, rest)) = values.split_first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(values.len());
    let mut s = first;
    out.push(round2(s));
    for &x in rest {
        s = alpha * x + (1.0 - alpha) * s;
        out.push(round2(s));
    }
    out
}

/// Standard score of `x` against the sample; defaults to the last element.
///
/// 0 when the sample is empty or has zero variance.
pub fn zscore(values: &[f64], x: Option<f64>) -> f64 {
    let Some(&last) = values.last() else {
        return 0.0;
    };
    let sd = stddev(values);
    if sd == 0.0 {
        return 0.0;
    }
    let val = x.unwrap_or(last);
    (val - mean(values)) / sd
}

/// Relative change between the last two elements.
///
/// 0 when there are fewer than two elements or the reference value is 0.
pub fn rate_of_change(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let last = values[values.len() - 1];
    let prev = values[values.len() - 2];
    if prev == 0.0 {
        return 0.0;
    }
    (last - prev) / prev.abs()
}

/// Dispersion-normalized signal, `mean / stddev`.
///
/// Not a true financial Sharpe ratio (no risk-free rate); 0 when the
/// standard deviation is 0.
pub fn sharpe_like(values: &[f64]) -> f64 {
    let sd = stddev(values);
    if sd == 0.0 {
        return 0.0;
    }
    mean(values) / sd
}

/// Trailing moving average with partial windows at the start.
///
/// Each output is the mean of the up-to-`window` elements ending at that
/// index, rounded to two decimals.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        out.push(round2(slice.iter().sum::<f64>() / slice.len() as f64));
    }
    out
}
