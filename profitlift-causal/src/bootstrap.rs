//! Percentile bootstrap interval on the difference in attach rates.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Resample both arms with replacement `resamples` times and take the
/// two-sided percentile interval of `mean(treatment) - mean(control)`.
///
/// Returns `None` when either arm is empty or no resamples were requested.
pub fn bootstrap_interval(
    control: &[f64],
    treatment: &[f64],
    resamples: usize,
    confidence_level: f64,
    seed: u64,
) -> Option<(f64, f64)> {
    if control.is_empty() || treatment.is_empty() || resamples == 0 {
        return None;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut uplifts: Vec<f64> = (0..resamples)
        .map(|_| {
            let c = resampled_mean(control, &mut rng);
            let t = resampled_mean(treatment, &mut rng);
            t - c
        })
        .collect();
    uplifts.sort_by(f64::total_cmp);

    let alpha = (1.0 - confidence_level).clamp(0.0, 1.0);
    Some((
        percentile(&uplifts, alpha / 2.0),
        percentile(&uplifts, 1.0 - alpha / 2.0),
    ))
}

fn resampled_mean(values: &[f64], rng: &mut StdRng) -> f64 {
    let n = values.len();
    (0..n).map(|_| values[rng.gen_range(0..n)]).sum::<f64>() / n as f64
}

/// Linear-interpolated quantile `q` in [0, 1] of ascending `sorted`.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
        }
    }
}
