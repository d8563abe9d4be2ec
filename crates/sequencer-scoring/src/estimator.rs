use sequencer_core::config::SequencerConfig;
use sequencer_core::models::WeekAggregate;

/// Empirical-Bayes parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorParams {
    /// Prior confidence the estimate shrinks toward.
    pub prior: f64,
    /// Pseudo-count weighting the prior.
    pub k: f64,
    /// Fraction of weekly averages trimmed from each end.
    pub trim_pct: f64,
}

impl EstimatorParams {
    pub fn from_config(config: &SequencerConfig) -> Self {
        Self {
            prior: config.eb_prior,
            k: config.eb_k,
            trim_pct: config.trim_pct,
        }
    }
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self::from_config(&SequencerConfig::default())
    }
}

/// Smoothed confidence for one move, with the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceEstimate {
    pub smoothed: f64,
    /// Mean of the trimmed weekly averages; `None` with no usable history.
    pub sample_mean: Option<f64>,
    /// Observations summed across the trimmed weeks (`N`).
    pub observations: u64,
    pub weeks_used: usize,
}

/// Drop `floor(len × trim_pct)` weeks from each end of the average-sorted list.
///
/// Weeks without observations carry no signal and are discarded first.
pub fn trim(weeks: &[WeekAggregate], trim_pct: f64) -> Vec<WeekAggregate> {
    let mut sorted: Vec<WeekAggregate> = weeks.iter().filter(|w| w.n > 0).copied().collect();
    sorted.sort_by(|a, b| {
        a.avg
            .total_cmp(&b.avg)
            .then_with(|| a.week_start.cmp(&b.week_start))
    });

    let cut = (sorted.len() as f64 * trim_pct.clamp(0.0, 0.5)).floor() as usize;
    if cut == 0 || cut * 2 >= sorted.len() {
        return sorted;
    }
    sorted[cut..sorted.len() - cut].to_vec()
}

/// Shrink the trimmed sample mean toward the prior.
///
/// ```text
/// smoothed = (prior·K + sampleMean·N) / (K + N)
/// ```
///
/// With no observations the result is exactly the prior.
pub fn estimate(weeks: &[WeekAggregate], params: &EstimatorParams) -> ConfidenceEstimate {
    let trimmed = trim(weeks, params.trim_pct);
    let observations: u64 = trimmed.iter().map(|w| u64::from(w.n)).sum();

    if trimmed.is_empty() || observations == 0 {
        return ConfidenceEstimate {
            smoothed: params.prior,
            sample_mean: None,
            observations: 0,
            weeks_used: 0,
        };
    }

    let sample_mean = trimmed.iter().map(|w| w.avg).sum::<f64>() / trimmed.len() as f64;
    let n = observations as f64;
    let denominator = params.k + n;
    let smoothed = if denominator > 0.0 {
        (params.prior * params.k + sample_mean * n) / denominator
    } else {
        params.prior
    };

    ConfidenceEstimate {
        smoothed: smoothed.clamp(0.0, 1.0),
        sample_mean: Some(sample_mean),
        observations,
        weeks_used: trimmed.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn week(offset: i64, avg: f64, n: u32) -> WeekAggregate {
        let base = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        WeekAggregate::new(base + chrono::Duration::days(7 * offset), avg, n)
    }

    #[test]
    fn trim_keeps_everything_below_one_full_cut() {
        let weeks: Vec<_> = (0..10).map(|i| week(i, i as f64 / 10.0, 3)).collect();
        assert_eq!(trim(&weeks, 0.05).len(), 10);
    }

    #[test]
    fn trim_drops_both_extremes() {
        let mut weeks: Vec<_> = (0..18).map(|i| week(i, 0.5, 4)).collect();
        weeks.push(week(18, 0.0, 4));
        weeks.push(week(19, 1.0, 4));
        let trimmed = trim(&weeks, 0.05);
        assert_eq!(trimmed.len(), 18);
        assert!(trimmed.iter().all(|w| w.avg == 0.5));
    }

    #[test]
    fn empty_weeks_are_ignored() {
        let weeks = vec![week(0, 0.0, 0), week(1, 0.4, 10)];
        let est = estimate(&weeks, &EstimatorParams::default());
        assert_eq!(est.weeks_used, 1);
        assert_eq!(est.observations, 10);
        assert_eq!(est.sample_mean, Some(0.4));
    }

    #[test]
    fn zero_pseudo_count_returns_sample_mean() {
        let params = EstimatorParams {
            prior: 0.7,
            k: 0.0,
            trim_pct: 0.0,
        };
        let est = estimate(&[week(0, 0.3, 2)], &params);
        assert!((est.smoothed - 0.3).abs() < 1e-12);
    }
}
