/// Recency factor over a horizon `H` in weeks.
///
/// `1.0` once `weeksSince ≥ H` (including never-selected moves), otherwise
/// `e^(−weeksSince / H)`.
pub fn calculate(weeks_since: u32, horizon_weeks: u32) -> f64 {
    let horizon = horizon_weeks.max(1);
    if weeks_since >= horizon {
        return 1.0;
    }
    (-(f64::from(weeks_since)) / f64::from(horizon)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequencer_core::constants::NEVER_SELECTED_WEEKS;

    #[test]
    fn never_selected_is_one() {
        assert_eq!(calculate(NEVER_SELECTED_WEEKS, 12), 1.0);
    }

    #[test]
    fn inside_horizon_decays_exponentially() {
        let r = calculate(6, 12);
        assert!((r - (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn horizon_boundary_is_one() {
        assert_eq!(calculate(12, 12), 1.0);
    }
}
