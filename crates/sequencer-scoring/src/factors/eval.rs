/// Eval urgency, capped so evaluation data cannot dominate the score.
pub fn calculate(score: f64, cap: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0).min(cap)
}
