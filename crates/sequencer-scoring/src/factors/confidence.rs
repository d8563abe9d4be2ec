/// Confidence need: `1 − smoothed`.
///
/// Low historical confidence means high need.
pub fn calculate(smoothed: f64) -> f64 {
    (1.0 - smoothed).clamp(0.0, 1.0)
}
