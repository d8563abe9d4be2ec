/// Domain coverage: `1 − min(appearances / window, 1)`.
///
/// Domains seen often in the recent window score low, pushing variety.
pub fn calculate(appearances: usize, window_weeks: u32) -> f64 {
    let window = f64::from(window_weeks.max(1));
    1.0 - (appearances as f64 / window).min(1.0)
}
