// Single source of truth for all default values.

// --- Feature weights ---
pub const DEFAULT_WEIGHT_CONFIDENCE: f64 = 0.65;
pub const DEFAULT_WEIGHT_RECENCY: f64 = 0.15;
pub const DEFAULT_WEIGHT_EVAL: f64 = 0.15;
pub const DEFAULT_WEIGHT_DOMAIN: f64 = 0.05;

// --- Selection ---
pub const DEFAULT_PICK_COUNT: usize = 3;
pub const DEFAULT_COOLDOWN_WEEKS: u32 = 2;
pub const DEFAULT_DIVERSITY_MIN_DOMAINS: usize = 2;

// --- Recency ---
pub const DEFAULT_RECENCY_HORIZON_WEEKS: u32 = 12;

// --- Confidence estimator ---
pub const DEFAULT_EB_PRIOR: f64 = 0.70;
pub const DEFAULT_EB_K: f64 = 20.0;
pub const DEFAULT_TRIM_PCT: f64 = 0.05;
pub const DEFAULT_LOOKBACK_WEEKS: u32 = 18;

// --- Eval urgency ---
pub const DEFAULT_EVAL_CAP: f64 = 0.25;

// --- Domain coverage ---
pub const DEFAULT_DOMAIN_WINDOW_WEEKS: u32 = 8;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "sequencer.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
