//! Pure query understanding for the nutrition resolver: curated vocabularies, fixed thresholds,
//! and entity extraction. Nothing here touches the graph.

pub mod extract;
pub mod intent;
pub mod keywords;

pub use extract::{Extraction, NumericTarget, NumericUnit, extract, normalize_query};
pub use intent::Intents;

/// Half-width of the calorie band searched around an explicit calorie target.
pub const CALORIE_TOLERANCE: f64 = 50.0;
/// Minimum `protein_g` for the high-protein strategy.
pub const MIN_HIGH_PROTEIN_G: f64 = 20.0;
/// Maximum `calories` for the low-calorie strategy.
pub const MAX_LOW_CALORIES: f64 = 250.0;
/// Rows a single strategy may return.
pub const STRATEGY_RESULT_CAP: usize = 5;
/// Records kept after deduplication.
pub const PRESENTATION_LIMIT: usize = 5;
