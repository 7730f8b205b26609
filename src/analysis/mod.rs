pub mod commentary;
pub mod context;
pub mod format;
pub mod metrics;

pub use commentary::{build_commentary_bindings, generate_commentary};
pub use context::{AnalysisContext, LiquidityTier, MarketCapTier, MoveDirection, SignificantMove};
pub use format::{format_magnitude, format_percentile_list, relative_age};
pub use metrics::{analyze_metrics, compute_all_time_high, AllTimeHigh};
