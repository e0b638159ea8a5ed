pub mod formatting;
pub mod metrics;

pub use metrics::{DuelWinrate, MetricValue, Role, XFactorBreakdown};
