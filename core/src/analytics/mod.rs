//! The analytics engine: pure, independent queries over a completed
//! [`MatchWorkbook`].
//!
//! Every operation is a read; nothing here mutates the workbook, so queries
//! can run concurrently across players and metrics without coordination.
//! Division-by-zero and empty-input cases return documented sentinels (0.0
//! or empty collections), never errors — these are display metrics, not
//! integrity checks.

pub mod config;
pub mod duels;
pub mod fights;
pub mod roles;
pub mod ultimates;
pub mod x_factor;


use std::str::FromStr;

use scrimkit_types::{DuelWinrate, MetricValue, XFactorBreakdown};
use thiserror::Error;

use crate::error::Anomaly;
use crate::workbook::MatchWorkbook;
pub use config::AnalyticsConfig;
pub use fights::Fight;

/// Named analytics operations, the dispatch surface for callers that take a
/// metric name at runtime (CLI, storage collaborators).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    AverageUltChargeTime,
    AverageTimeToUseUlt,
    FinalBlowsPerUltimate,
    DuelWinrates,
    XFactor,
    FightCount,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::AverageUltChargeTime,
        Metric::AverageTimeToUseUlt,
        Metric::FinalBlowsPerUltimate,
        Metric::DuelWinrates,
        Metric::XFactor,
        Metric::FightCount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::AverageUltChargeTime => "avg-ult-charge-time",
            Metric::AverageTimeToUseUlt => "avg-time-to-use-ult",
            Metric::FinalBlowsPerUltimate => "final-blows-per-ult",
            Metric::DuelWinrates => "duel-winrates",
            Metric::XFactor => "x-factor",
            Metric::FightCount => "fight-count",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| QueryError::UnknownMetric(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("unknown metric `{0}`")]
    UnknownMetric(String),

    #[error("metric `{0}` requires a player name")]
    PlayerRequired(Metric),
}

/// Read-only analytics facade over one match.
pub struct Analytics<'a> {
    workbook: &'a MatchWorkbook,
    config: AnalyticsConfig,
}

impl<'a> Analytics<'a> {
    pub fn new(workbook: &'a MatchWorkbook) -> Self {
        Self::with_config(workbook, AnalyticsConfig::default())
    }

    pub fn with_config(workbook: &'a MatchWorkbook, config: AnalyticsConfig) -> Self {
        Self { workbook, config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn average_ult_charge_time(&self, player: &str) -> f64 {
        ultimates::average_charge_time(self.workbook, player)
    }

    pub fn average_time_to_use_ult(&self, player: &str) -> f64 {
        ultimates::average_time_to_use(self.workbook, player)
    }

    pub fn final_blows_per_ultimate(&self, player: &str) -> f64 {
        ultimates::final_blows_per_ultimate(self.workbook, player)
    }

    /// Lifecycle irregularities observed for the player's ultimate events.
    pub fn ultimate_anomalies(&self, player: &str) -> Vec<Anomaly> {
        ultimates::UltimateTimeline::build(self.workbook, player).anomalies
    }

    pub fn duel_winrates(&self, player: &str) -> Vec<DuelWinrate> {
        duels::duel_winrates(self.workbook, player)
    }

    pub fn fights(&self, player: &str) -> Vec<Fight> {
        fights::group_player_kills(self.workbook, player, self.config.fight_gap_secs)
    }

    pub fn x_factor(&self, player: &str) -> XFactorBreakdown {
        x_factor::x_factor(self.workbook, player, &self.config)
    }

    /// Dispatch a named metric. All current metrics are player-scoped.
    pub fn query(&self, metric: Metric, player: Option<&str>) -> Result<MetricValue, QueryError> {
        let Some(player) = player else {
            return Err(QueryError::PlayerRequired(metric));
        };
        Ok(match metric {
            Metric::AverageUltChargeTime => {
                MetricValue::Seconds(self.average_ult_charge_time(player))
            }
            Metric::AverageTimeToUseUlt => {
                MetricValue::Seconds(self.average_time_to_use_ult(player))
            }
            Metric::FinalBlowsPerUltimate => {
                MetricValue::Rate(self.final_blows_per_ultimate(player))
            }
            Metric::DuelWinrates => MetricValue::Duels(self.duel_winrates(player)),
            Metric::XFactor => MetricValue::XFactor(self.x_factor(player)),
            Metric::FightCount => MetricValue::Count(self.fights(player).len() as u64),
        })
    }
}
