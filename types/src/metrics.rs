//! Analytics result types shared between the core engine and its consumers.
//!
//! These are plain data carriers: the engine in `scrimkit-core` fills them in,
//! binaries and storage collaborators serialize them. Keeping them here lets a
//! consumer depend on the shapes without pulling in the parser.

use serde::{Deserialize, Serialize};

/// Hero role, the axis along which X-Factor weighting differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tank,
    Damage,
    Support,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Tank => write!(f, "tank"),
            Role::Damage => write!(f, "damage"),
            Role::Support => write!(f, "support"),
        }
    }
}

/// One row of a player's duel table: their record against a single enemy.
///
/// `winrate_pct` is `kills / (kills + deaths) * 100`; rows with a zero
/// denominator are never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelWinrate {
    pub player_name: String,
    pub player_team: String,
    /// Hero the player was on in the most recent kill between the pair.
    pub player_hero: String,
    pub enemy_name: String,
    pub enemy_team: String,
    pub enemy_hero: String,
    /// Final blows the player landed on this enemy.
    pub kills: u32,
    /// Deaths the player suffered to this enemy.
    pub deaths: u32,
    pub winrate_pct: f64,
}

/// X-Factor score with its normalized components, each in `[0, 1]`.
///
/// The score itself is bounded to `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XFactorBreakdown {
    pub player_name: String,
    pub role: Role,
    pub final_blow_component: f64,
    pub survival_component: f64,
    pub objective_component: f64,
    pub ultimate_component: f64,
    pub score: f64,
}

/// Dynamically-typed result of an analytics query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    /// A duration in seconds.
    Seconds(f64),
    /// A dimensionless rate (e.g. final blows per ultimate).
    Rate(f64),
    /// A count of derived groupings (e.g. fights).
    Count(u64),
    Duels(Vec<DuelWinrate>),
    XFactor(XFactorBreakdown),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_value_serializes_with_tag() {
        let v = MetricValue::Seconds(15.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"type":"seconds","value":15.0}"#);
    }

    #[test]
    fn role_roundtrips_lowercase() {
        let json = serde_json::to_string(&Role::Support).unwrap();
        assert_eq!(json, r#""support""#);
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::Support);
    }
}
