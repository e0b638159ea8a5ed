//! Analytics tuning knobs.
//!
//! Fight clustering and X-Factor weighting were observed behavior, not
//! published formulas, so they live in a config struct with documented
//! defaults rather than hardcoded magic numbers. Configs load from TOML
//! files; anything absent falls back to the default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use scrimkit_types::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// A new fight starts when the gap since the player's previous kill or
    /// death exceeds this many seconds.
    pub fight_gap_secs: f64,
    pub caps: NormalizationCaps,
    pub weights: RoleWeightTable,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            fight_gap_secs: 15.0,
            caps: NormalizationCaps::default(),
            weights: RoleWeightTable::default(),
        }
    }
}

/// Caps that normalize raw X-Factor inputs into `[0, 1]` components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationCaps {
    /// Final blows per fight that count as a perfect 1.0.
    pub final_blows_per_fight: f64,
    /// Deaths per fight at which survival bottoms out at 0.0.
    pub deaths_per_fight: f64,
    /// Objective kills that count as a perfect objective component.
    pub objective_kills: f64,
    /// Final blows per ultimate that count as perfect ult conversion.
    pub final_blows_per_ult: f64,
    /// Seconds of sitting on a charged ultimate at which the hold-time half
    /// of the ultimate component reaches 0.0.
    pub ult_hold_secs: f64,
}

impl Default for NormalizationCaps {
    fn default() -> Self {
        Self {
            final_blows_per_fight: 2.0,
            deaths_per_fight: 1.0,
            objective_kills: 10.0,
            final_blows_per_ult: 2.0,
            ult_hold_secs: 60.0,
        }
    }
}

/// Per-component weights for one role. Expected to sum to 1.0; the score is
/// scaled to `[0, 100]` under that assumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleWeights {
    pub final_blows: f64,
    pub survival: f64,
    pub objective: f64,
    pub ultimate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleWeightTable {
    pub tank: RoleWeights,
    pub damage: RoleWeights,
    pub support: RoleWeights,
}

impl RoleWeightTable {
    pub fn for_role(&self, role: Role) -> RoleWeights {
        match role {
            Role::Tank => self.tank,
            Role::Damage => self.damage,
            Role::Support => self.support,
        }
    }
}

impl Default for RoleWeightTable {
    fn default() -> Self {
        Self {
            tank: RoleWeights {
                final_blows: 0.25,
                survival: 0.35,
                objective: 0.20,
                ultimate: 0.20,
            },
            damage: RoleWeights {
                final_blows: 0.45,
                survival: 0.15,
                objective: 0.10,
                ultimate: 0.30,
            },
            support: RoleWeights {
                final_blows: 0.15,
                survival: 0.40,
                objective: 0.15,
                ultimate: 0.30,
            },
        }
    }
}

/// Load a config from a TOML file.
pub fn load_file(path: &Path) -> Result<AnalyticsConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
