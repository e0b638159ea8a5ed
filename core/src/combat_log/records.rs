//! Typed event records, one struct per [`EventKind`].
//!
//! Field order mirrors the wire payload exactly; `match_time` is the leading
//! timestamp every record carries. Counts are `u32`, damage/healing/accuracy
//! and time columns are `f64`, names and teams are `String`s.

use serde::{Deserialize, Serialize};

use super::EventKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStart {
    pub match_time: f64,
    pub map_name: String,
    pub map_type: String,
    pub team_1_name: String,
    pub team_2_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEnd {
    pub match_time: f64,
    pub round_number: u32,
    pub team_1_score: u32,
    pub team_2_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStart {
    pub match_time: f64,
    pub round_number: u32,
    pub capturing_team: String,
    pub team_1_score: u32,
    pub team_2_score: u32,
    pub objective_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEnd {
    pub match_time: f64,
    pub round_number: u32,
    pub capturing_team: String,
    pub team_1_score: u32,
    pub team_2_score: u32,
    pub objective_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupComplete {
    pub match_time: f64,
    pub round_number: u32,
    pub match_time_remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveCaptured {
    pub match_time: f64,
    pub round_number: u32,
    pub capturing_team: String,
    pub objective_index: u32,
    pub control_team_1_progress: f64,
    pub control_team_2_progress: f64,
    pub match_time_remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveUpdated {
    pub match_time: f64,
    pub round_number: u32,
    pub previous_objective_index: u32,
    pub current_objective_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointProgress {
    pub match_time: f64,
    pub round_number: u32,
    pub capturing_team: String,
    pub objective_index: u32,
    pub point_capture_progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadProgress {
    pub match_time: f64,
    pub round_number: u32,
    pub capturing_team: String,
    pub objective_index: u32,
    pub payload_capture_progress: f64,
}

/// Cumulative per-round stat snapshot for one player on one hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub match_time: f64,
    pub round_number: u32,
    pub player_team: String,
    pub player_name: String,
    pub player_hero: String,
    pub eliminations: u32,
    pub final_blows: u32,
    pub deaths: u32,
    pub all_damage_dealt: f64,
    pub barrier_damage_dealt: f64,
    pub hero_damage_dealt: f64,
    pub healing_dealt: f64,
    pub healing_received: f64,
    pub self_healing: f64,
    pub damage_taken: f64,
    pub damage_blocked: f64,
    pub defensive_assists: u32,
    pub offensive_assists: u32,
    pub ultimates_earned: u32,
    pub ultimates_used: u32,
    pub multikill_best: u32,
    pub multikill_count: u32,
    pub solo_kills: u32,
    pub objective_kills: u32,
    pub environmental_kills: u32,
    pub environmental_deaths: u32,
    pub critical_hits: u32,
    pub critical_hit_accuracy: f64,
    pub scoped_accuracy: f64,
    pub scoped_critical_hit_accuracy: f64,
    pub scoped_critical_hit_kills: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub shots_missed: u32,
    pub scoped_shots: u32,
    pub scoped_shots_hit: u32,
    pub weapon_accuracy: f64,
    pub hero_time_played: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kill {
    pub match_time: f64,
    pub attacker_team: String,
    pub attacker_name: String,
    pub attacker_hero: String,
    pub victim_team: String,
    pub victim_name: String,
    pub victim_hero: String,
    pub event_ability: String,
    pub event_damage: f64,
    pub is_critical_hit: bool,
    pub is_environmental: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefensiveAssist {
    pub match_time: f64,
    pub player_team: String,
    pub player_name: String,
    pub player_hero: String,
    pub hero_duplicated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffensiveAssist {
    pub match_time: f64,
    pub player_team: String,
    pub player_name: String,
    pub player_hero: String,
    pub hero_duplicated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSpawn {
    pub match_time: f64,
    pub player_team: String,
    pub player_name: String,
    pub player_hero: String,
    pub previous_hero: String,
    pub hero_time_played: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSwap {
    pub match_time: f64,
    pub player_team: String,
    pub player_name: String,
    pub player_hero: String,
    pub previous_hero: String,
    pub hero_time_played: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UltimateCharged {
    pub match_time: f64,
    pub player_team: String,
    pub player_name: String,
    pub player_hero: String,
    pub hero_duplicated: String,
    pub ultimate_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UltimateStart {
    pub match_time: f64,
    pub player_team: String,
    pub player_name: String,
    pub player_hero: String,
    pub hero_duplicated: String,
    pub ultimate_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UltimateEnd {
    pub match_time: f64,
    pub player_team: String,
    pub player_name: String,
    pub player_hero: String,
    pub hero_duplicated: String,
    pub ultimate_id: u64,
}

/// Tagged variant over all 18 record types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    MatchStart(MatchStart),
    MatchEnd(MatchEnd),
    RoundStart(RoundStart),
    RoundEnd(RoundEnd),
    SetupComplete(SetupComplete),
    ObjectiveCaptured(ObjectiveCaptured),
    ObjectiveUpdated(ObjectiveUpdated),
    PointProgress(PointProgress),
    PayloadProgress(PayloadProgress),
    PlayerStat(Box<PlayerStat>),
    Kill(Kill),
    DefensiveAssist(DefensiveAssist),
    OffensiveAssist(OffensiveAssist),
    HeroSpawn(HeroSpawn),
    HeroSwap(HeroSwap),
    UltimateCharged(UltimateCharged),
    UltimateStart(UltimateStart),
    UltimateEnd(UltimateEnd),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::MatchStart(_) => EventKind::MatchStart,
            Event::MatchEnd(_) => EventKind::MatchEnd,
            Event::RoundStart(_) => EventKind::RoundStart,
            Event::RoundEnd(_) => EventKind::RoundEnd,
            Event::SetupComplete(_) => EventKind::SetupComplete,
            Event::ObjectiveCaptured(_) => EventKind::ObjectiveCaptured,
            Event::ObjectiveUpdated(_) => EventKind::ObjectiveUpdated,
            Event::PointProgress(_) => EventKind::PointProgress,
            Event::PayloadProgress(_) => EventKind::PayloadProgress,
            Event::PlayerStat(_) => EventKind::PlayerStat,
            Event::Kill(_) => EventKind::Kill,
            Event::DefensiveAssist(_) => EventKind::DefensiveAssist,
            Event::OffensiveAssist(_) => EventKind::OffensiveAssist,
            Event::HeroSpawn(_) => EventKind::HeroSpawn,
            Event::HeroSwap(_) => EventKind::HeroSwap,
            Event::UltimateCharged(_) => EventKind::UltimateCharged,
            Event::UltimateStart(_) => EventKind::UltimateStart,
            Event::UltimateEnd(_) => EventKind::UltimateEnd,
        }
    }

    pub fn match_time(&self) -> f64 {
        match self {
            Event::MatchStart(e) => e.match_time,
            Event::MatchEnd(e) => e.match_time,
            Event::RoundStart(e) => e.match_time,
            Event::RoundEnd(e) => e.match_time,
            Event::SetupComplete(e) => e.match_time,
            Event::ObjectiveCaptured(e) => e.match_time,
            Event::ObjectiveUpdated(e) => e.match_time,
            Event::PointProgress(e) => e.match_time,
            Event::PayloadProgress(e) => e.match_time,
            Event::PlayerStat(e) => e.match_time,
            Event::Kill(e) => e.match_time,
            Event::DefensiveAssist(e) => e.match_time,
            Event::OffensiveAssist(e) => e.match_time,
            Event::HeroSpawn(e) => e.match_time,
            Event::HeroSwap(e) => e.match_time,
            Event::UltimateCharged(e) => e.match_time,
            Event::UltimateStart(e) => e.match_time,
            Event::UltimateEnd(e) => e.match_time,
        }
    }
}
