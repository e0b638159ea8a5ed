//! The combat-log event model.
//!
//! Every record in an export belongs to one of 18 closed event kinds. Each
//! kind has a fixed wire tag (the second field of a text line, or the sheet
//! name of a tabulated export) and a fixed payload arity. Keeping the set
//! closed and the arities static replaces dynamic field indexing with
//! exhaustive matching.

pub mod builder;
pub mod records;
pub mod tokenizer;

pub use builder::build_record;
pub use records::Event;
pub use tokenizer::{LineTokenizer, RawRecord};

use serde::{Deserialize, Serialize};

/// Closed enumeration of combat-log event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    MatchStart,
    MatchEnd,
    RoundStart,
    RoundEnd,
    SetupComplete,
    ObjectiveCaptured,
    ObjectiveUpdated,
    PointProgress,
    PayloadProgress,
    PlayerStat,
    Kill,
    DefensiveAssist,
    OffensiveAssist,
    HeroSpawn,
    HeroSwap,
    UltimateCharged,
    UltimateStart,
    UltimateEnd,
}

impl EventKind {
    /// All kinds, in canonical (wire-table) order.
    pub const ALL: [EventKind; 18] = [
        EventKind::MatchStart,
        EventKind::MatchEnd,
        EventKind::RoundStart,
        EventKind::RoundEnd,
        EventKind::SetupComplete,
        EventKind::ObjectiveCaptured,
        EventKind::ObjectiveUpdated,
        EventKind::PointProgress,
        EventKind::PayloadProgress,
        EventKind::PlayerStat,
        EventKind::Kill,
        EventKind::DefensiveAssist,
        EventKind::OffensiveAssist,
        EventKind::HeroSpawn,
        EventKind::HeroSwap,
        EventKind::UltimateCharged,
        EventKind::UltimateStart,
        EventKind::UltimateEnd,
    ];

    /// Wire tag: the second field of a text line, and the sheet name of a
    /// tabulated export.
    pub fn tag(self) -> &'static str {
        match self {
            EventKind::MatchStart => "match_start",
            EventKind::MatchEnd => "match_end",
            EventKind::RoundStart => "round_start",
            EventKind::RoundEnd => "round_end",
            EventKind::SetupComplete => "setup_complete",
            EventKind::ObjectiveCaptured => "objective_captured",
            EventKind::ObjectiveUpdated => "objective_updated",
            EventKind::PointProgress => "point_progress",
            EventKind::PayloadProgress => "payload_progress",
            EventKind::PlayerStat => "player_stat",
            EventKind::Kill => "kill",
            EventKind::DefensiveAssist => "defensive_assist",
            EventKind::OffensiveAssist => "offensive_assist",
            EventKind::HeroSpawn => "hero_spawn",
            EventKind::HeroSwap => "hero_swap",
            EventKind::UltimateCharged => "ultimate_charged",
            EventKind::UltimateStart => "ultimate_start",
            EventKind::UltimateEnd => "ultimate_end",
        }
    }

    /// Resolve a wire tag back to its kind. `None` for anything outside the
    /// closed set.
    pub fn from_tag(tag: &str) -> Option<EventKind> {
        match tag {
            "match_start" => Some(EventKind::MatchStart),
            "match_end" => Some(EventKind::MatchEnd),
            "round_start" => Some(EventKind::RoundStart),
            "round_end" => Some(EventKind::RoundEnd),
            "setup_complete" => Some(EventKind::SetupComplete),
            "objective_captured" => Some(EventKind::ObjectiveCaptured),
            "objective_updated" => Some(EventKind::ObjectiveUpdated),
            "point_progress" => Some(EventKind::PointProgress),
            "payload_progress" => Some(EventKind::PayloadProgress),
            "player_stat" => Some(EventKind::PlayerStat),
            "kill" => Some(EventKind::Kill),
            "defensive_assist" => Some(EventKind::DefensiveAssist),
            "offensive_assist" => Some(EventKind::OffensiveAssist),
            "hero_spawn" => Some(EventKind::HeroSpawn),
            "hero_swap" => Some(EventKind::HeroSwap),
            "ultimate_charged" => Some(EventKind::UltimateCharged),
            "ultimate_start" => Some(EventKind::UltimateStart),
            "ultimate_end" => Some(EventKind::UltimateEnd),
            _ => None,
        }
    }

    /// Expected payload field count, excluding the leading timestamp and tag.
    pub fn arity(self) -> usize {
        match self {
            EventKind::MatchStart => 4,
            EventKind::MatchEnd => 3,
            EventKind::RoundStart => 5,
            EventKind::RoundEnd => 5,
            EventKind::SetupComplete => 2,
            EventKind::ObjectiveCaptured => 6,
            EventKind::ObjectiveUpdated => 3,
            EventKind::PointProgress => 4,
            EventKind::PayloadProgress => 4,
            EventKind::PlayerStat => 37,
            EventKind::Kill => 10,
            EventKind::DefensiveAssist => 4,
            EventKind::OffensiveAssist => 4,
            EventKind::HeroSpawn => 5,
            EventKind::HeroSwap => 5,
            EventKind::UltimateCharged => 5,
            EventKind::UltimateStart => 5,
            EventKind::UltimateEnd => 5,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip_for_every_kind() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(EventKind::from_tag("mercy_rez"), None);
        assert_eq!(EventKind::from_tag(""), None);
        // Tags are case-sensitive on the wire.
        assert_eq!(EventKind::from_tag("Kill"), None);
    }

    #[test]
    fn canonical_order_covers_all_kinds_once() {
        let mut seen = std::collections::HashSet::new();
        for kind in EventKind::ALL {
            assert!(seen.insert(kind.tag()), "duplicate kind {kind}");
        }
        assert_eq!(seen.len(), 18);
    }
}
