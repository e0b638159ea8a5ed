//! Event record builder: `(tag, timestamp, fields)` into a typed [`Event`].
//!
//! Failures are per-record ([`RecordError`]); the caller accumulates them and
//! keeps parsing. Both ingestion paths (text lines and tabulated sheets) feed
//! this builder, which is what makes them equivalent by construction.

use std::borrow::Cow;

use super::EventKind;
use super::records::*;
use crate::error::RecordError;

/// Build a typed record from a tokenized payload.
///
/// `fields` excludes the leading timestamp and the tag; `line` is the source
/// line (text path) or 1-based data row (tabulated path) for error context.
pub fn build_record(
    tag: &str,
    match_time: f64,
    fields: &[Cow<'_, str>],
    line: u64,
) -> Result<Event, RecordError> {
    let Some(kind) = EventKind::from_tag(tag) else {
        return Err(RecordError::UnknownEventKind {
            tag: tag.to_string(),
            line,
        });
    };
    if fields.len() != kind.arity() {
        return Err(RecordError::MalformedRecord {
            kind,
            expected_arity: kind.arity(),
            actual_arity: fields.len(),
            line,
        });
    }

    let f = FieldCursor { kind, fields, line };
    let event = match kind {
        EventKind::MatchStart => Event::MatchStart(MatchStart {
            match_time,
            map_name: f.text(0),
            map_type: f.text(1),
            team_1_name: f.text(2),
            team_2_name: f.text(3),
        }),
        EventKind::MatchEnd => Event::MatchEnd(MatchEnd {
            match_time,
            round_number: f.u32(0)?,
            team_1_score: f.u32(1)?,
            team_2_score: f.u32(2)?,
        }),
        EventKind::RoundStart => Event::RoundStart(RoundStart {
            match_time,
            round_number: f.u32(0)?,
            capturing_team: f.text(1),
            team_1_score: f.u32(2)?,
            team_2_score: f.u32(3)?,
            objective_index: f.u32(4)?,
        }),
        EventKind::RoundEnd => Event::RoundEnd(RoundEnd {
            match_time,
            round_number: f.u32(0)?,
            capturing_team: f.text(1),
            team_1_score: f.u32(2)?,
            team_2_score: f.u32(3)?,
            objective_index: f.u32(4)?,
        }),
        EventKind::SetupComplete => Event::SetupComplete(SetupComplete {
            match_time,
            round_number: f.u32(0)?,
            match_time_remaining: f.f64(1)?,
        }),
        EventKind::ObjectiveCaptured => Event::ObjectiveCaptured(ObjectiveCaptured {
            match_time,
            round_number: f.u32(0)?,
            capturing_team: f.text(1),
            objective_index: f.u32(2)?,
            control_team_1_progress: f.f64(3)?,
            control_team_2_progress: f.f64(4)?,
            match_time_remaining: f.f64(5)?,
        }),
        EventKind::ObjectiveUpdated => Event::ObjectiveUpdated(ObjectiveUpdated {
            match_time,
            round_number: f.u32(0)?,
            previous_objective_index: f.u32(1)?,
            current_objective_index: f.u32(2)?,
        }),
        EventKind::PointProgress => Event::PointProgress(PointProgress {
            match_time,
            round_number: f.u32(0)?,
            capturing_team: f.text(1),
            objective_index: f.u32(2)?,
            point_capture_progress: f.f64(3)?,
        }),
        EventKind::PayloadProgress => Event::PayloadProgress(PayloadProgress {
            match_time,
            round_number: f.u32(0)?,
            capturing_team: f.text(1),
            objective_index: f.u32(2)?,
            payload_capture_progress: f.f64(3)?,
        }),
        EventKind::PlayerStat => Event::PlayerStat(Box::new(PlayerStat {
            match_time,
            round_number: f.u32(0)?,
            player_team: f.text(1),
            player_name: f.text(2),
            player_hero: f.text(3),
            eliminations: f.u32(4)?,
            final_blows: f.u32(5)?,
            deaths: f.u32(6)?,
            all_damage_dealt: f.f64(7)?,
            barrier_damage_dealt: f.f64(8)?,
            hero_damage_dealt: f.f64(9)?,
            healing_dealt: f.f64(10)?,
            healing_received: f.f64(11)?,
            self_healing: f.f64(12)?,
            damage_taken: f.f64(13)?,
            damage_blocked: f.f64(14)?,
            defensive_assists: f.u32(15)?,
            offensive_assists: f.u32(16)?,
            ultimates_earned: f.u32(17)?,
            ultimates_used: f.u32(18)?,
            multikill_best: f.u32(19)?,
            multikill_count: f.u32(20)?,
            solo_kills: f.u32(21)?,
            objective_kills: f.u32(22)?,
            environmental_kills: f.u32(23)?,
            environmental_deaths: f.u32(24)?,
            critical_hits: f.u32(25)?,
            critical_hit_accuracy: f.f64(26)?,
            scoped_accuracy: f.f64(27)?,
            scoped_critical_hit_accuracy: f.f64(28)?,
            scoped_critical_hit_kills: f.u32(29)?,
            shots_fired: f.u32(30)?,
            shots_hit: f.u32(31)?,
            shots_missed: f.u32(32)?,
            scoped_shots: f.u32(33)?,
            scoped_shots_hit: f.u32(34)?,
            weapon_accuracy: f.f64(35)?,
            hero_time_played: f.f64(36)?,
        })),
        EventKind::Kill => Event::Kill(Kill {
            match_time,
            attacker_team: f.text(0),
            attacker_name: f.text(1),
            attacker_hero: f.text(2),
            victim_team: f.text(3),
            victim_name: f.text(4),
            victim_hero: f.text(5),
            event_ability: f.text(6),
            event_damage: f.f64(7)?,
            is_critical_hit: f.boolean(8)?,
            is_environmental: f.boolean(9)?,
        }),
        EventKind::DefensiveAssist => Event::DefensiveAssist(DefensiveAssist {
            match_time,
            player_team: f.text(0),
            player_name: f.text(1),
            player_hero: f.text(2),
            hero_duplicated: f.text(3),
        }),
        EventKind::OffensiveAssist => Event::OffensiveAssist(OffensiveAssist {
            match_time,
            player_team: f.text(0),
            player_name: f.text(1),
            player_hero: f.text(2),
            hero_duplicated: f.text(3),
        }),
        EventKind::HeroSpawn => Event::HeroSpawn(HeroSpawn {
            match_time,
            player_team: f.text(0),
            player_name: f.text(1),
            player_hero: f.text(2),
            previous_hero: f.text(3),
            hero_time_played: f.f64(4)?,
        }),
        EventKind::HeroSwap => Event::HeroSwap(HeroSwap {
            match_time,
            player_team: f.text(0),
            player_name: f.text(1),
            player_hero: f.text(2),
            previous_hero: f.text(3),
            hero_time_played: f.f64(4)?,
        }),
        EventKind::UltimateCharged => Event::UltimateCharged(UltimateCharged {
            match_time,
            player_team: f.text(0),
            player_name: f.text(1),
            player_hero: f.text(2),
            hero_duplicated: f.text(3),
            ultimate_id: f.u64(4)?,
        }),
        EventKind::UltimateStart => Event::UltimateStart(UltimateStart {
            match_time,
            player_team: f.text(0),
            player_name: f.text(1),
            player_hero: f.text(2),
            hero_duplicated: f.text(3),
            ultimate_id: f.u64(4)?,
        }),
        EventKind::UltimateEnd => Event::UltimateEnd(UltimateEnd {
            match_time,
            player_team: f.text(0),
            player_name: f.text(1),
            player_hero: f.text(2),
            hero_duplicated: f.text(3),
            ultimate_id: f.u64(4)?,
        }),
    };
    Ok(event)
}

/// Typed access into a payload whose arity has already been checked.
struct FieldCursor<'a, 'b> {
    kind: EventKind,
    fields: &'a [Cow<'b, str>],
    line: u64,
}

impl FieldCursor<'_, '_> {
    fn text(&self, idx: usize) -> String {
        self.fields[idx].to_string()
    }

    fn mismatch(&self, idx: usize) -> RecordError {
        RecordError::FieldTypeMismatch {
            kind: self.kind,
            field_index: idx,
            value: self.fields[idx].to_string(),
            line: self.line,
        }
    }

    fn u32(&self, idx: usize) -> Result<u32, RecordError> {
        self.fields[idx]
            .trim()
            .parse::<u32>()
            .map_err(|_| self.mismatch(idx))
    }

    fn u64(&self, idx: usize) -> Result<u64, RecordError> {
        self.fields[idx]
            .trim()
            .parse::<u64>()
            .map_err(|_| self.mismatch(idx))
    }

    fn f64(&self, idx: usize) -> Result<f64, RecordError> {
        self.fields[idx]
            .trim()
            .parse::<f64>()
            .map_err(|_| self.mismatch(idx))
    }

    /// The wire encodes booleans as `0`/`1` or `true`/`false` (any case).
    fn boolean(&self, idx: usize) -> Result<bool, RecordError> {
        match self.fields[idx].trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            other if other.eq_ignore_ascii_case("false") => Ok(false),
            other if other.eq_ignore_ascii_case("true") => Ok(true),
            _ => Err(self.mismatch(idx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(raw: &[&str]) -> Vec<Cow<'static, str>> {
        raw.iter().map(|s| Cow::Owned((*s).to_string())).collect()
    }

    #[test]
    fn builds_a_kill_record() {
        let payload = fields(&[
            "Team A", "Lucas", "Cassidy", "Team B", "Marcus", "Ana", "Primary Fire", "64", "True",
            "0",
        ]);
        let event = build_record("kill", 12.5, &payload, 1).unwrap();
        let Event::Kill(kill) = event else {
            panic!("expected a kill record");
        };
        assert_eq!(kill.match_time, 12.5);
        assert_eq!(kill.attacker_name, "Lucas");
        assert_eq!(kill.victim_hero, "Ana");
        assert!(kill.is_critical_hit);
        assert!(!kill.is_environmental);
    }

    #[test]
    fn arity_mismatch_fails_only_that_record() {
        let payload = fields(&["Team A", "Lucas"]);
        let err = build_record("kill", 0.0, &payload, 7).unwrap_err();
        assert_eq!(
            err,
            RecordError::MalformedRecord {
                kind: EventKind::Kill,
                expected_arity: 10,
                actual_arity: 2,
                line: 7,
            }
        );
    }

    #[test]
    fn unknown_tag_is_reported_with_the_tag() {
        let err = build_record("mercy_rez", 0.0, &fields(&[]), 3).unwrap_err();
        assert_eq!(
            err,
            RecordError::UnknownEventKind {
                tag: "mercy_rez".to_string(),
                line: 3,
            }
        );
    }

    #[test]
    fn coercion_failure_names_the_payload_index() {
        let payload = fields(&["1", "not-a-number", "2"]);
        let err = build_record("match_end", 0.0, &payload, 9).unwrap_err();
        assert_eq!(
            err,
            RecordError::FieldTypeMismatch {
                kind: EventKind::MatchEnd,
                field_index: 1,
                value: "not-a-number".to_string(),
                line: 9,
            }
        );
    }

    #[test]
    fn builds_the_full_width_player_stat_record() {
        let payload = fields(&[
            "2", "Team Alpha", "Lucas", "Cassidy", // round, team, name, hero
            "18", "12", "5", // eliminations, final blows, deaths
            "9540.5", "1200", "8340.5", // all/barrier/hero damage
            "0", "600", "0", // healing dealt/received/self
            "7200", "350", // damage taken/blocked
            "3", "9", "4", "3", // assists, ults earned/used
            "2", "1", "4", "6", "0", "1", // multikills, solo, objective, env
            "88", "31.4", "0", "0", "0", // crits and accuracies
            "214", "96", "118", "0", "0", "44.86", "612.2",
        ]);
        let event = build_record("player_stat", 512.0, &payload, 42).unwrap();
        let Event::PlayerStat(stat) = event else {
            panic!("expected a player_stat record");
        };
        assert_eq!(stat.round_number, 2);
        assert_eq!(stat.final_blows, 12);
        assert_eq!(stat.objective_kills, 6);
        assert_eq!(stat.all_damage_dealt, 9540.5);
        assert_eq!(stat.weapon_accuracy, 44.86);
        assert_eq!(stat.hero_time_played, 612.2);
    }

    #[test]
    fn built_records_always_match_expected_arity() {
        // Arity invariant: a successful build implies the payload length
        // matched the kind's table entry.
        let payload = fields(&["1", "All", "0", "0", "0"]);
        let event = build_record("round_start", 0.0, &payload, 1).unwrap();
        assert_eq!(event.kind().arity(), payload.len());
    }
}
