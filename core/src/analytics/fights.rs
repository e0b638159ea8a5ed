//! Fight grouping: clustering a player's kill/death events into discrete
//! engagements by temporal proximity.
//!
//! Fights are derived, never persisted; each call recomputes from the
//! immutable workbook.

use serde::Serialize;

use crate::combat_log::records::Kill;
use crate::workbook::MatchWorkbook;

/// A temporal cluster of kill events involving one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fight {
    pub start: f64,
    pub end: f64,
    pub kills: Vec<Kill>,
}

impl Fight {
    pub fn final_blows_by(&self, player: &str) -> u32 {
        self.kills
            .iter()
            .filter(|k| k.attacker_name == player)
            .count() as u32
    }

    pub fn deaths_of(&self, player: &str) -> u32 {
        self.kills.iter().filter(|k| k.victim_name == player).count() as u32
    }
}

/// Cluster the kill events involving `player` into fights.
///
/// The workbook's kill sequence is already time-ordered, so this is a single
/// scan: a new fight starts when the gap since the player's previous event
/// strictly exceeds `gap_secs`; events at identical timestamps always join
/// the preceding fight. A player with no qualifying events yields an empty
/// vec, not an error.
pub fn group_player_kills(workbook: &MatchWorkbook, player: &str, gap_secs: f64) -> Vec<Fight> {
    let mut fights: Vec<Fight> = Vec::new();

    for kill in &workbook.kill {
        if kill.attacker_name != player && kill.victim_name != player {
            continue;
        }
        let starts_new = match fights.last() {
            Some(fight) => kill.match_time - fight.end > gap_secs,
            None => true,
        };
        if starts_new {
            fights.push(Fight {
                start: kill.match_time,
                end: kill.match_time,
                kills: vec![kill.clone()],
            });
        } else if let Some(fight) = fights.last_mut() {
            fight.end = kill.match_time;
            fight.kills.push(kill.clone());
        }
    }
    fights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LogParser;

    fn kill_line(t: f64, attacker: &str, victim: &str) -> String {
        format!("{t};kill;Team 1;{attacker};Tracer;Team 2;{victim};Ana;Primary Fire;40;0;0\n")
    }

    fn workbook(lines: &[String]) -> MatchWorkbook {
        LogParser::parse_str(&lines.concat()).workbook
    }

    #[test]
    fn gap_threshold_splits_fights() {
        // Two kills 4s apart fall inside a 6s threshold; a third 26s later
        // starts a new fight.
        let wb = workbook(&[
            kill_line(100.0, "X", "A"),
            kill_line(104.0, "X", "B"),
            kill_line(130.0, "X", "C"),
        ]);
        let fights = group_player_kills(&wb, "X", 6.0);
        assert_eq!(fights.len(), 2);
        assert_eq!(fights[0].kills.len(), 2);
        assert_eq!(fights[0].start, 100.0);
        assert_eq!(fights[0].end, 104.0);
        assert_eq!(fights[1].kills.len(), 1);
        assert_eq!(fights[1].start, 130.0);
    }

    #[test]
    fn gap_equal_to_threshold_stays_in_the_fight() {
        let wb = workbook(&[kill_line(10.0, "X", "A"), kill_line(16.0, "X", "B")]);
        let fights = group_player_kills(&wb, "X", 6.0);
        assert_eq!(fights.len(), 1);
    }

    #[test]
    fn identical_timestamps_join_the_preceding_fight() {
        let wb = workbook(&[
            kill_line(50.0, "X", "A"),
            kill_line(50.0, "Y", "X"),
            kill_line(50.0, "X", "B"),
        ]);
        let fights = group_player_kills(&wb, "X", 6.0);
        assert_eq!(fights.len(), 1);
        assert_eq!(fights[0].kills.len(), 3);
        assert_eq!(fights[0].final_blows_by("X"), 2);
        assert_eq!(fights[0].deaths_of("X"), 1);
    }

    #[test]
    fn deaths_count_as_involvement() {
        let wb = workbook(&[kill_line(10.0, "Y", "X")]);
        let fights = group_player_kills(&wb, "X", 6.0);
        assert_eq!(fights.len(), 1);
        assert_eq!(fights[0].deaths_of("X"), 1);
    }

    #[test]
    fn no_qualifying_kills_yields_empty_sequence() {
        let wb = workbook(&[kill_line(10.0, "A", "B")]);
        assert!(group_player_kills(&wb, "X", 6.0).is_empty());
    }

    #[test]
    fn recomputation_is_deterministic() {
        let wb = workbook(&[kill_line(10.0, "X", "A"), kill_line(40.0, "X", "B")]);
        assert_eq!(
            group_player_kills(&wb, "X", 15.0),
            group_player_kills(&wb, "X", 15.0)
        );
    }
}
