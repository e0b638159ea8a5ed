//! The match workbook: the canonical parsed representation of one match.
//!
//! One ordered sequence per event kind, insertion order = file order = time
//! order. The workbook is built once per parse and never mutated afterwards;
//! all analytics are pure reads. Field-for-field equality (`PartialEq`) is
//! the comparison the equivalence law is stated in.

use serde::{Deserialize, Serialize};

use crate::combat_log::records::*;
use crate::combat_log::{Event, EventKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchWorkbook {
    pub match_start: Vec<MatchStart>,
    pub match_end: Vec<MatchEnd>,
    pub round_start: Vec<RoundStart>,
    pub round_end: Vec<RoundEnd>,
    pub setup_complete: Vec<SetupComplete>,
    pub objective_captured: Vec<ObjectiveCaptured>,
    pub objective_updated: Vec<ObjectiveUpdated>,
    pub point_progress: Vec<PointProgress>,
    pub payload_progress: Vec<PayloadProgress>,
    pub player_stat: Vec<PlayerStat>,
    pub kill: Vec<Kill>,
    pub defensive_assist: Vec<DefensiveAssist>,
    pub offensive_assist: Vec<OffensiveAssist>,
    pub hero_spawn: Vec<HeroSpawn>,
    pub hero_swap: Vec<HeroSwap>,
    pub ultimate_charged: Vec<UltimateCharged>,
    pub ultimate_start: Vec<UltimateStart>,
    pub ultimate_end: Vec<UltimateEnd>,
}

impl MatchWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic fold: append a built record to its kind's sequence.
    /// No sorting, no deduplication.
    pub fn push(&mut self, event: Event) {
        match event {
            Event::MatchStart(e) => self.match_start.push(e),
            Event::MatchEnd(e) => self.match_end.push(e),
            Event::RoundStart(e) => self.round_start.push(e),
            Event::RoundEnd(e) => self.round_end.push(e),
            Event::SetupComplete(e) => self.setup_complete.push(e),
            Event::ObjectiveCaptured(e) => self.objective_captured.push(e),
            Event::ObjectiveUpdated(e) => self.objective_updated.push(e),
            Event::PointProgress(e) => self.point_progress.push(e),
            Event::PayloadProgress(e) => self.payload_progress.push(e),
            Event::PlayerStat(e) => self.player_stat.push(*e),
            Event::Kill(e) => self.kill.push(e),
            Event::DefensiveAssist(e) => self.defensive_assist.push(e),
            Event::OffensiveAssist(e) => self.offensive_assist.push(e),
            Event::HeroSpawn(e) => self.hero_spawn.push(e),
            Event::HeroSwap(e) => self.hero_swap.push(e),
            Event::UltimateCharged(e) => self.ultimate_charged.push(e),
            Event::UltimateStart(e) => self.ultimate_start.push(e),
            Event::UltimateEnd(e) => self.ultimate_end.push(e),
        }
    }

    pub fn from_events<I: IntoIterator<Item = Event>>(events: I) -> Self {
        let mut workbook = Self::new();
        for event in events {
            workbook.push(event);
        }
        workbook
    }

    pub fn kind_len(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::MatchStart => self.match_start.len(),
            EventKind::MatchEnd => self.match_end.len(),
            EventKind::RoundStart => self.round_start.len(),
            EventKind::RoundEnd => self.round_end.len(),
            EventKind::SetupComplete => self.setup_complete.len(),
            EventKind::ObjectiveCaptured => self.objective_captured.len(),
            EventKind::ObjectiveUpdated => self.objective_updated.len(),
            EventKind::PointProgress => self.point_progress.len(),
            EventKind::PayloadProgress => self.payload_progress.len(),
            EventKind::PlayerStat => self.player_stat.len(),
            EventKind::Kill => self.kill.len(),
            EventKind::DefensiveAssist => self.defensive_assist.len(),
            EventKind::OffensiveAssist => self.offensive_assist.len(),
            EventKind::HeroSpawn => self.hero_spawn.len(),
            EventKind::HeroSwap => self.hero_swap.len(),
            EventKind::UltimateCharged => self.ultimate_charged.len(),
            EventKind::UltimateStart => self.ultimate_start.len(),
            EventKind::UltimateEnd => self.ultimate_end.len(),
        }
    }

    /// Total records across all kinds.
    pub fn len(&self) -> usize {
        EventKind::ALL.iter().map(|&k| self.kind_len(k)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamp of the last record in the match, across all kinds.
    /// 0.0 for an empty workbook.
    pub fn last_timestamp(&self) -> f64 {
        let mut t: f64 = 0.0;
        if let Some(e) = self.match_start.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.match_end.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.round_start.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.round_end.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.setup_complete.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.objective_captured.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.objective_updated.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.point_progress.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.payload_progress.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.player_stat.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.kill.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.defensive_assist.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.offensive_assist.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.hero_spawn.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.hero_swap.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.ultimate_charged.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.ultimate_start.last() {
            t = t.max(e.match_time);
        }
        if let Some(e) = self.ultimate_end.last() {
            t = t.max(e.match_time);
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    use crate::combat_log::build_record;

    fn event(tag: &str, ts: f64, payload: &[&str]) -> Event {
        let fields: Vec<Cow<'_, str>> = payload.iter().map(|s| Cow::Borrowed(*s)).collect();
        build_record(tag, ts, &fields, 1).unwrap()
    }

    #[test]
    fn push_preserves_per_kind_insertion_order() {
        let mut wb = MatchWorkbook::new();
        wb.push(event(
            "ultimate_charged",
            10.0,
            &["Team 1", "Ana Main", "Ana", "0", "1"],
        ));
        wb.push(event(
            "ultimate_charged",
            42.0,
            &["Team 1", "Ana Main", "Ana", "0", "2"],
        ));
        assert_eq!(wb.kind_len(EventKind::UltimateCharged), 2);
        assert_eq!(wb.ultimate_charged[0].match_time, 10.0);
        assert_eq!(wb.ultimate_charged[1].match_time, 42.0);
    }

    #[test]
    fn empty_workbook_reports_zero_everywhere() {
        let wb = MatchWorkbook::new();
        assert!(wb.is_empty());
        assert_eq!(wb.last_timestamp(), 0.0);
        for kind in EventKind::ALL {
            assert_eq!(wb.kind_len(kind), 0);
        }
    }

    #[test]
    fn last_timestamp_spans_all_kinds() {
        let mut wb = MatchWorkbook::new();
        wb.push(event("setup_complete", 5.0, &["1", "240"]));
        wb.push(event("match_end", 99.5, &["2", "1", "0"]));
        assert_eq!(wb.last_timestamp(), 99.5);
    }
}
