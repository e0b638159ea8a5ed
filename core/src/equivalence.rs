//! Workbook comparison for the two-ingestion-path equivalence law.
//!
//! Only test tooling and the validate binary raise these mismatches;
//! production parsing never does.

use thiserror::Error;

use crate::combat_log::EventKind;
use crate::workbook::MatchWorkbook;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquivalenceMismatch {
    #[error("{kind}: row count differs (left {left_rows}, right {right_rows})")]
    RowCount {
        kind: EventKind,
        left_rows: usize,
        right_rows: usize,
    },

    #[error("{kind}: rows diverge at index {row}")]
    Row { kind: EventKind, row: usize },
}

/// Field-for-field comparison of two workbooks, one finding per kind: a row
/// count difference, or the first divergent row. Empty means equivalent.
pub fn compare(left: &MatchWorkbook, right: &MatchWorkbook) -> Vec<EquivalenceMismatch> {
    let mut mismatches = Vec::new();
    compare_kind(EventKind::MatchStart, &left.match_start, &right.match_start, &mut mismatches);
    compare_kind(EventKind::MatchEnd, &left.match_end, &right.match_end, &mut mismatches);
    compare_kind(EventKind::RoundStart, &left.round_start, &right.round_start, &mut mismatches);
    compare_kind(EventKind::RoundEnd, &left.round_end, &right.round_end, &mut mismatches);
    compare_kind(
        EventKind::SetupComplete,
        &left.setup_complete,
        &right.setup_complete,
        &mut mismatches,
    );
    compare_kind(
        EventKind::ObjectiveCaptured,
        &left.objective_captured,
        &right.objective_captured,
        &mut mismatches,
    );
    compare_kind(
        EventKind::ObjectiveUpdated,
        &left.objective_updated,
        &right.objective_updated,
        &mut mismatches,
    );
    compare_kind(
        EventKind::PointProgress,
        &left.point_progress,
        &right.point_progress,
        &mut mismatches,
    );
    compare_kind(
        EventKind::PayloadProgress,
        &left.payload_progress,
        &right.payload_progress,
        &mut mismatches,
    );
    compare_kind(EventKind::PlayerStat, &left.player_stat, &right.player_stat, &mut mismatches);
    compare_kind(EventKind::Kill, &left.kill, &right.kill, &mut mismatches);
    compare_kind(
        EventKind::DefensiveAssist,
        &left.defensive_assist,
        &right.defensive_assist,
        &mut mismatches,
    );
    compare_kind(
        EventKind::OffensiveAssist,
        &left.offensive_assist,
        &right.offensive_assist,
        &mut mismatches,
    );
    compare_kind(EventKind::HeroSpawn, &left.hero_spawn, &right.hero_spawn, &mut mismatches);
    compare_kind(EventKind::HeroSwap, &left.hero_swap, &right.hero_swap, &mut mismatches);
    compare_kind(
        EventKind::UltimateCharged,
        &left.ultimate_charged,
        &right.ultimate_charged,
        &mut mismatches,
    );
    compare_kind(
        EventKind::UltimateStart,
        &left.ultimate_start,
        &right.ultimate_start,
        &mut mismatches,
    );
    compare_kind(
        EventKind::UltimateEnd,
        &left.ultimate_end,
        &right.ultimate_end,
        &mut mismatches,
    );
    mismatches
}

fn compare_kind<T: PartialEq>(
    kind: EventKind,
    left: &[T],
    right: &[T],
    mismatches: &mut Vec<EquivalenceMismatch>,
) {
    if left.len() != right.len() {
        mismatches.push(EquivalenceMismatch::RowCount {
            kind,
            left_rows: left.len(),
            right_rows: right.len(),
        });
        return;
    }
    if let Some(row) = left.iter().zip(right).position(|(l, r)| l != r) {
        mismatches.push(EquivalenceMismatch::Row { kind, row });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LogParser;

    #[test]
    fn identical_workbooks_have_no_mismatches() {
        let text = "0;match_start;Midtown;Hybrid;A;B\n5;setup_complete;1;240\n";
        let left = LogParser::parse_str(text).workbook;
        let right = LogParser::parse_str(text).workbook;
        assert!(compare(&left, &right).is_empty());
    }

    #[test]
    fn row_count_difference_is_reported_per_kind() {
        let left = LogParser::parse_str("5;setup_complete;1;240\n").workbook;
        let right =
            LogParser::parse_str("5;setup_complete;1;240\n6;setup_complete;2;240\n").workbook;
        let mismatches = compare(&left, &right);
        assert_eq!(
            mismatches,
            vec![EquivalenceMismatch::RowCount {
                kind: EventKind::SetupComplete,
                left_rows: 1,
                right_rows: 2,
            }]
        );
    }

    #[test]
    fn first_divergent_row_is_reported() {
        let left = LogParser::parse_str("5;setup_complete;1;240\n9;setup_complete;2;200\n").workbook;
        let right =
            LogParser::parse_str("5;setup_complete;1;240\n9;setup_complete;2;199\n").workbook;
        let mismatches = compare(&left, &right);
        assert_eq!(
            mismatches,
            vec![EquivalenceMismatch::Row {
                kind: EventKind::SetupComplete,
                row: 1,
            }]
        );
    }
}
