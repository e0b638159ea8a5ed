//! Ultimate economy: the per-player `Idle → Charged → Active → Idle` state
//! machine and the timing metrics derived from it.
//!
//! Out-of-order lifecycle events are recorded as anomalies and the offending
//! event becomes authoritative; the scan never aborts.

use serde::Serialize;

use crate::error::Anomaly;
use crate::workbook::MatchWorkbook;

/// Lifecycle state of one player's ultimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UltState {
    Idle,
    Charged,
    Active,
}

/// Per-player ultimate lifecycle, reconstructed from the workbook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UltimateTimeline {
    /// Times of `ultimate_charged` events, in order.
    pub charges: Vec<f64>,
    /// FIFO `(charged_at, started_at)` pairs; a charge pairs with the next
    /// unconsumed start only.
    pub pairs: Vec<(f64, f64)>,
    /// Active windows `[started_at, ended_at]`; a start with no matching end
    /// closes at the last timestamp of the match.
    pub windows: Vec<(f64, f64)>,
    /// Count of `ultimate_start` events.
    pub starts: u32,
    pub anomalies: Vec<Anomaly>,
}

#[derive(Clone, Copy, PartialEq)]
enum Lifecycle {
    Charged,
    Started,
    Ended,
}

impl UltimateTimeline {
    pub fn build(workbook: &MatchWorkbook, player: &str) -> Self {
        // Merge the three lifecycle sequences by time. At equal timestamps
        // the cycle order charged < start < end disambiguates.
        let mut events: Vec<(f64, Lifecycle)> = Vec::new();
        for e in &workbook.ultimate_charged {
            if e.player_name == player {
                events.push((e.match_time, Lifecycle::Charged));
            }
        }
        for e in &workbook.ultimate_start {
            if e.player_name == player {
                events.push((e.match_time, Lifecycle::Started));
            }
        }
        for e in &workbook.ultimate_end {
            if e.player_name == player {
                events.push((e.match_time, Lifecycle::Ended));
            }
        }
        events.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| phase_rank(a.1).cmp(&phase_rank(b.1)))
        });

        let mut timeline = UltimateTimeline::default();
        let mut state = UltState::Idle;
        let mut pending_charges: Vec<f64> = Vec::new();
        let mut active_since: Option<f64> = None;

        for (t, lifecycle) in events {
            match lifecycle {
                Lifecycle::Charged => {
                    if state != UltState::Idle {
                        timeline.record_anomaly(player, t, state, UltState::Charged);
                    }
                    timeline.charges.push(t);
                    pending_charges.push(t);
                    state = UltState::Charged;
                }
                Lifecycle::Started => {
                    if state != UltState::Charged {
                        timeline.record_anomaly(player, t, state, UltState::Active);
                    }
                    // A start while already active supersedes the open window.
                    if let Some(since) = active_since.take() {
                        timeline.windows.push((since, t));
                    }
                    if !pending_charges.is_empty() {
                        let charged_at = pending_charges.remove(0);
                        timeline.pairs.push((charged_at, t));
                    }
                    timeline.starts += 1;
                    active_since = Some(t);
                    state = UltState::Active;
                }
                Lifecycle::Ended => {
                    if state != UltState::Active {
                        timeline.record_anomaly(player, t, state, UltState::Idle);
                    }
                    if let Some(since) = active_since.take() {
                        timeline.windows.push((since, t));
                    }
                    state = UltState::Idle;
                }
            }
        }
        // An ultimate still active at match end stays active until the last
        // recorded timestamp.
        if let Some(since) = active_since {
            timeline.windows.push((since, workbook.last_timestamp().max(since)));
        }
        timeline
    }

    fn record_anomaly(&mut self, player: &str, at: f64, from: UltState, to: UltState) {
        self.anomalies.push(Anomaly::AnomalousStateTransition {
            player: player.to_string(),
            at,
            from,
            to,
        });
    }

    fn is_active_at(&self, t: f64) -> bool {
        self.windows.iter().any(|&(start, end)| t >= start && t <= end)
    }
}

fn phase_rank(lifecycle: Lifecycle) -> u8 {
    match lifecycle {
        Lifecycle::Charged => 0,
        Lifecycle::Started => 1,
        Lifecycle::Ended => 2,
    }
}

/// Mean time to build an ultimate: the first charge measures from the most
/// recent round start at or before it, later charges from the previous
/// charge. Returns the 0.0 sentinel when the player never charged.
pub fn average_charge_time(workbook: &MatchWorkbook, player: &str) -> f64 {
    let timeline = UltimateTimeline::build(workbook, player);
    if timeline.charges.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    for (i, &charge) in timeline.charges.iter().enumerate() {
        let reference = if i == 0 {
            workbook
                .round_start
                .iter()
                .map(|r| r.match_time)
                .filter(|&t| t <= charge)
                .fold(0.0, f64::max)
        } else {
            timeline.charges[i - 1]
        };
        total += charge - reference;
    }
    total / timeline.charges.len() as f64
}

/// Mean time between charging an ultimate and using it, over FIFO
/// (charge, start) pairs. Charges never used are excluded, not infinite.
/// Returns the 0.0 sentinel when no pair exists.
pub fn average_time_to_use(workbook: &MatchWorkbook, player: &str) -> f64 {
    let timeline = UltimateTimeline::build(workbook, player);
    if timeline.pairs.is_empty() {
        return 0.0;
    }
    let total: f64 = timeline
        .pairs
        .iter()
        .map(|&(charged, started)| started - charged)
        .sum();
    total / timeline.pairs.len() as f64
}

/// Final blows landed while the player's ultimate was active, per ultimate
/// used. 0.0 when the player never used an ultimate.
pub fn final_blows_per_ultimate(workbook: &MatchWorkbook, player: &str) -> f64 {
    let timeline = UltimateTimeline::build(workbook, player);
    if timeline.starts == 0 {
        return 0.0;
    }
    let kills_during_ult = workbook
        .kill
        .iter()
        .filter(|kill| kill.attacker_name == player && timeline.is_active_at(kill.match_time))
        .count();
    kills_during_ult as f64 / timeline.starts as f64
}
