//! X-Factor: a single role-weighted scalar summarizing a player's fight
//! impact, bounded to `[0, 100]`.
//!
//! Four components, each normalized to `[0, 1]` by the caps in
//! [`AnalyticsConfig`]: final-blow rate per fight, survival (deaths per
//! fight, inverted), objective contribution (objective kills from the stat
//! rows), and ultimate efficiency (conversion plus hold time). A player with
//! no qualifying fights scores 0 — no fights, no fight impact.

use scrimkit_types::{Role, XFactorBreakdown};

use super::config::AnalyticsConfig;
use super::{fights, roles, ultimates};
use crate::roster::Roster;
use crate::workbook::MatchWorkbook;

pub fn x_factor(workbook: &MatchWorkbook, player: &str, config: &AnalyticsConfig) -> XFactorBreakdown {
    let role = infer_role(workbook, player);
    let weights = config.weights.for_role(role);
    let caps = &config.caps;

    let fight_count = fights::group_player_kills(workbook, player, config.fight_gap_secs).len();
    if fight_count == 0 {
        return XFactorBreakdown {
            player_name: player.to_string(),
            role,
            final_blow_component: 0.0,
            survival_component: 0.0,
            objective_component: 0.0,
            ultimate_component: 0.0,
            score: 0.0,
        };
    }
    let fight_count = fight_count as f64;

    let final_blows = workbook
        .kill
        .iter()
        .filter(|k| k.attacker_name == player)
        .count() as f64;
    let deaths = workbook
        .kill
        .iter()
        .filter(|k| k.victim_name == player)
        .count() as f64;
    // Stat rows are cumulative counters re-emitted per round; the max is the
    // match total.
    let objective_kills = workbook
        .player_stat
        .iter()
        .filter(|s| s.player_name == player)
        .map(|s| s.objective_kills)
        .max()
        .unwrap_or(0) as f64;

    let final_blow_component = clamp01(final_blows / (fight_count * caps.final_blows_per_fight));
    let survival_component = clamp01(1.0 - deaths / (fight_count * caps.deaths_per_fight));
    let objective_component = clamp01(objective_kills / caps.objective_kills);
    let ultimate_component = ultimate_efficiency(workbook, player, config);

    let score = 100.0
        * (weights.final_blows * final_blow_component
            + weights.survival * survival_component
            + weights.objective * objective_component
            + weights.ultimate * ultimate_component);

    XFactorBreakdown {
        player_name: player.to_string(),
        role,
        final_blow_component,
        survival_component,
        objective_component,
        ultimate_component,
        score: clamp01(score / 100.0) * 100.0,
    }
}

/// Half conversion (final blows per ultimate), half decisiveness (how fast a
/// charged ultimate gets used).
fn ultimate_efficiency(workbook: &MatchWorkbook, player: &str, config: &AnalyticsConfig) -> f64 {
    let caps = &config.caps;
    let conversion = clamp01(
        ultimates::final_blows_per_ultimate(workbook, player) / caps.final_blows_per_ult,
    );
    let timeline = ultimates::UltimateTimeline::build(workbook, player);
    let decisiveness = if timeline.pairs.is_empty() {
        0.0
    } else {
        clamp01(1.0 - ultimates::average_time_to_use(workbook, player) / caps.ult_hold_secs)
    };
    0.5 * conversion + 0.5 * decisiveness
}

/// Role of the hero the player spent the most time on; falls back to the
/// first stat row's hero when the log carries no spawn events.
fn infer_role(workbook: &MatchWorkbook, player: &str) -> Role {
    let roster = Roster::from_workbook(workbook);
    let hero = roster
        .most_played_hero(player, workbook.last_timestamp())
        .or_else(|| {
            workbook
                .player_stat
                .iter()
                .find(|s| s.player_name == player)
                .map(|s| s.player_hero.clone())
        });
    match hero {
        Some(hero) => roles::role_for_hero(&hero),
        None => Role::Damage,
    }
}

fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}
