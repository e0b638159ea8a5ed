//! Duel winrates: a player's head-to-head record against each enemy.

use hashbrown::HashMap;

use scrimkit_types::DuelWinrate;

use crate::workbook::MatchWorkbook;

#[derive(Default)]
struct DuelTally {
    kills: u32,
    deaths: u32,
    player_team: String,
    player_hero: String,
    enemy_team: String,
    enemy_hero: String,
}

/// Group kill events where `player` and a single enemy are the two
/// participants, by enemy. Winrate = kills / (kills + deaths) × 100; an
/// enemy with a zero denominator is omitted from the ranked output rather
/// than divided by zero. Hero/team context comes from the latest kill row
/// between the pair.
pub fn duel_winrates(workbook: &MatchWorkbook, player: &str) -> Vec<DuelWinrate> {
    let mut tallies: HashMap<&str, DuelTally> = HashMap::new();

    for kill in &workbook.kill {
        if kill.attacker_name == kill.victim_name {
            continue;
        }
        if kill.attacker_name == player {
            let tally = tallies.entry(kill.victim_name.as_str()).or_default();
            tally.kills += 1;
            tally.player_team = kill.attacker_team.clone();
            tally.player_hero = kill.attacker_hero.clone();
            tally.enemy_team = kill.victim_team.clone();
            tally.enemy_hero = kill.victim_hero.clone();
        } else if kill.victim_name == player {
            let tally = tallies.entry(kill.attacker_name.as_str()).or_default();
            tally.deaths += 1;
            tally.player_team = kill.victim_team.clone();
            tally.player_hero = kill.victim_hero.clone();
            tally.enemy_team = kill.attacker_team.clone();
            tally.enemy_hero = kill.attacker_hero.clone();
        }
    }

    let mut duels: Vec<DuelWinrate> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.kills + tally.deaths > 0)
        .map(|(enemy_name, tally)| {
            let total = (tally.kills + tally.deaths) as f64;
            DuelWinrate {
                player_name: player.to_string(),
                player_team: tally.player_team,
                player_hero: tally.player_hero,
                enemy_name: enemy_name.to_string(),
                enemy_team: tally.enemy_team,
                enemy_hero: tally.enemy_hero,
                kills: tally.kills,
                deaths: tally.deaths,
                winrate_pct: tally.kills as f64 / total * 100.0,
            }
        })
        .collect();

    // Best matchups first; enemy name breaks ties so output is stable.
    duels.sort_by(|a, b| {
        b.winrate_pct
            .partial_cmp(&a.winrate_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.enemy_name.cmp(&b.enemy_name))
    });
    duels
}
