//! Match roster: who played, for which team, on which hero when.
//!
//! A player is identified by `(name, team)` within one match. The active
//! hero at time T is the most recent `hero_spawn`/`hero_swap` at or before T.

use hashbrown::HashMap;

use crate::workbook::MatchWorkbook;

/// One continuous stretch on a hero, open-ended until the next stint.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroStint {
    pub hero: String,
    pub from: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    /// Time-ordered hero stints.
    pub stints: Vec<HeroStint>,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<PlayerRecord>,
}

impl Roster {
    /// Scan spawn and swap events into per-player hero timelines.
    pub fn from_workbook(workbook: &MatchWorkbook) -> Self {
        // Spawns and swaps live in separate sequences; merge them by time.
        let mut changes: Vec<(f64, &str, &str, &str)> = Vec::with_capacity(
            workbook.hero_spawn.len() + workbook.hero_swap.len(),
        );
        for spawn in &workbook.hero_spawn {
            changes.push((
                spawn.match_time,
                &spawn.player_team,
                &spawn.player_name,
                &spawn.player_hero,
            ));
        }
        for swap in &workbook.hero_swap {
            changes.push((
                swap.match_time,
                &swap.player_team,
                &swap.player_name,
                &swap.player_hero,
            ));
        }
        // Stable sort keeps spawn-before-swap at equal timestamps.
        changes.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut players: Vec<PlayerRecord> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for (time, team, name, hero) in changes {
            let idx = *index.entry(name.to_string()).or_insert_with(|| {
                players.push(PlayerRecord {
                    name: name.to_string(),
                    team: team.to_string(),
                    stints: Vec::new(),
                });
                players.len() - 1
            });
            players[idx].stints.push(HeroStint {
                hero: hero.to_string(),
                from: time,
            });
        }
        Self { players }
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn team_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(|p| p.team.as_str())
    }

    /// Active hero at time `t`: the most recent stint starting at or before
    /// `t`. `None` before the first spawn or for unknown players.
    pub fn hero_at(&self, name: &str, t: f64) -> Option<&str> {
        let player = self.get(name)?;
        player
            .stints
            .iter()
            .rev()
            .find(|stint| stint.from <= t)
            .map(|stint| stint.hero.as_str())
    }

    /// Total seconds on each hero, with the final stint closed at `until`.
    pub fn play_durations(&self, name: &str, until: f64) -> Vec<(String, f64)> {
        let Some(player) = self.get(name) else {
            return Vec::new();
        };
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for (i, stint) in player.stints.iter().enumerate() {
            let end = player
                .stints
                .get(i + 1)
                .map(|next| next.from)
                .unwrap_or(until);
            let duration = (end - stint.from).max(0.0);
            *totals.entry(stint.hero.as_str()).or_insert(0.0) += duration;
        }
        let mut durations: Vec<(String, f64)> = totals
            .into_iter()
            .map(|(hero, secs)| (hero.to_string(), secs))
            .collect();
        durations.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        durations
    }

    /// The hero the player spent the most time on (name tiebreak).
    pub fn most_played_hero(&self, name: &str, until: f64) -> Option<String> {
        self.play_durations(name, until)
            .into_iter()
            .next()
            .map(|(hero, _)| hero)
    }
}
