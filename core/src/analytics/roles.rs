//! Static hero → role table.
//!
//! Shipped as a compile-time map; the roster decides *which* hero a player
//! counts as (most play time), this module decides what role that hero is.

use phf::phf_map;
use scrimkit_types::Role;

static HERO_ROLES: phf::Map<&'static str, Role> = phf_map! {
    // Tanks
    "D.Va" => Role::Tank,
    "Doomfist" => Role::Tank,
    "Hazard" => Role::Tank,
    "Junker Queen" => Role::Tank,
    "Mauga" => Role::Tank,
    "Orisa" => Role::Tank,
    "Ramattra" => Role::Tank,
    "Reinhardt" => Role::Tank,
    "Roadhog" => Role::Tank,
    "Sigma" => Role::Tank,
    "Winston" => Role::Tank,
    "Wrecking Ball" => Role::Tank,
    "Zarya" => Role::Tank,
    // Damage
    "Ashe" => Role::Damage,
    "Bastion" => Role::Damage,
    "Cassidy" => Role::Damage,
    "Echo" => Role::Damage,
    "Freja" => Role::Damage,
    "Genji" => Role::Damage,
    "Hanzo" => Role::Damage,
    "Junkrat" => Role::Damage,
    "Mei" => Role::Damage,
    "Pharah" => Role::Damage,
    "Reaper" => Role::Damage,
    "Sojourn" => Role::Damage,
    "Soldier: 76" => Role::Damage,
    "Sombra" => Role::Damage,
    "Symmetra" => Role::Damage,
    "Torbjörn" => Role::Damage,
    "Tracer" => Role::Damage,
    "Venture" => Role::Damage,
    "Widowmaker" => Role::Damage,
    // Supports
    "Ana" => Role::Support,
    "Baptiste" => Role::Support,
    "Brigitte" => Role::Support,
    "Illari" => Role::Support,
    "Juno" => Role::Support,
    "Kiriko" => Role::Support,
    "Lifeweaver" => Role::Support,
    "Lúcio" => Role::Support,
    "Mercy" => Role::Support,
    "Moira" => Role::Support,
    "Wuyang" => Role::Support,
    "Zenyatta" => Role::Support,
};

/// Role for a hero name; unknown heroes count as Damage (the broadest queue).
pub fn role_for_hero(hero: &str) -> Role {
    HERO_ROLES.get(hero).copied().unwrap_or(Role::Damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_heroes_resolve() {
        assert_eq!(role_for_hero("Reinhardt"), Role::Tank);
        assert_eq!(role_for_hero("Tracer"), Role::Damage);
        assert_eq!(role_for_hero("Ana"), Role::Support);
    }

    #[test]
    fn unknown_hero_defaults_to_damage() {
        assert_eq!(role_for_hero("Workshop Dummy"), Role::Damage);
        assert_eq!(role_for_hero(""), Role::Damage);
    }
}
