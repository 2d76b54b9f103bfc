//! Score derivation — pure, read-only queries over a `ScoreboardState`.
//!
//! Absent score entries count as 0. The state keeps an entry for every player
//! in every category, so the default only matters for ids that are not on the
//! roster at all.

use serde::Serialize;

use crate::game::rules::{is_upper_section, rule_for};
use crate::game::state::ScoreboardState;

/// Sum of the player's six numeral categories ("Ones" through "Sixes").
pub fn upper_section_total(state: &ScoreboardState, player_id: &str) -> i32 {
    state
        .categories()
        .iter()
        .filter(|c| is_upper_section(&c.name))
        .fold(0i32, |acc, c| acc.saturating_add(c.score(player_id)))
}

/// Whether the upper section meets the active mode's bonus threshold.
pub fn is_bonus_eligible(state: &ScoreboardState, player_id: &str) -> bool {
    upper_section_total(state, player_id) >= rule_for(state.game_mode()).bonus_threshold
}

/// The bonus points the player currently earns (0 or the mode's award).
pub fn bonus_for(state: &ScoreboardState, player_id: &str) -> i32 {
    if is_bonus_eligible(state, player_id) {
        rule_for(state.game_mode()).bonus_award
    } else {
        0
    }
}

/// Sum of every category score plus the bonus when eligible.
pub fn total_score(state: &ScoreboardState, player_id: &str) -> i32 {
    state
        .categories()
        .iter()
        .fold(0i32, |acc, c| acc.saturating_add(c.score(player_id)))
        .saturating_add(bonus_for(state, player_id))
}

/// Derived totals for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub player_id: String,
    pub name: String,
    pub upper_total: i32,
    pub bonus: i32,
    pub total: i32,
}

/// One `Standing` per player, in roster order.
pub fn standings(state: &ScoreboardState) -> Vec<Standing> {
    state
        .players()
        .iter()
        .map(|p| Standing {
            player_id: p.id.clone(),
            name: p.name.clone(),
            upper_total: upper_section_total(state, &p.id),
            bonus: bonus_for(state, &p.id),
            total: total_score(state, &p.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::GameMode;

    /// Fill the upper section so it sums to `sum`, putting the remainder in Ones.
    fn with_upper_sum(mode: GameMode, sum: i32) -> ScoreboardState {
        let mut state = ScoreboardState::initialize(mode);
        // Sixes take as many multiples of 6 as fit, Ones take the rest.
        let sixes = (sum / 6).min(30) * 6;
        state.set_score(5, "1", &sixes.to_string()).unwrap();
        state.set_score(0, "1", &(sum - sixes).to_string()).unwrap();
        state
    }

    #[test]
    fn fresh_player_scores_zero() {
        let state = ScoreboardState::initialize(GameMode::Classic);
        assert_eq!(upper_section_total(&state, "1"), 0);
        assert!(!is_bonus_eligible(&state, "1"));
        assert_eq!(total_score(&state, "1"), 0);
    }

    #[test]
    fn classic_bonus_boundary() {
        assert!(is_bonus_eligible(&with_upper_sum(GameMode::Classic, 63), "1"));
        assert!(!is_bonus_eligible(&with_upper_sum(GameMode::Classic, 62), "1"));
    }

    #[test]
    fn maxi_bonus_boundary() {
        assert!(is_bonus_eligible(&with_upper_sum(GameMode::Maxi, 84), "1"));
        assert!(!is_bonus_eligible(&with_upper_sum(GameMode::Maxi, 83), "1"));
    }

    #[test]
    fn classic_total_includes_bonus() {
        let mut state = ScoreboardState::initialize(GameMode::Classic);
        for (i, v) in ["3", "6", "9", "12", "15", "18"].iter().enumerate() {
            state.set_score(i, "1", v).unwrap();
        }
        assert_eq!(upper_section_total(&state, "1"), 63);
        assert_eq!(bonus_for(&state, "1"), 50);
        assert_eq!(total_score(&state, "1"), 113);
    }

    #[test]
    fn lower_section_does_not_count_toward_bonus() {
        let mut state = ScoreboardState::initialize(GameMode::Classic);
        state.set_score(12, "1", "30").unwrap(); // Chance
        state.set_score(11, "1", "50").unwrap(); // Yahtzee
        assert_eq!(upper_section_total(&state, "1"), 0);
        assert!(!is_bonus_eligible(&state, "1"));
        assert_eq!(total_score(&state, "1"), 80);
    }

    #[test]
    fn maxi_total_uses_maxi_award() {
        let mut state = with_upper_sum(GameMode::Maxi, 90);
        state.set_score(15, "1", "20").unwrap(); // Chance
        assert_eq!(total_score(&state, "1"), 90 + 20 + 100);
    }

    #[test]
    fn unknown_player_defaults_to_zero() {
        let state = with_upper_sum(GameMode::Classic, 70);
        assert_eq!(upper_section_total(&state, "ghost"), 0);
        assert_eq!(total_score(&state, "ghost"), 0);
    }

    #[test]
    fn standings_follow_roster_order() {
        let mut state = ScoreboardState::initialize(GameMode::Classic);
        let second = state.add_player();
        state.set_score(5, &second, "66").unwrap();
        let rows = standings(&state);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total, 0);
        assert_eq!(rows[1].player_id, second);
        assert_eq!(rows[1].upper_total, 66);
        assert_eq!(rows[1].bonus, 50);
        assert_eq!(rows[1].total, 116);
    }
}
