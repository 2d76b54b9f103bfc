//! Rule catalog — the closed set of supported game modes and the static
//! category list, bonus threshold and bonus award each one scores with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six numeral categories whose sum decides the bonus. Identical names and
/// positions in every mode.
pub const UPPER_SECTION: [&str; 6] = ["Ones", "Twos", "Threes", "Fours", "Fives", "Sixes"];

const CLASSIC_CATEGORIES: [&str; 13] = [
    "Ones",
    "Twos",
    "Threes",
    "Fours",
    "Fives",
    "Sixes",
    "Three of a Kind",
    "Four of a Kind",
    "Full House",
    "Small Straight",
    "Large Straight",
    "Yahtzee",
    "Chance",
];

const MAXI_CATEGORIES: [&str; 16] = [
    "Ones",
    "Twos",
    "Threes",
    "Fours",
    "Fives",
    "Sixes",
    "One Pair",
    "Two Pairs",
    "Three Pairs",
    "Small Straight (1-5)",
    "Large Straight (2-6)",
    "Full Straight (1-6)",
    "House (Full House)",
    "Tower (4 of a kind)",
    "Maxi Yatzy (5 of a kind)",
    "Chance",
];

/// Which ruleset the scoreboard is keeping score for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Maxi,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Classic, GameMode::Maxi];

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Maxi => "maxi",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "maxi" => Ok(GameMode::Maxi),
            other => Err(format!("unknown game mode: {}", other)),
        }
    }
}

/// Static scoring rules for one game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleCatalogEntry {
    /// Ordered category names. Defines both identity and display order.
    pub category_names: &'static [&'static str],
    /// Upper-section sum at or above which the bonus is awarded.
    pub bonus_threshold: i32,
    /// Points added to the total when the threshold is met.
    pub bonus_award: i32,
    pub title: &'static str,
}

impl RuleCatalogEntry {
    pub fn category_count(&self) -> usize {
        self.category_names.len()
    }
}

static CLASSIC: RuleCatalogEntry = RuleCatalogEntry {
    category_names: &CLASSIC_CATEGORIES,
    bonus_threshold: 63,
    bonus_award: 50,
    title: "Yahtzee Scoreboard",
};

static MAXI: RuleCatalogEntry = RuleCatalogEntry {
    category_names: &MAXI_CATEGORIES,
    bonus_threshold: 84,
    bonus_award: 100,
    title: "Maxi Yatzy Scoreboard",
};

/// Look up the rules for a mode. Every mode is always defined.
pub fn rule_for(mode: GameMode) -> &'static RuleCatalogEntry {
    match mode {
        GameMode::Classic => &CLASSIC,
        GameMode::Maxi => &MAXI,
    }
}

/// Whether a category name belongs to the upper (numeral) section.
pub fn is_upper_section(name: &str) -> bool {
    UPPER_SECTION.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn classic_has_thirteen_categories() {
        let rule = rule_for(GameMode::Classic);
        assert_eq!(rule.category_count(), 13);
        assert_eq!(rule.bonus_threshold, 63);
        assert_eq!(rule.bonus_award, 50);
        assert_eq!(rule.category_names[11], "Yahtzee");
    }

    #[test]
    fn maxi_has_sixteen_categories() {
        let rule = rule_for(GameMode::Maxi);
        assert_eq!(rule.category_count(), 16);
        assert_eq!(rule.bonus_threshold, 84);
        assert_eq!(rule.bonus_award, 100);
        assert_eq!(rule.category_names[14], "Maxi Yatzy (5 of a kind)");
    }

    #[test]
    fn upper_section_leads_every_mode() {
        for mode in GameMode::ALL {
            let rule = rule_for(mode);
            assert_eq!(&rule.category_names[..6], &UPPER_SECTION[..]);
            assert_eq!(rule.category_names.last(), Some(&"Chance"));
        }
    }

    #[test]
    fn category_names_are_unique() {
        for mode in GameMode::ALL {
            let names = rule_for(mode).category_names;
            let unique: HashSet<_> = names.iter().collect();
            assert_eq!(unique.len(), names.len());
        }
    }

    #[test]
    fn mode_parses_and_serializes_lowercase() {
        assert_eq!("Maxi".parse::<GameMode>(), Ok(GameMode::Maxi));
        assert_eq!(" classic ".parse::<GameMode>(), Ok(GameMode::Classic));
        assert!("poker".parse::<GameMode>().is_err());
        assert_eq!(serde_json::to_string(&GameMode::Maxi).unwrap(), r#""maxi""#);
        let mode: GameMode = serde_json::from_str(r#""classic""#).unwrap();
        assert_eq!(mode, GameMode::Classic);
    }
}
