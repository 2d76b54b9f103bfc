//! Scoreboard state — roster, per-category score matrix and active mode.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The module stays alive for the page session, so state persists across
//! `handle_request` calls; the persistence gateway mirrors it to storage.
//!
//! Every category's `scores` map holds exactly one entry per registered player.
//! All mutations below preserve that, and `from_parts` restores it for data
//! coming from outside (storage, imports).

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::ScoreboardError;
use crate::game::rules::{rule_for, GameMode};

const INITIAL_PLAYER_ID: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Opaque, unique and stable for the player's lifetime.
    pub id: String,
    pub name: String,
}

/// One scoring line: a raw score per player, keyed by player id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCategory {
    pub name: String,
    pub scores: BTreeMap<String, i32>,
}

impl ScoreCategory {
    fn zeroed(name: &str, players: &[Player]) -> Self {
        Self {
            name: name.to_string(),
            scores: players.iter().map(|p| (p.id.clone(), 0)).collect(),
        }
    }

    /// Score for a player; absent entries count as 0.
    pub fn score(&self, player_id: &str) -> i32 {
        self.scores.get(player_id).copied().unwrap_or(0)
    }
}

/// Unchecked shape used for deserialization; converted through `from_parts`.
#[derive(Deserialize)]
struct StateParts {
    #[serde(default)]
    game_mode: GameMode,
    #[serde(default)]
    players: Vec<Player>,
    #[serde(default)]
    categories: Option<Vec<ScoreCategory>>,
}

impl From<StateParts> for ScoreboardState {
    fn from(parts: StateParts) -> Self {
        ScoreboardState::from_parts(parts.game_mode, parts.players, parts.categories)
    }
}

/// Complete scoreboard: everything needed to render the table and to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StateParts")]
pub struct ScoreboardState {
    game_mode: GameMode,
    players: Vec<Player>,
    categories: Vec<ScoreCategory>,
    /// Next id `add_player` hands out. Only ever increases within a session,
    /// so a removed player's id is never reissued.
    #[serde(skip)]
    next_id: u64,
}

impl Default for ScoreboardState {
    fn default() -> Self {
        Self::initialize(GameMode::default())
    }
}

impl ScoreboardState {
    /// One player named "Player 1", every category of `mode` at zero.
    pub fn initialize(mode: GameMode) -> Self {
        let players = vec![Player {
            id: INITIAL_PLAYER_ID.to_string(),
            name: "Player 1".to_string(),
        }];
        let categories = build_categories(mode, &players);
        let next_id = first_free_id(&players);
        Self {
            game_mode: mode,
            players,
            categories,
            next_id,
        }
    }

    /// Assemble a state from loosely-trusted parts, repairing anything that
    /// breaks the roster/score invariant.
    ///
    /// - an empty roster becomes the default single player
    /// - duplicate player ids keep their first occurrence
    /// - missing categories, or categories that do not match `mode`'s list
    ///   name-for-name, are rebuilt with zeros
    /// - score keys are reconciled to the roster (missing → 0, strays dropped)
    pub fn from_parts(
        mode: GameMode,
        players: Vec<Player>,
        categories: Option<Vec<ScoreCategory>>,
    ) -> Self {
        let mut seen = BTreeSet::new();
        let mut players: Vec<Player> = players
            .into_iter()
            .filter(|p| seen.insert(p.id.clone()))
            .collect();
        if players.is_empty() {
            players = Self::initialize(mode).players;
        }

        let names = rule_for(mode).category_names;
        let categories = match categories {
            Some(cats)
                if cats.len() == names.len()
                    && cats.iter().zip(names.iter()).all(|(c, n)| c.name == *n) =>
            {
                cats.into_iter()
                    .map(|c| ScoreCategory {
                        scores: players
                            .iter()
                            .map(|p| (p.id.clone(), c.score(&p.id)))
                            .collect(),
                        name: c.name,
                    })
                    .collect()
            }
            _ => build_categories(mode, &players),
        };

        let next_id = first_free_id(&players);
        Self {
            game_mode: mode,
            players,
            categories,
            next_id,
        }
    }

    pub fn game_mode(&self) -> GameMode {
        self.game_mode
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn categories(&self) -> &[ScoreCategory] {
        &self.categories
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Parse `raw_input` and store it for the category/player pair.
    /// Returns the stored score.
    pub fn set_score(
        &mut self,
        category_index: usize,
        player_id: &str,
        raw_input: &str,
    ) -> Result<i32, ScoreboardError> {
        if self.player(player_id).is_none() {
            return Err(ScoreboardError::UnknownPlayer(player_id.to_string()));
        }
        let category = self
            .categories
            .get_mut(category_index)
            .ok_or(ScoreboardError::UnknownCategory(category_index))?;
        let score = parse_score(raw_input);
        category.scores.insert(player_id.to_string(), score);
        Ok(score)
    }

    /// Append a new player named `Player <N>` (N = new roster size) with a zero
    /// score in every category. Returns the new player's id.
    pub fn add_player(&mut self) -> String {
        let id = self.next_player_id();
        let name = format!("Player {}", self.players.len() + 1);
        for category in &mut self.categories {
            category.scores.insert(id.clone(), 0);
        }
        self.players.push(Player {
            id: id.clone(),
            name,
        });
        id
    }

    /// Remove a player and their scores. Removing the only remaining player is
    /// a no-op; returns whether anything was removed.
    pub fn remove_player(&mut self, player_id: &str) -> Result<bool, ScoreboardError> {
        if self.players.len() <= 1 {
            return Ok(false);
        }
        let index = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| ScoreboardError::UnknownPlayer(player_id.to_string()))?;
        self.players.remove(index);
        for category in &mut self.categories {
            category.scores.remove(player_id);
        }
        debug_assert!(self.is_consistent());
        Ok(true)
    }

    pub fn rename_player(&mut self, player_id: &str, new_name: &str) -> Result<(), ScoreboardError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| ScoreboardError::UnknownPlayer(player_id.to_string()))?;
        player.name = new_name.to_string();
        Ok(())
    }

    /// Switch rulesets. Categories are rebuilt from scratch for the current
    /// roster, so every previously entered score is discarded. Switching to
    /// the active mode changes nothing. Returns whether the mode changed.
    pub fn switch_mode(&mut self, new_mode: GameMode) -> bool {
        if new_mode == self.game_mode {
            return false;
        }
        self.game_mode = new_mode;
        self.categories = build_categories(new_mode, &self.players);
        true
    }

    /// Zero every score, keeping roster and mode.
    pub fn reset_scores(&mut self) {
        for category in &mut self.categories {
            for score in category.scores.values_mut() {
                *score = 0;
            }
        }
    }

    /// True when every category has exactly one score per registered player.
    pub fn is_consistent(&self) -> bool {
        let roster: BTreeSet<&str> = self.players.iter().map(|p| p.id.as_str()).collect();
        roster.len() == self.players.len()
            && self.categories.iter().all(|c| {
                c.scores.len() == roster.len()
                    && c.scores.keys().all(|k| roster.contains(k.as_str()))
            })
    }

    fn next_player_id(&mut self) -> String {
        let mut next = self.next_id.max(1);
        while self.player(&next.to_string()).is_some() {
            next = next.saturating_add(1);
        }
        self.next_id = next.saturating_add(1);
        next.to_string()
    }
}

/// One past the largest numeric id on the roster.
fn first_free_id(players: &[Player]) -> u64 {
    players
        .iter()
        .filter_map(|p| p.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

fn build_categories(mode: GameMode, players: &[Player]) -> Vec<ScoreCategory> {
    rule_for(mode)
        .category_names
        .iter()
        .map(|name| ScoreCategory::zeroed(name, players))
        .collect()
}

/// Turn raw user input into a score. Empty or unparseable input is 0; leading
/// zeros are stripped first, so "007" is 7.
pub fn parse_score(raw_input: &str) -> i32 {
    let trimmed = raw_input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return 0;
    }
    let magnitude = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    magnitude.parse().unwrap_or(0)
}

thread_local! {
    static STATE: RefCell<ScoreboardState> = RefCell::new(ScoreboardState::default());
}

/// Execute a closure with read access to the scoreboard.
pub fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&ScoreboardState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the scoreboard.
pub fn with_state_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut ScoreboardState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the entire scoreboard (used by restore and import).
pub fn replace_state(new_state: ScoreboardState) {
    STATE.with(|s| {
        *s.borrow_mut() = new_state;
    });
}

/// Export the entire scoreboard as JSON.
pub fn export_state_json() -> String {
    with_state(|state| serde_json::to_string(state).unwrap_or_else(|_| "{}".to_string()))
}

/// Import a scoreboard from JSON, reconciling it to a consistent state.
pub fn import_state_json(json: &str) -> Result<(), String> {
    let new_state: ScoreboardState =
        serde_json::from_str(json).map_err(|e| format!("Invalid scoreboard JSON: {}", e))?;
    replace_state(new_state);
    Ok(())
}
