//! `/api/scoreboard/*` routes — commands against the session scoreboard.
//!
//! Every successful mutation is written through to storage before the
//! re-rendered board is returned.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tracing::{debug, info, warn};

use crate::error::ScoreboardError;
use crate::game::rules::GameMode;
use crate::game::{board, persist, state};
use crate::routes::util::{error_fragment, get_param, parse_form_body};

/// Persist, then render. Shared tail of every mutating handler.
fn commit() -> String {
    persist::persist_session();
    board::render_board()
}

fn rejected(err: ScoreboardError) -> String {
    warn!(error = %err, "scoreboard command rejected");
    error_fragment(&err.to_string())
}

// ── GET /api/scoreboard ────────────────────────────────────────────

/// Handle GET /api/scoreboard
/// Returns the full scoreboard fragment.
pub fn handle_board_get(_query: &str) -> String {
    board::render_board()
}

// ── POST /api/scoreboard/score ─────────────────────────────────────

/// Handle POST /api/scoreboard/score
/// Body: category={index}&player={id}&value={raw}
/// `value` is parsed leniently (empty or non-numeric → 0).
pub fn handle_score_post(body: &str) -> String {
    let params = parse_form_body(body);
    let category: usize = match get_param(&params, "category").and_then(|s| s.parse().ok()) {
        Some(c) => c,
        None => return error_fragment("Missing or invalid category parameter"),
    };
    let player = match get_param(&params, "player") {
        Some(p) if !p.is_empty() => p,
        _ => return error_fragment("Missing player parameter"),
    };
    let raw = get_param(&params, "value").unwrap_or("");

    match state::with_state_mut(|s| s.set_score(category, player, raw)) {
        Ok(score) => {
            debug!(category, player, score, "score set");
            commit()
        }
        Err(e) => rejected(e),
    }
}

// ── POST /api/scoreboard/player ────────────────────────────────────

/// Handle POST /api/scoreboard/player
/// Body params:
///   - action=add                          → append a new player
///   - action=remove&player={id}           → remove a player (never the last)
///   - action=rename&player={id}&name={..} → change a display name
pub fn handle_player_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");
    let player = get_param(&params, "player").unwrap_or("");

    let result = match action {
        "add" => {
            let id = state::with_state_mut(|s| s.add_player());
            debug!(player = %id, "player added");
            Ok(())
        }
        "remove" if !player.is_empty() => {
            state::with_state_mut(|s| s.remove_player(player)).map(|removed| {
                if !removed {
                    debug!(player, "refusing to remove the last player");
                }
            })
        }
        "rename" if !player.is_empty() => {
            let name = get_param(&params, "name").unwrap_or("");
            state::with_state_mut(|s| s.rename_player(player, name))
        }
        "remove" | "rename" => return error_fragment("Missing player parameter"),
        _ => return error_fragment("Unknown player action"),
    };

    match result {
        Ok(()) => commit(),
        Err(e) => rejected(e),
    }
}

// ── POST /api/scoreboard/mode ──────────────────────────────────────

/// Handle POST /api/scoreboard/mode
/// Body: mode=classic|maxi
/// Switching to a different mode discards every entered score.
pub fn handle_mode_post(body: &str) -> String {
    let params = parse_form_body(body);
    let mode: GameMode = match get_param(&params, "mode").map(|m| m.parse::<GameMode>()) {
        Some(Ok(m)) => m,
        Some(Err(e)) => return error_fragment(&e),
        None => return error_fragment("Missing mode parameter"),
    };
    if state::with_state_mut(|s| s.switch_mode(mode)) {
        info!(%mode, "game mode switched, scores reset");
    }
    commit()
}

// ── POST /api/scoreboard/reset ─────────────────────────────────────

/// Handle POST /api/scoreboard/reset
/// Starts a new game: zeroes every score, keeps roster and mode.
pub fn handle_reset_post(_body: &str) -> String {
    state::with_state_mut(|s| s.reset_scores());
    info!("scores reset for a new game");
    commit()
}

// ── GET /api/scoreboard/state ──────────────────────────────────────

/// Handle GET /api/scoreboard/state
/// Returns the whole scoreboard as JSON.
pub fn handle_state_get(_query: &str) -> String {
    state::export_state_json()
}

// ── POST /api/scoreboard/import ────────────────────────────────────

/// Handle POST /api/scoreboard/import
/// Body: scoreboard JSON as produced by GET /api/scoreboard/state.
/// Inconsistent data is reconciled rather than rejected.
pub fn handle_import_post(body: &str) -> String {
    match state::import_state_json(body.trim()) {
        Ok(()) => {
            persist::persist_session();
            r#"<span class="text-emerald-600">Scoreboard imported successfully</span>"#.to_string()
        }
        Err(e) => error_fragment(&format!("Import failed: {}", e)),
    }
}

// ── POST /api/scoreboard/restore ───────────────────────────────────

/// Handle POST /api/scoreboard/restore
/// Reloads the scoreboard from storage (called once on page load).
pub fn handle_restore_post(_body: &str) -> String {
    persist::restore_session();
    board::render_board()
}

// ── GET /api/scoreboard/export ─────────────────────────────────────

/// Handle GET /api/scoreboard/export
/// Returns a <script> tag that downloads the scoreboard JSON as a file.
/// The JSON travels base64-encoded so it needs no escaping inside the script.
pub fn handle_export_get(_query: &str) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(state::export_state_json());
    format!(
        r#"<script>
(function() {{
  var s = '{encoded}'.replace(/-/g, '+').replace(/_/g, '/');
  var json = decodeURIComponent(escape(atob(s + '==='.slice((s.length + 3) % 4))));
  var b = new Blob([json], {{type: 'application/json'}});
  var a = document.createElement('a');
  a.href = URL.createObjectURL(b);
  a.download = 'yahtzee-scoreboard.json';
  a.click();
  URL.revokeObjectURL(a.href);
}})();
</script>"#,
        encoded = encoded
    )
}
