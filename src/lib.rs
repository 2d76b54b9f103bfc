//! Yahtzee / Maxi Yatzy scoreboard, compiled to WASM and run in the browser.
//!
//! Exports `handle_request(method, path, query, body)` for the page's HTMX
//! bridge to call. Uses `matchit` for URL routing — the same router engine
//! that powers Axum. Responses are HTML fragments, except the JSON state
//! export.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod routes;

/// Process an HTTP-like request and return an HTML fragment.
///
/// Called from JavaScript via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method ("GET" or "POST")
/// * `path`   — URL path (e.g., "/api/scoreboard/score")
/// * `query`  — Query string, may be empty
/// * `body`   — Request body (form data, or JSON for import). Empty for GET.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/scoreboard", "board").ok();
    router.insert("/api/scoreboard/score", "score").ok();
    router.insert("/api/scoreboard/player", "player").ok();
    router.insert("/api/scoreboard/mode", "mode").ok();
    router.insert("/api/scoreboard/reset", "reset").ok();
    router.insert("/api/scoreboard/state", "state").ok();
    router.insert("/api/scoreboard/import", "import").ok();
    router.insert("/api/scoreboard/restore", "restore").ok();
    router.insert("/api/scoreboard/export", "export").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("board", "GET") => routes::scoreboard::handle_board_get(query),
            ("state", "GET") => routes::scoreboard::handle_state_get(query),
            ("export", "GET") => routes::scoreboard::handle_export_get(query),

            ("score", "POST") => routes::scoreboard::handle_score_post(body),
            ("player", "POST") => routes::scoreboard::handle_player_post(body),
            ("mode", "POST") => routes::scoreboard::handle_mode_post(body),
            ("reset", "POST") => routes::scoreboard::handle_reset_post(body),
            ("import", "POST") => routes::scoreboard::handle_import_post(body),
            ("restore", "POST") => routes::scoreboard::handle_restore_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

/// Apply host configuration (JSON, see `ScoreboardConfig`) and reload the
/// scoreboard from the configured storage keys. Returns "ok" or an error line.
#[wasm_bindgen]
pub fn configure(json: &str) -> String {
    match config::ScoreboardConfig::from_json(json) {
        Ok(cfg) => {
            config::set_config(cfg);
            game::persist::restore_session();
            "ok".to_string()
        }
        Err(e) => format!("error: {}", e),
    }
}

fn not_found() -> String {
    r#"<span class="text-red-600">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-600">405 — method not allowed</span>"#.to_string()
}
