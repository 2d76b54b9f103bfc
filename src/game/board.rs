//! Scoreboard table rendering.
//!
//! Produces the HTML fragment HTMX swaps into `#scoreboard`: mode picker,
//! roster controls, one row per category, then the bonus and total rows.
//! Every control posts back to `/api/scoreboard/*` and receives the whole
//! board again, so the fragment is always rendered from authoritative state.

use serde_json::json;

use crate::game::rules::{rule_for, GameMode};
use crate::game::scoring;
use crate::game::state::{self, ScoreboardState};
use crate::routes::util::escape_html;

const CELL: &str = "border border-gray-300 dark:border-gray-600 px-4 py-2";

/// Render the session scoreboard.
pub fn render_board() -> String {
    state::with_state(render)
}

/// Render a specific scoreboard state.
pub fn render(board: &ScoreboardState) -> String {
    let rule = rule_for(board.game_mode());
    let standings = scoring::standings(board);
    let mut html = String::with_capacity(8192);

    html.push_str(
        r#"<div id="scoreboard" class="flex min-h-screen flex-col p-16 md:items-center md:p-24">"#,
    );
    html.push_str(&format!(
        r#"<h1 class="mb-8 text-4xl font-extrabold leading-none tracking-tight md:text-5xl lg:text-6xl">{}</h1>"#,
        rule.title
    ));

    render_mode_picker(&mut html, board.game_mode());
    render_roster(&mut html, board);

    html.push_str(r#"<table class="border-collapse border border-gray-300 dark:border-gray-600">"#);

    // Header
    html.push_str(&format!(
        r#"<thead><tr><th class="{} text-left">Category</th>"#,
        CELL
    ));
    for player in board.players() {
        html.push_str(&format!(
            r#"<th class="{} text-center">{}</th>"#,
            CELL,
            escape_html(&player.name)
        ));
    }
    html.push_str("</tr></thead><tbody>");

    // Category rows
    for (index, category) in board.categories().iter().enumerate() {
        html.push_str(&format!(
            r#"<tr><td class="{} font-medium">{}</td>"#,
            CELL,
            escape_html(&category.name)
        ));
        for player in board.players() {
            let vals = json!({ "category": index.to_string(), "player": player.id });
            html.push_str(&format!(
                r#"<td class="{}"><input type="number" inputmode="numeric" name="value" value="{}" hx-post="/api/scoreboard/score" hx-trigger="change" hx-vals="{}" hx-target='#scoreboard' hx-swap="outerHTML" class="w-16 bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg block mx-auto p-2.5"></td>"#,
                CELL,
                category.score(&player.id),
                escape_html(&vals.to_string())
            ));
        }
        html.push_str("</tr>");
    }

    // Bonus row
    html.push_str(&format!(
        r#"<tr class="bg-gray-100 dark:bg-gray-800"><td class="{} font-medium">Bonus (if upper &#8805; {})</td>"#,
        CELL, rule.bonus_threshold
    ));
    for standing in &standings {
        html.push_str(&format!(
            r#"<td class="{} text-center">{}</td>"#,
            CELL, standing.bonus
        ));
    }
    html.push_str("</tr>");

    // Total row
    html.push_str(&format!(
        r#"<tr class="bg-gray-200 dark:bg-gray-700 font-bold"><td class="{}">Total Score</td>"#,
        CELL
    ));
    for standing in &standings {
        html.push_str(&format!(
            r#"<td class="{} text-center">{}</td>"#,
            CELL, standing.total
        ));
    }
    html.push_str("</tr></tbody></table>");

    html.push_str("</div>"); // close #scoreboard
    html
}

fn render_mode_picker(html: &mut String, active: GameMode) {
    html.push_str(r#"<div class="mb-4 flex gap-2">"#);
    for mode in GameMode::ALL {
        let label = match mode {
            GameMode::Classic => "Yahtzee",
            GameMode::Maxi => "Maxi Yatzy",
        };
        if mode == active {
            html.push_str(&format!(
                r#"<button disabled class="px-4 py-2 rounded-lg bg-blue-500 text-white">{}</button>"#,
                label
            ));
        } else {
            // Switching discards every score, so ask first.
            html.push_str(&format!(
                r#"<button hx-post="/api/scoreboard/mode" hx-vals='{{"mode":"{}"}}' hx-confirm="Switching to {} clears all scores." hx-target='#scoreboard' hx-swap="outerHTML" class="px-4 py-2 rounded-lg bg-gray-200 hover:bg-gray-300">{}</button>"#,
                mode, label, label
            ));
        }
    }
    html.push_str(
        r#"<button hx-post="/api/scoreboard/reset" hx-confirm="Start a new game? All scores are cleared." hx-target='#scoreboard' hx-swap="outerHTML" class="px-4 py-2 rounded-lg bg-amber-100 hover:bg-amber-200">New Game</button>"#,
    );
    html.push_str("</div>");
}

fn render_roster(html: &mut String, board: &ScoreboardState) {
    let removable = board.players().len() > 1;

    html.push_str(r#"<div class="mb-6 flex flex-wrap gap-4 items-center">"#);
    html.push_str(
        r#"<button hx-post="/api/scoreboard/player" hx-vals='{"action":"add"}' hx-target='#scoreboard' hx-swap="outerHTML" class="px-4 py-2 bg-blue-500 text-white rounded-lg hover:bg-blue-600 focus:ring-2 focus:ring-blue-500">Add Player</button>"#,
    );
    for player in board.players() {
        let rename = json!({ "action": "rename", "player": player.id });
        html.push_str(r#"<div class="flex items-center gap-2">"#);
        html.push_str(&format!(
            r#"<input type="text" name="name" value="{}" hx-post="/api/scoreboard/player" hx-trigger="change" hx-vals="{}" hx-target='#scoreboard' hx-swap="outerHTML" class="px-2 py-1 border border-gray-300 rounded text-sm">"#,
            escape_html(&player.name),
            escape_html(&rename.to_string())
        ));
        if removable {
            let remove = json!({ "action": "remove", "player": player.id });
            html.push_str(&format!(
                r#"<button hx-post="/api/scoreboard/player" hx-vals="{}" hx-target='#scoreboard' hx-swap="outerHTML" class="px-2 py-1 bg-red-500 text-white rounded text-sm hover:bg-red-600" aria-label="Remove player">&#x2715;</button>"#,
                escape_html(&remove.to_string())
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
}
