//! Scoreboard core — rule catalog, state model, score derivation, and the
//! persistence gateway. State lives in WASM memory (thread_local) for the
//! lifetime of the page and is written through to storage on every change.

pub mod board;
pub mod persist;
pub mod rules;
pub mod scoring;
pub mod state;
