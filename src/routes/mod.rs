pub mod scoreboard;
pub mod util;
