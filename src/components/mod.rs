mod app;
mod bonus;
mod player_select;
mod playing;
mod scoreboard;
mod welcome;
mod winner;

pub use app::App;
