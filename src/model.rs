//! Data model and session state machine for the sound guessing game.
//!
//! The backend owns the real game state (scores, sound pool, round
//! progression). Everything here is either a snapshot of the last server
//! response or client-local screen state, reduced through a single entry
//! point so transitions can be tested without a document.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// Server-reported game phase. Wire names match the backend enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    #[default]
    Waiting,
    Playing,
    Guessing,
    BonusRound,
    Finished,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub score: u32,
}

/// Snapshot of the last server response. The client never mutates scores or
/// round progression itself; every transition is confirmed by a round-trip
/// before the UI advances.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub state: GamePhase,
    pub players: Vec<Player>,
    pub current_sound: Option<String>,
    pub bonus_round: bool,
}

/// Ephemeral claim captured when a player says they know the answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentGuess {
    pub player_name: String,
    /// Raw filename of the sound being guessed, as reported by the server.
    pub sound_name: Option<String>,
}

/// Which of the five mutually exclusive screens is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Playing,
    PlayerSelection,
    Winner,
    Bonus,
}

/// Visibility of the playback control buttons on the playing screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SoundControls {
    pub play: bool,
    pub replay: bool,
    pub stop: bool,
    pub skip: bool,
}

impl SoundControls {
    /// Between rounds: only the play button is offered.
    pub fn play_only() -> Self {
        Self {
            play: true,
            ..Self::default()
        }
    }

    /// While a sound is looping: replay, stop and skip.
    pub fn live() -> Self {
        Self {
            play: false,
            replay: true,
            stop: true,
            skip: true,
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }
}

// ---------------- Pure game rules -----------------

const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "ogg", "m4a"];

/// Players in descending score order; the sort is stable so ties keep their
/// original order.
pub fn sorted_by_score(players: &[Player]) -> Vec<Player> {
    let mut sorted = players.to_vec();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted
}

/// CSS marker for a scoreboard row; only the top three carry one.
pub fn place_marker(index: usize) -> Option<&'static str> {
    match index {
        0 => Some("first-place"),
        1 => Some("second-place"),
        2 => Some("third-place"),
        _ => None,
    }
}

/// Display name for a sound file: strip a known audio extension, turn
/// separators into spaces and title-case each word.
/// `car_horn-1.mp3` becomes `Car Horn 1`.
pub fn format_sound_name(filename: &str) -> String {
    let stem = match filename.rsplit_once('.') {
        Some((stem, ext)) if AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => stem,
        _ => filename,
    };
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// All players tied at the maximum score, joined for display.
/// Returns `None` for an empty player list.
pub fn winner_names(players: &[Player]) -> Option<String> {
    let max = players.iter().map(|p| p.score).max()?;
    let names: Vec<&str> = players
        .iter()
        .filter(|p| p.score == max)
        .map(|p| p.name.as_str())
        .collect();
    Some(names.join(" & "))
}

// ---------------- Session reducer & actions -----------------

/// Client-local session state, driven exclusively through [`SessionAction`].
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub screen: Screen,
    pub game: GameState,
    pub guess: Option<CurrentGuess>,
    pub guess_revealed: bool,
    /// Global status line shown under every screen.
    pub status: String,
    /// Prompt shown next to the playback controls.
    pub sound_hint: String,
    pub controls: SoundControls,
    /// Bumped whenever playback stops or the round advances. Delayed
    /// continuations and the auto-replay loop capture the epoch they were
    /// scheduled under and are ignored once it has moved on.
    pub round_epoch: u32,
    /// Single-flight guard: a backend transition is in flight, action
    /// buttons are disabled until it (and any trailing delay) completes.
    pub busy: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            screen: Screen::Welcome,
            game: GameState::default(),
            guess: None,
            guess_revealed: false,
            status: "Ready to play!".into(),
            sound_hint: String::new(),
            controls: SoundControls::hidden(),
            round_epoch: 0,
            busy: false,
        }
    }
}

#[derive(Clone, Debug)]
pub enum SessionAction {
    /// A backend call has been issued; block further user actions.
    TransitionStarted,
    /// The call failed; the UI stays on its prior state.
    TransitionFailed,
    /// Start response arrived with the seeded game state.
    Seeded { state: GameState },
    /// Play response carried a sound; playback has begun.
    SoundStarted { sound: String },
    /// Play response was empty: the pool is exhausted, end-of-game check
    /// follows shortly.
    SoundExhausted,
    Replayed,
    /// Stop acknowledged; move to player selection.
    StopAccepted,
    PlayerSelected { name: String },
    AnswerRevealed,
    /// Host confirmed the guess was right; overlay closes, point follows.
    CorrectConfirmed,
    /// Host confirmed the guess was wrong; overlay closes, skip follows.
    IncorrectConfirmed,
    /// Skip issued from the playing screen, nobody claimed the sound.
    SkipAnnounced,
    /// Guess response delivered the updated leaderboard.
    LeaderboardUpdated { players: Vec<Player>, scorer: String },
    /// Authoritative state re-fetched after a transition; pick the next
    /// screen from the reported phase.
    Routed { state: GameState },
    BonusStarted,
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SessionAction::*;
        let mut new = (*self).clone();
        match action {
            TransitionStarted => {
                new.busy = true;
            }
            TransitionFailed => {
                new.busy = false;
            }
            Seeded { state } => {
                new.game = state;
                new.guess = None;
                new.guess_revealed = false;
                new.screen = Screen::Playing;
                new.controls = SoundControls::play_only();
                new.status = "Game started! Press PLAY to hear the first sound.".into();
                new.sound_hint = "Press PLAY to start!".into();
                new.round_epoch += 1;
                new.busy = false;
            }
            SoundStarted { sound } => {
                new.game.current_sound = Some(sound);
                new.controls = SoundControls::live();
                new.status = "A sound is playing!".into();
                new.sound_hint = "Listen carefully...".into();
                new.busy = false;
            }
            SoundExhausted => {
                new.status = "No more sounds! Game ending...".into();
            }
            Replayed => {
                new.sound_hint = "Playing again...".into();
            }
            StopAccepted => {
                new.screen = Screen::PlayerSelection;
                new.controls = SoundControls::hidden();
                new.status = "Someone got it! Select the player.".into();
                new.round_epoch += 1;
                new.busy = false;
            }
            PlayerSelected { name } => {
                new.guess = Some(CurrentGuess {
                    player_name: name,
                    sound_name: new.game.current_sound.clone(),
                });
                new.guess_revealed = false;
            }
            AnswerRevealed => {
                new.guess_revealed = true;
            }
            CorrectConfirmed => {
                new.guess = None;
                new.guess_revealed = false;
            }
            IncorrectConfirmed => {
                new.guess = None;
                new.guess_revealed = false;
                new.status = "Incorrect guess! Moving to next sound...".into();
            }
            SkipAnnounced => {
                new.controls = SoundControls::hidden();
                new.status = "Nobody got it! Moving to next sound...".into();
                new.round_epoch += 1;
            }
            LeaderboardUpdated { players, scorer } => {
                new.game.players = players;
                new.status = format!("{scorer} scored a point!");
            }
            Routed { state } => {
                new.game = state;
                new.guess = None;
                new.guess_revealed = false;
                new.round_epoch += 1;
                new.busy = false;
                match new.game.state {
                    GamePhase::Finished => {
                        new.screen = Screen::Winner;
                        new.controls = SoundControls::hidden();
                        new.status = "Game Over!".into();
                    }
                    GamePhase::BonusRound => {
                        new.screen = Screen::Bonus;
                        new.controls = SoundControls::hidden();
                        new.status = "TIE GAME! Bonus round starting...".into();
                    }
                    _ => {
                        new.screen = Screen::Playing;
                        new.controls = SoundControls::play_only();
                        new.status = "Ready for next sound!".into();
                        new.sound_hint = "Press PLAY for next sound!".into();
                    }
                }
            }
            BonusStarted => {
                new.screen = Screen::Playing;
                new.controls = SoundControls::play_only();
                new.status = "Bonus round in progress!".into();
                new.sound_hint = "BONUS ROUND - Press PLAY!".into();
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(scores: &[(&str, u32)]) -> Vec<Player> {
        scores
            .iter()
            .map(|(name, score)| Player {
                name: (*name).into(),
                score: *score,
            })
            .collect()
    }

    fn reduce(state: SessionState, action: SessionAction) -> SessionState {
        (*Rc::new(state).reduce(action)).clone()
    }

    #[test]
    fn scoreboard_sorts_descending_with_stable_ties() {
        let sorted = sorted_by_score(&players(&[("Ana", 2), ("Bo", 5), ("Cy", 2), ("Dee", 7)]));
        let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Dee", "Bo", "Ana", "Cy"]);
    }

    #[test]
    fn only_top_three_carry_place_markers() {
        assert_eq!(place_marker(0), Some("first-place"));
        assert_eq!(place_marker(1), Some("second-place"));
        assert_eq!(place_marker(2), Some("third-place"));
        assert_eq!(place_marker(3), None);
    }

    #[test]
    fn sound_name_is_stripped_and_title_cased() {
        assert_eq!(format_sound_name("car_horn-1.mp3"), "Car Horn 1");
        assert_eq!(format_sound_name("ESPRESSO_MACHINE.WAV"), "Espresso Machine");
        assert_eq!(format_sound_name("doorbell"), "Doorbell");
        assert_eq!(format_sound_name("fire--alarm.ogg"), "Fire Alarm");
    }

    #[test]
    fn unknown_extension_is_kept_as_part_of_the_name() {
        assert_eq!(format_sound_name("clip.flac"), "Clip.flac");
    }

    #[test]
    fn winners_are_all_players_tied_at_the_maximum() {
        let names = winner_names(&players(&[("Ana", 5), ("Bo", 5), ("Cy", 3)]));
        assert_eq!(names.as_deref(), Some("Ana & Bo"));
    }

    #[test]
    fn single_top_score_yields_one_winner() {
        let names = winner_names(&players(&[("Ana", 4), ("Bo", 6), ("Cy", 3)]));
        assert_eq!(names.as_deref(), Some("Bo"));
    }

    #[test]
    fn no_players_means_no_winner() {
        assert_eq!(winner_names(&[]), None);
    }

    #[test]
    fn seeding_enters_the_playing_screen_with_play_only_controls() {
        let state = reduce(
            SessionState::default(),
            SessionAction::Seeded {
                state: GameState {
                    players: players(&[("Ana", 0), ("Bo", 0)]),
                    ..GameState::default()
                },
            },
        );
        assert_eq!(state.screen, Screen::Playing);
        assert_eq!(state.controls, SoundControls::play_only());
        assert!(!state.busy);
        assert_eq!(state.game.players.len(), 2);
    }

    #[test]
    fn stop_moves_to_player_selection_and_retires_the_playback_epoch() {
        let mut state = reduce(SessionState::default(), SessionAction::Seeded {
            state: GameState::default(),
        });
        state = reduce(state, SessionAction::SoundStarted {
            sound: "kettle.mp3".into(),
        });
        let epoch_while_playing = state.round_epoch;
        state = reduce(state, SessionAction::StopAccepted);
        assert_eq!(state.screen, Screen::PlayerSelection);
        assert_eq!(state.controls, SoundControls::hidden());
        // any replay scheduled under the old epoch must now be stale
        assert_ne!(state.round_epoch, epoch_while_playing);
    }

    #[test]
    fn selecting_a_player_captures_the_current_sound_unrevealed() {
        let mut state = reduce(SessionState::default(), SessionAction::SoundStarted {
            sound: "kettle.mp3".into(),
        });
        state = reduce(state, SessionAction::PlayerSelected { name: "Ana".into() });
        let guess = state.guess.as_ref().expect("guess captured");
        assert_eq!(guess.player_name, "Ana");
        assert_eq!(guess.sound_name.as_deref(), Some("kettle.mp3"));
        assert!(!state.guess_revealed);
        state = reduce(state, SessionAction::AnswerRevealed);
        assert!(state.guess_revealed);
    }

    #[test]
    fn incorrect_guess_closes_the_overlay_and_routes_back_to_playing() {
        let mut state = reduce(SessionState::default(), SessionAction::StopAccepted);
        state = reduce(state, SessionAction::PlayerSelected { name: "Bo".into() });
        state = reduce(state, SessionAction::AnswerRevealed);
        state = reduce(state, SessionAction::TransitionStarted);
        state = reduce(state, SessionAction::IncorrectConfirmed);
        assert_eq!(state.guess, None);
        assert!(!state.guess_revealed);
        state = reduce(state, SessionAction::Routed {
            state: GameState::default(),
        });
        assert_eq!(state.screen, Screen::Playing);
        assert!(state.controls.play);
        assert!(!state.busy);
        assert_eq!(state.guess, None);
    }

    #[test]
    fn routing_follows_the_reported_phase() {
        let finished = reduce(SessionState::default(), SessionAction::Routed {
            state: GameState {
                state: GamePhase::Finished,
                players: players(&[("Ana", 5), ("Bo", 5), ("Cy", 3)]),
                ..GameState::default()
            },
        });
        assert_eq!(finished.screen, Screen::Winner);

        let bonus = reduce(SessionState::default(), SessionAction::Routed {
            state: GameState {
                state: GamePhase::BonusRound,
                bonus_round: true,
                ..GameState::default()
            },
        });
        assert_eq!(bonus.screen, Screen::Bonus);

        let waiting = reduce(SessionState::default(), SessionAction::Routed {
            state: GameState::default(),
        });
        assert_eq!(waiting.screen, Screen::Playing);
        assert_eq!(waiting.controls, SoundControls::play_only());
    }

    #[test]
    fn every_route_and_skip_advances_the_epoch() {
        let base = SessionState::default();
        let epoch = base.round_epoch;
        assert_eq!(
            reduce(base.clone(), SessionAction::SkipAnnounced).round_epoch,
            epoch + 1
        );
        assert_eq!(
            reduce(base.clone(), SessionAction::Routed {
                state: GameState::default()
            })
            .round_epoch,
            epoch + 1
        );
        // a sound starting does not retire its own epoch
        assert_eq!(
            reduce(base, SessionAction::SoundStarted {
                sound: "kettle.mp3".into()
            })
            .round_epoch,
            epoch
        );
    }

    #[test]
    fn leaderboard_update_replaces_players_and_credits_the_scorer() {
        let state = reduce(SessionState::default(), SessionAction::LeaderboardUpdated {
            players: players(&[("Ana", 1)]),
            scorer: "Ana".into(),
        });
        assert_eq!(state.game.players, players(&[("Ana", 1)]));
        assert_eq!(state.status, "Ana scored a point!");
    }

    #[test]
    fn bonus_start_returns_to_the_playing_screen() {
        let state = reduce(SessionState::default(), SessionAction::BonusStarted);
        assert_eq!(state.screen, Screen::Playing);
        assert_eq!(state.controls, SoundControls::play_only());
    }
}
