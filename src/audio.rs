//! Audio playback: one element for game sounds, one for jingles.
//!
//! The game sound loops with a fixed pause after each natural end. The loop
//! holds a [`PlaybackToken`] captured when playback started; once the
//! session's round epoch moves on, the token is stale and a late-firing
//! timer does nothing.

use gloo_console::{error, warn};
use gloo_timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::api::API_BASE;

/// Pause between natural end and replay of the current sound.
pub const REPLAY_PAUSE_MS: u32 = 2_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Jingle {
    Win,
    Lose,
}

impl Jingle {
    pub fn as_str(self) -> &'static str {
        match self {
            Jingle::Win => "win",
            Jingle::Lose => "lose",
        }
    }
}

/// Epoch captured by a scheduled replay or continuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackToken(u32);

/// Shared view of the live round epoch. The app syncs it after every
/// reduction; timers compare their captured token against it before acting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackGuard {
    live: Rc<Cell<u32>>,
}

impl PlaybackGuard {
    pub fn sync(&self, epoch: u32) {
        self.live.set(epoch);
    }

    pub fn token(&self) -> PlaybackToken {
        PlaybackToken(self.live.get())
    }

    pub fn is_live(&self, token: PlaybackToken) -> bool {
        self.live.get() == token.0
    }
}

pub struct AudioKit {
    game: HtmlAudioElement,
    jingle: HtmlAudioElement,
    onended: RefCell<Option<Closure<dyn FnMut()>>>,
    replay_timer: Rc<RefCell<Option<Timeout>>>,
}

impl AudioKit {
    pub fn new() -> Self {
        Self {
            game: HtmlAudioElement::new().expect("audio element"),
            jingle: HtmlAudioElement::new().expect("audio element"),
            onended: RefCell::new(None),
            replay_timer: Rc::new(RefCell::new(None)),
        }
    }

    /// Start playback and install the auto-replay loop. The loop re-fires
    /// after [`REPLAY_PAUSE_MS`] only while `guard` still reports the token
    /// captured here as live.
    pub fn play_looping(&self, url: &str, guard: &PlaybackGuard) {
        let token = guard.token();
        self.game.set_src(url);
        fire(&self.game);

        let closure = {
            let game = self.game.clone();
            let guard = guard.clone();
            let replay_timer = self.replay_timer.clone();
            Closure::wrap(Box::new(move || {
                if !guard.is_live(token) {
                    return;
                }
                let game = game.clone();
                let guard = guard.clone();
                // dropping the previous Timeout cancels it
                *replay_timer.borrow_mut() = Some(Timeout::new(REPLAY_PAUSE_MS, move || {
                    if guard.is_live(token) {
                        fire(&game);
                    }
                }));
            }) as Box<dyn FnMut()>)
        };
        self.game.set_onended(Some(closure.as_ref().unchecked_ref()));
        *self.onended.borrow_mut() = Some(closure);
    }

    /// Restart the current sound from the beginning.
    pub fn replay(&self) {
        if !self.game.src().is_empty() {
            self.game.set_current_time(0.0);
            fire(&self.game);
        }
    }

    /// Halt playback and dismantle the replay loop.
    pub fn stop(&self) {
        self.game.set_onended(None);
        self.onended.borrow_mut().take();
        self.replay_timer.borrow_mut().take();
        if self.game.pause().is_err() {
            warn!("failed to pause game audio");
        }
    }

    pub fn play_jingle(&self, jingle: Jingle) {
        self.jingle
            .set_src(&format!("{API_BASE}/jingle/{}", jingle.as_str()));
        fire(&self.jingle);
    }
}

/// Kick off playback; rejections (autoplay policy, missing clip) are logged,
/// never surfaced.
fn fire(el: &HtmlAudioElement) {
    match el.play() {
        Ok(promise) => {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    warn!("audio playback rejected", err);
                }
            });
        }
        Err(err) => error!("audio play failed", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_live_until_the_epoch_moves_on() {
        let guard = PlaybackGuard::default();
        guard.sync(3);
        let token = guard.token();
        assert!(guard.is_live(token));
        guard.sync(4);
        assert!(!guard.is_live(token));
    }

    #[test]
    fn a_token_from_a_superseded_round_never_revives() {
        let guard = PlaybackGuard::default();
        guard.sync(1);
        let stale = guard.token();
        guard.sync(2);
        guard.sync(3);
        assert!(!guard.is_live(stale));
        assert!(guard.is_live(guard.token()));
    }
}
