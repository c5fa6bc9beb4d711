use gloo_console::error;
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::bonus::BonusScreen;
use super::player_select::PlayerSelectionScreen;
use super::playing::PlayingScreen;
use super::welcome::WelcomeScreen;
use super::winner::WinnerScreen;
use crate::api::{ApiError, BrandingConfig, GameApi};
use crate::audio::{AudioKit, Jingle, PlaybackGuard};
use crate::model::{GamePhase, Screen, SessionAction, SessionState};

/// Delay after a skip or incorrect guess, so the lose jingle can finish
/// before the next screen appears.
const JINGLE_DELAY_MS: u32 = 2_000;
/// Delay before the end-of-game check when the sound pool runs dry.
const EXHAUSTED_DELAY_MS: u32 = 1_000;

/// Re-fetch authoritative state and pick the next screen from the reported
/// phase. Every transition funnels through here, so the UI never advances
/// on a guess of what the server did.
async fn refresh_and_route(session: UseReducerHandle<SessionState>, audio: Rc<RefCell<AudioKit>>) {
    match GameApi.state().await {
        Ok(state) => {
            if state.state == GamePhase::Finished {
                audio.borrow().play_jingle(Jingle::Win);
            }
            session.dispatch(SessionAction::Routed { state });
        }
        Err(err) => report_failure("state refresh", &err, &session),
    }
}

fn report_failure(what: &str, err: &ApiError, session: &UseReducerHandle<SessionState>) {
    error!(format!("{what} failed: {err}"));
    session.dispatch(SessionAction::TransitionFailed);
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(SessionState::default);
    let audio = use_mut_ref(AudioKit::new);
    let guard = use_memo((), |_| PlaybackGuard::default());
    let branding = use_state(BrandingConfig::default);

    // Keep the playback guard in step with the reducer's round epoch, so
    // replay timers scheduled under an older epoch go stale.
    {
        let guard = guard.clone();
        use_effect_with(session.round_epoch, move |epoch| {
            guard.sync(*epoch);
            || ()
        });
    }

    // Branding is cosmetic: a failed load is logged and the defaults stand.
    {
        let branding = branding.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match GameApi.config().await {
                    Ok(cfg) => {
                        if let Some(name) = cfg.company_name.as_deref() {
                            if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                                doc.set_title(&format!("{name} Sounds"));
                            }
                        }
                        branding.set(cfg);
                    }
                    Err(err) => error!(format!("failed to load config: {err}")),
                }
            });
            || ()
        });
    }

    // Welcome -> Playing, also re-entered by "play again" on the winner
    // screen. The server reseeds scores and the sound pool.
    let on_start = {
        let session = session.clone();
        let audio = audio.clone();
        Callback::from(move |_: MouseEvent| {
            if session.busy {
                return;
            }
            session.dispatch(SessionAction::TransitionStarted);
            let session = session.clone();
            let audio = audio.clone();
            spawn_local(async move {
                audio.borrow().stop();
                match GameApi.start().await {
                    Ok(resp) => session.dispatch(SessionAction::Seeded { state: resp.state }),
                    Err(err) => report_failure("start", &err, &session),
                }
            });
        })
    };

    let on_play = {
        let session = session.clone();
        let audio = audio.clone();
        let guard = guard.clone();
        Callback::from(move |_: MouseEvent| {
            if session.busy {
                return;
            }
            session.dispatch(SessionAction::TransitionStarted);
            let session = session.clone();
            let audio = audio.clone();
            let guard = guard.clone();
            spawn_local(async move {
                match GameApi.play().await {
                    Ok(resp) => match (resp.sound, resp.sound_url) {
                        (Some(sound), Some(url)) => {
                            audio.borrow().play_looping(&url, &guard);
                            session.dispatch(SessionAction::SoundStarted { sound });
                        }
                        _ => {
                            session.dispatch(SessionAction::SoundExhausted);
                            TimeoutFuture::new(EXHAUSTED_DELAY_MS).await;
                            refresh_and_route(session, audio).await;
                        }
                    },
                    Err(err) => report_failure("play", &err, &session),
                }
            });
        })
    };

    // Replay is local playback only; no backend call, no busy gate.
    let on_replay = {
        let session = session.clone();
        let audio = audio.clone();
        Callback::from(move |_: MouseEvent| {
            audio.borrow().replay();
            session.dispatch(SessionAction::Replayed);
        })
    };

    let on_stop = {
        let session = session.clone();
        let audio = audio.clone();
        Callback::from(move |_: MouseEvent| {
            if session.busy {
                return;
            }
            session.dispatch(SessionAction::TransitionStarted);
            let session = session.clone();
            let audio = audio.clone();
            spawn_local(async move {
                match GameApi.stop().await {
                    Ok(()) => {
                        audio.borrow().stop();
                        session.dispatch(SessionAction::StopAccepted);
                    }
                    Err(err) => report_failure("stop", &err, &session),
                }
            });
        })
    };

    let on_skip = {
        let session = session.clone();
        let audio = audio.clone();
        Callback::from(move |_: MouseEvent| {
            if session.busy {
                return;
            }
            session.dispatch(SessionAction::TransitionStarted);
            let session = session.clone();
            let audio = audio.clone();
            spawn_local(async move {
                match GameApi.skip().await {
                    Ok(()) => {
                        audio.borrow().stop();
                        audio.borrow().play_jingle(Jingle::Lose);
                        session.dispatch(SessionAction::SkipAnnounced);
                        TimeoutFuture::new(JINGLE_DELAY_MS).await;
                        refresh_and_route(session, audio).await;
                    }
                    Err(err) => report_failure("skip", &err, &session),
                }
            });
        })
    };

    let on_select = {
        let session = session.clone();
        Callback::from(move |name: String| {
            if session.busy {
                return;
            }
            session.dispatch(SessionAction::PlayerSelected { name });
        })
    };

    let on_reveal = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            session.dispatch(SessionAction::AnswerRevealed);
        })
    };

    let on_correct = {
        let session = session.clone();
        let audio = audio.clone();
        Callback::from(move |_: MouseEvent| {
            if session.busy {
                return;
            }
            let Some(guess) = session.guess.clone() else {
                return;
            };
            session.dispatch(SessionAction::TransitionStarted);
            session.dispatch(SessionAction::CorrectConfirmed);
            audio.borrow().play_jingle(Jingle::Win);
            let session = session.clone();
            let audio = audio.clone();
            spawn_local(async move {
                match GameApi.guess(&guess.player_name).await {
                    Ok(resp) => {
                        session.dispatch(SessionAction::LeaderboardUpdated {
                            players: resp.leaderboard,
                            scorer: guess.player_name.clone(),
                        });
                        refresh_and_route(session, audio).await;
                    }
                    Err(err) => report_failure("guess", &err, &session),
                }
            });
        })
    };

    let on_incorrect = {
        let session = session.clone();
        let audio = audio.clone();
        Callback::from(move |_: MouseEvent| {
            if session.busy {
                return;
            }
            session.dispatch(SessionAction::TransitionStarted);
            session.dispatch(SessionAction::IncorrectConfirmed);
            audio.borrow().play_jingle(Jingle::Lose);
            let session = session.clone();
            let audio = audio.clone();
            spawn_local(async move {
                // incorrect routes through skip: no point is awarded
                match GameApi.skip().await {
                    Ok(()) => {
                        TimeoutFuture::new(JINGLE_DELAY_MS).await;
                        refresh_and_route(session, audio).await;
                    }
                    Err(err) => report_failure("skip", &err, &session),
                }
            });
        })
    };

    let on_bonus_start = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            session.dispatch(SessionAction::BonusStarted);
        })
    };

    let screen = match session.screen {
        Screen::Welcome => html! { <WelcomeScreen on_start={on_start.clone()} /> },
        Screen::Playing => html! { <PlayingScreen
            players={session.game.players.clone()}
            sound_hint={session.sound_hint.clone()}
            controls={session.controls}
            busy={session.busy}
            {on_play} {on_replay} {on_stop} {on_skip} /> },
        Screen::PlayerSelection => html! { <PlayerSelectionScreen
            players={session.game.players.clone()}
            guess={session.guess.clone()}
            revealed={session.guess_revealed}
            busy={session.busy}
            {on_select} {on_reveal} {on_correct} {on_incorrect} /> },
        Screen::Winner => html! { <WinnerScreen
            players={session.game.players.clone()}
            on_play_again={on_start.clone()} /> },
        Screen::Bonus => html! { <BonusScreen on_begin={on_bonus_start} /> },
    };

    let company = branding
        .company_name
        .clone()
        .unwrap_or_else(|| "Sound Quiz".into());
    html! {
        <div id="root" style="max-width:720px; margin:0 auto; padding:16px;">
            <header style="text-align:center; margin-bottom:16px;">
                <h1 id="company-name" style="margin:0;">{ company.to_uppercase() }</h1>
                { branding.company_subtitle.clone().map(|subtitle| html! {
                    <p id="company-subtitle" style="margin:4px 0 0 0; opacity:0.7;">{ subtitle }</p>
                }).unwrap_or_default() }
            </header>
            { screen }
            <div id="game-status" style="text-align:center; margin-top:24px; opacity:0.8;">
                { &session.status }
            </div>
        </div>
    }
}
