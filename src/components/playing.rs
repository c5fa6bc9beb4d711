use yew::prelude::*;

use super::scoreboard::Scoreboard;
use crate::model::{Player, SoundControls};

#[derive(Properties, PartialEq, Clone)]
pub struct PlayingScreenProps {
    pub players: Vec<Player>,
    pub sound_hint: String,
    pub controls: SoundControls,
    /// A backend transition is in flight; all controls are disabled.
    pub busy: bool,
    pub on_play: Callback<MouseEvent>,
    pub on_replay: Callback<MouseEvent>,
    pub on_stop: Callback<MouseEvent>,
    pub on_skip: Callback<MouseEvent>,
}

#[function_component]
pub fn PlayingScreen(props: &PlayingScreenProps) -> Html {
    let controls = props.controls;
    let button = |id: &'static str, label: &'static str, show: bool, cb: &Callback<MouseEvent>| {
        if !show {
            return html! {};
        }
        html! {
            <button id={id} onclick={cb.clone()} disabled={props.busy}>{ label }</button>
        }
    };
    html! {
        <div id="playing-screen" class="screen active" style="text-align:center; padding:24px 16px;">
            <div id="sound-status-text" style="font-size:20px; margin-bottom:16px;">{ &props.sound_hint }</div>
            <div class="sound-controls" style="display:flex; gap:12px; justify-content:center;">
                { button("play-btn", "Play", controls.play, &props.on_play) }
                { button("replay-btn", "Replay", controls.replay, &props.on_replay) }
                { button("stop-btn", "Stop", controls.stop, &props.on_stop) }
                { button("skip-btn", "Skip", controls.skip, &props.on_skip) }
            </div>
            <Scoreboard players={props.players.clone()} />
        </div>
    }
}
