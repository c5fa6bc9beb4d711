use yew::prelude::*;

use crate::model::{CurrentGuess, Player, format_sound_name};

#[derive(Properties, PartialEq, Clone)]
pub struct PlayerSelectionScreenProps {
    pub players: Vec<Player>,
    /// The pending claim, if a player has been picked.
    pub guess: Option<CurrentGuess>,
    /// The answer is withheld until the host reveals it.
    pub revealed: bool,
    pub busy: bool,
    pub on_select: Callback<String>,
    pub on_reveal: Callback<MouseEvent>,
    pub on_correct: Callback<MouseEvent>,
    pub on_incorrect: Callback<MouseEvent>,
}

#[function_component]
pub fn PlayerSelectionScreen(props: &PlayerSelectionScreenProps) -> Html {
    html! {
        <div id="player-selection-screen" class="screen active" style="text-align:center; padding:24px 16px;">
            <h2>{"Who got it?"}</h2>
            <div id="player-buttons" style="display:flex; flex-wrap:wrap; gap:12px; justify-content:center; margin-top:16px;">
                { for props.players.iter().map(|player| {
                    let name = player.name.clone();
                    let on_select = props.on_select.clone();
                    let onclick = Callback::from(move |_: MouseEvent| on_select.emit(name.clone()));
                    html! {
                        <button class="player-button" key={player.name.clone()} {onclick} disabled={props.busy}>
                            { &player.name }
                        </button>
                    }
                }) }
            </div>
            { props.guess.as_ref().map(|guess| guess_overlay(props, guess)).unwrap_or_default() }
        </div>
    }
}

fn guess_overlay(props: &PlayerSelectionScreenProps, guess: &CurrentGuess) -> Html {
    let answer = guess
        .sound_name
        .as_deref()
        .map(format_sound_name)
        .unwrap_or_default();
    html! {
        <div id="sound-name-display" class="show"
             style="position:fixed; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.9); border:2px solid #58a6ff; padding:24px 32px; border-radius:12px; min-width:320px;">
            <p id="selected-player-name" style="font-size:18px;">
                { format!("{} thinks they know it!", guess.player_name) }
            </p>
            { if props.revealed {
                html! {
                    <>
                        <div id="sound-name-text" style="font-size:26px; font-weight:700; margin:16px 0;">{ answer }</div>
                        <div id="confirmation-section" style="display:flex; gap:12px; justify-content:center;">
                            <button id="correct-btn" onclick={props.on_correct.clone()} disabled={props.busy}>{"Correct"}</button>
                            <button id="incorrect-btn" onclick={props.on_incorrect.clone()} disabled={props.busy}>{"Incorrect"}</button>
                        </div>
                    </>
                }
            } else {
                html! {
                    <div id="reveal-section">
                        <button id="reveal-btn" onclick={props.on_reveal.clone()} disabled={props.busy}>{"Reveal Answer"}</button>
                    </div>
                }
            } }
        </div>
    }
}
