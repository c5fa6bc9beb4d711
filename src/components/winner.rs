use yew::prelude::*;

use crate::model::{Player, winner_names};

#[derive(Properties, PartialEq, Clone)]
pub struct WinnerScreenProps {
    pub players: Vec<Player>,
    pub on_play_again: Callback<MouseEvent>,
}

/// Terminal screen: all players tied at the maximum score share the win.
#[function_component]
pub fn WinnerScreen(props: &WinnerScreenProps) -> Html {
    let names = winner_names(&props.players).unwrap_or_default();
    html! {
        <div id="winner-screen" class="screen active" style="text-align:center; padding:48px 16px;">
            <h2>{"We have a winner!"}</h2>
            <div id="winner-names" style="font-size:32px; font-weight:700; margin:24px 0;">{ names }</div>
            <button id="play-again-btn" onclick={props.on_play_again.clone()}>{"Play Again"}</button>
        </div>
    }
}
