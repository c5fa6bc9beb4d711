use yew::prelude::*;

use crate::api::player_image_url;
use crate::model::{Player, place_marker, sorted_by_score};

#[derive(Properties, PartialEq, Clone)]
pub struct ScoreboardProps {
    pub players: Vec<Player>,
}

/// Leaderboard in descending score order; the top three rows carry place
/// markers.
#[function_component]
pub fn Scoreboard(props: &ScoreboardProps) -> Html {
    if props.players.is_empty() {
        return html! {};
    }
    let rows = sorted_by_score(&props.players);
    html! {
        <div id="scoreboard-list" style="display:flex; flex-direction:column; gap:6px; min-width:260px; margin:16px auto;">
            { for rows.iter().enumerate().map(|(index, player)| html! {
                <PlayerRow key={player.name.clone()} player={player.clone()} place={place_marker(index)} />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct PlayerRowProps {
    pub player: Player,
    pub place: Option<&'static str>,
}

#[function_component]
pub fn PlayerRow(props: &PlayerRowProps) -> Html {
    let image_failed = use_state(|| false);
    let onerror = {
        let image_failed = image_failed.clone();
        Callback::from(move |_: Event| image_failed.set(true))
    };
    let initial = props
        .player
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    let avatar_style = "width:32px; height:32px; border-radius:50%; flex-shrink:0;";
    html! {
        <div class={classes!("player-score", props.place)}
             style="display:flex; align-items:center; justify-content:space-between; gap:12px; padding:6px 12px; border:1px solid #30363d; border-radius:8px;">
            <div class="player-info" style="display:flex; align-items:center; gap:8px;">
                { if *image_failed {
                    html! {
                        <div class="player-avatar-placeholder"
                             style={format!("{avatar_style} display:flex; align-items:center; justify-content:center; background:#30363d; font-weight:600;")}>
                            { initial }
                        </div>
                    }
                } else {
                    html! {
                        <img class="player-avatar"
                             style={format!("{avatar_style} object-fit:cover;")}
                             src={player_image_url(&props.player.name)}
                             alt={props.player.name.clone()}
                             {onerror} />
                    }
                } }
                <span class="player-name">{ &props.player.name }</span>
            </div>
            <span class="player-points" style="font-weight:600;">{ props.player.score }</span>
        </div>
    }
}
