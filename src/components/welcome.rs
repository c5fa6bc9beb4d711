use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WelcomeScreenProps {
    pub on_start: Callback<MouseEvent>,
}

#[function_component]
pub fn WelcomeScreen(props: &WelcomeScreenProps) -> Html {
    html! {
        <div id="welcome-screen" class="screen active" style="text-align:center; padding:48px 16px;">
            <h2>{"Who knows the office sounds best?"}</h2>
            <p>{"Press play, listen carefully, and shout when you know it."}</p>
            <button id="start-game-btn" onclick={props.on_start.clone()}>{"Start Game"}</button>
        </div>
    }
}
