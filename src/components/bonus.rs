use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BonusScreenProps {
    pub on_begin: Callback<MouseEvent>,
}

/// Shown when the backend reports a tie at the top; the bonus sound pool is
/// already loaded server-side.
#[function_component]
pub fn BonusScreen(props: &BonusScreenProps) -> Html {
    html! {
        <div id="bonus-screen" class="screen active" style="text-align:center; padding:48px 16px;">
            <h2>{"TIE GAME!"}</h2>
            <p>{"The top scores are even. One more round decides it."}</p>
            <button id="bonus-start-btn" onclick={props.on_begin.clone()}>{"Start Bonus Round"}</button>
        </div>
    }
}
