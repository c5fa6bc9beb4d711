mod api;
mod audio;
mod components;
mod model;

use components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
