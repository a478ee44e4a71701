mod app;
mod palette_panel;
mod studio;
mod tool_panel;
mod utils;
mod voice_guide;

pub mod components;
pub mod config;
pub mod curator;
pub mod error;
pub mod speech;
pub mod surface;
pub mod types;

use app::App;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
