use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::config::StudioConfig;
use crate::speech::SpeechCoordinator;
use crate::studio::Studio;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| StudioConfig::load());
    let speech = use_memo((), |_| SpeechCoordinator::browser());

    // Escape silences any voice guide
    {
        let speech = speech.clone();
        use_effect_with((), move |_| {
            let listener = EventListener::new(&gloo_utils::document(), "keydown", move |event| {
                if let Some(keyboard_event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                    if keyboard_event.key() == "Escape" {
                        speech.stop();
                    }
                }
            });

            move || drop(listener)
        });
    }

    html! {
        <ContextProvider<SpeechCoordinator> context={(*speech).clone()}>
            <div class="w-full h-screen overflow-hidden">
                <Studio config={Rc::clone(&config)} />
            </div>
        </ContextProvider<SpeechCoordinator>>
    }
}
