use yew::prelude::*;

use crate::config::SpeechConfig;
use crate::speech::{SpeechCoordinator, SpeechRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuidePosition {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl GuidePosition {
    pub fn classes(&self) -> &'static str {
        match self {
            GuidePosition::TopRight => "absolute top-4 right-4",
            GuidePosition::TopLeft => "absolute top-4 left-4",
            GuidePosition::BottomRight => "absolute bottom-4 right-4",
            GuidePosition::BottomLeft => "absolute bottom-4 left-4",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct VoiceGuideButtonProps {
    #[prop_or(AttrValue::Static("화면 안내를 시작합니다."))]
    pub text: AttrValue,
    #[prop_or_default]
    pub position: GuidePosition,
    #[prop_or_default]
    pub speech: SpeechConfig,
    /// Receives a user-facing message when speech cannot start
    #[prop_or_default]
    pub on_error: Callback<String>,
}

/// Reads `text` aloud. Buttons sharing a [`SpeechCoordinator`] context never
/// talk over each other; starting one silences the rest.
#[function_component(VoiceGuideButton)]
pub fn voice_guide_button(props: &VoiceGuideButtonProps) -> Html {
    let coordinator = use_context::<SpeechCoordinator>();
    let speaker = use_state(|| coordinator.as_ref().map(|c| c.register()));
    let speaking = use_state_eq(|| false);

    {
        let coordinator = coordinator.clone();
        let speaker = *speaker;
        let speaking = speaking.clone();
        use_effect_with((), move |_| {
            let subscription = match (coordinator, speaker) {
                (Some(coordinator), Some(id)) => {
                    Some(coordinator.subscribe(move |active| speaking.set(active == Some(id))))
                }
                _ => None,
            };
            move || drop(subscription)
        });
    }

    let onclick = {
        let coordinator = coordinator.clone();
        let speaker = *speaker;
        let text = props.text.clone();
        let speech = props.speech.clone();
        let on_error = props.on_error.clone();
        Callback::from(move |_: MouseEvent| {
            let (Some(coordinator), Some(id)) = (coordinator.as_ref(), speaker) else {
                log::warn!("voice guide rendered without a speech coordinator");
                return;
            };
            if let Err(e) = coordinator.speak(id, SpeechRequest::new(text.to_string(), &speech)) {
                log::warn!("voice guide failed: {}", e);
                on_error.emit("이 브라우저는 음성 안내를 지원하지 않습니다.".to_string());
            }
        })
    };

    html! {
        <button
            {onclick}
            class={classes!(
                props.position.classes(),
                "z-50",
                "flex",
                "items-center",
                "gap-2",
                "px-4",
                "py-3",
                "border-2",
                "rounded-xl",
                "shadow-lg",
                "text-lg",
                if *speaking { "bg-[#4C8F7E] text-white border-[#4C8F7E]" } else { "bg-white text-stone-700 border-stone-200" }
            )}
        >
            <span class={classes!((*speaking).then_some("animate-pulse"))}>{"🔊"}</span>
            <span>{ if *speaking { "재생 중..." } else { "음성 안내" } }</span>
            {
                if *speaking {
                    html! {
                        <div class="flex gap-1">
                            { for (0..3).map(|i| html! {
                                <div
                                    class="w-1 h-4 bg-white rounded-full animate-bounce"
                                    style={format!("animation-delay: {:.1}s", i as f64 * 0.1)}
                                />
                            }) }
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </button>
    }
}
