use std::rc::Rc;

use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::components::DrawingSurface;
use crate::config::StudioConfig;
use crate::curator::{Curator, SystemRandom};
use crate::palette_panel::PalettePanel;
use crate::tool_panel::ToolPanel;
use crate::types::{DrawConfig, ToolKind};
use crate::voice_guide::{GuidePosition, VoiceGuideButton};

const TOAST_MILLIS: u32 = 3_000;
const ERASER_PREVIEW: &str = "#ddd";

/// Toolbar selections of the free-drawing studio.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioState {
    pub color: String,
    pub width: f64,
    pub tool: ToolKind,
    pub magic_mode: bool,
}

impl StudioState {
    pub fn new(config: &StudioConfig) -> Self {
        Self {
            color: config.initial_color.clone(),
            width: config.initial_width,
            tool: ToolKind::Pencil,
            magic_mode: false,
        }
    }

    /// Switch tools. Drawing tools also reset the width to their preset;
    /// the eraser keeps whatever width is current.
    pub fn select_tool(&mut self, kind: ToolKind, config: &StudioConfig) {
        self.tool = kind;
        if kind != ToolKind::Eraser {
            if let Some(preset) = config.tool(kind) {
                self.width = config.clamp_width(preset.width);
            }
        }
    }

    /// Pick a colour. Picking while erasing goes back to the pencil.
    /// Returns true when the colour differs from the current one.
    pub fn select_color(&mut self, color: &str) -> bool {
        if self.tool == ToolKind::Eraser {
            self.tool = ToolKind::Pencil;
        }
        if self.color == color {
            return false;
        }
        self.color = color.to_string();
        true
    }

    pub fn step_width(&mut self, direction: i32, config: &StudioConfig) {
        let next = self.width + direction.signum() as f64 * config.width_step;
        self.width = config.clamp_width(next);
    }

    pub fn toggle_magic(&mut self) {
        self.magic_mode = !self.magic_mode;
    }

    pub fn draw_config(&self) -> DrawConfig {
        DrawConfig::new(
            self.color.clone(),
            self.width,
            self.tool.surface_tool(),
            self.magic_mode,
        )
    }

    /// Colour and opacity for the width preview dot.
    pub fn preview(&self, config: &StudioConfig) -> (String, f64) {
        match self.tool {
            ToolKind::Eraser => (ERASER_PREVIEW.to_string(), 1.0),
            kind => {
                let opacity = config.tool(kind).map(|t| t.opacity).unwrap_or(1.0);
                (self.color.clone(), opacity)
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct StudioProps {
    pub config: Rc<StudioConfig>,
}

#[function_component(Studio)]
pub fn studio(props: &StudioProps) -> Html {
    let config = props.config.clone();
    let state = use_state({
        let config = config.clone();
        move || StudioState::new(&config)
    });
    let curator = use_state({
        let config = config.clone();
        move || Curator::new(config.curator.clone())
    });
    let toast = use_state(|| None::<String>);
    let toast_timer = use_mut_ref(|| None::<Timeout>);

    let show_toast = {
        let toast = toast.clone();
        let toast_timer = toast_timer.clone();
        Callback::from(move |message: String| {
            toast.set(Some(message));
            let toast = toast.clone();
            // Replacing the handle cancels any earlier timeout.
            *toast_timer.borrow_mut() = Some(Timeout::new(TOAST_MILLIS, move || toast.set(None)));
        })
    };

    let on_select_tool = {
        let state = state.clone();
        let config = config.clone();
        Callback::from(move |kind: ToolKind| {
            let mut next = (*state).clone();
            next.select_tool(kind, &config);
            state.set(next);
        })
    };

    let on_toggle_magic = {
        let state = state.clone();
        Callback::from(move |_| {
            let mut next = (*state).clone();
            next.toggle_magic();
            state.set(next);
        })
    };

    let on_select_color = {
        let state = state.clone();
        let curator = curator.clone();
        Callback::from(move |color: String| {
            let mut next = (*state).clone();
            let changed = next.select_color(&color);
            state.set(next);
            if !changed {
                return;
            }

            let mut coach = (*curator).clone();
            if coach.on_color_selected(&color, &mut SystemRandom) {
                curator.set(coach);
            }
        })
    };

    let on_step_width = {
        let state = state.clone();
        let config = config.clone();
        Callback::from(move |direction: i32| {
            let mut next = (*state).clone();
            next.step_width(direction, &config);
            state.set(next);
        })
    };

    let on_interact = {
        let curator = curator.clone();
        Callback::from(move |_| {
            let mut coach = (*curator).clone();
            if coach.on_interaction(&mut SystemRandom) {
                curator.set(coach);
            }
        })
    };

    let on_avatar_click = {
        let curator = curator.clone();
        Callback::from(move |_: MouseEvent| {
            let mut coach = (*curator).clone();
            coach.on_avatar_clicked();
            curator.set(coach);
        })
    };

    let draw = state.draw_config();

    html! {
        <div class="h-full flex flex-col bg-[#F0F4F8] overflow-hidden relative">
            // Header
            <div class="bg-white p-3 flex items-center justify-between shadow-sm shrink-0 z-10 px-6">
                <div class="flex items-center gap-2">
                    <span class="text-2xl">{"🎨"}</span>
                    <h2 class="text-xl sm:text-2xl text-stone-800">{&config.title}</h2>
                </div>
                <div class="flex items-center gap-2 bg-stone-100 p-1.5 rounded-xl">
                    <button class="p-3 rounded-lg text-stone-700" title="실행 취소">{"↶"}</button>
                    <button class="p-3 rounded-lg text-stone-700" title="다시 실행">{"↷"}</button>
                    <button class="p-3 rounded-lg text-stone-700" title="모두 지우기">{"🗑"}</button>
                </div>
                <button class="bg-[#4C8F7E] text-white px-6 py-2.5 rounded-full text-lg shadow-md">
                    {"저장하기"}
                </button>
            </div>

            <div class="flex-1 flex overflow-hidden relative">
                <ToolPanel
                    tools={config.tools.clone()}
                    active_tool={state.tool}
                    magic_mode={state.magic_mode}
                    on_select={on_select_tool}
                    {on_toggle_magic}
                />

                // Canvas area
                <div class="flex-1 bg-[#F0F4F8] p-6 flex items-center justify-center relative overflow-hidden">
                    <div class={classes!(
                        "bg-white",
                        "w-full",
                        "h-full",
                        "max-w-[900px]",
                        "max-h-[650px]",
                        "shadow-xl",
                        "rounded-2xl",
                        "overflow-hidden",
                        "cursor-crosshair",
                        "relative",
                        if state.magic_mode { "ring-4 ring-indigo-200" } else { "ring-1 ring-stone-200" }
                    )}>
                        <DrawingSurface
                            color={AttrValue::from(draw.color.clone())}
                            line_width={draw.line_width}
                            tool={draw.tool}
                            magic_mode={draw.magic_mode}
                            {on_interact}
                        />

                        if curator.enabled() {
                            <div class="absolute bottom-6 right-6 flex items-end gap-3 z-20">
                                <div class="bg-white/90 p-4 rounded-2xl rounded-br-none shadow-lg border-2 border-[#4C8F7E]/30 max-w-[280px] mb-4">
                                    <p class="text-lg text-stone-800 leading-snug">{curator.message()}</p>
                                </div>
                                <div class="relative cursor-pointer" onclick={on_avatar_click}>
                                    <div class="w-20 h-20 bg-[#4C8F7E] rounded-full flex items-center justify-center shadow-lg border-4 border-white">
                                        <span class="text-4xl">{"🤖"}</span>
                                    </div>
                                    <div class="absolute -bottom-2 left-1/2 -translate-x-1/2 bg-stone-800 text-white text-xs px-2 py-1 rounded-full whitespace-nowrap">
                                        {"AI 그림이"}
                                    </div>
                                </div>
                            </div>
                        }

                        if state.magic_mode {
                            <div class="absolute top-4 left-1/2 -translate-x-1/2 bg-indigo-100/90 text-indigo-700 px-4 py-2 rounded-full shadow-sm pointer-events-none">
                                {"✨ AI가 선을 예쁘게 다듬어줍니다"}
                            </div>
                        }

                        <VoiceGuideButton
                            text={AttrValue::from(config.speech.guide_text.clone())}
                            position={GuidePosition::TopRight}
                            speech={config.speech.clone()}
                            on_error={show_toast.clone()}
                        />
                    </div>
                </div>

                <PalettePanel
                    palette={config.palette.clone()}
                    selected_color={state.color.clone()}
                    width={state.width}
                    preview={state.preview(&config)}
                    {on_select_color}
                    {on_step_width}
                />
            </div>

            if let Some(message) = (*toast).clone() {
                <div class="fixed bottom-8 left-1/2 -translate-x-1/2 z-[100]">
                    <div class="bg-[#4C8F7E] text-white px-6 py-4 rounded-2xl shadow-2xl flex items-center gap-3 text-xl">
                        <span>{"🔊"}</span>
                        <span>{message}</span>
                    </div>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tool;

    fn setup() -> (StudioConfig, StudioState) {
        let config = StudioConfig::default();
        let state = StudioState::new(&config);
        (config, state)
    }

    #[test]
    fn test_initial_state() {
        let (_, state) = setup();
        assert_eq!(state.color, "#000000");
        assert_eq!(state.width, 5.0);
        assert_eq!(state.tool, ToolKind::Pencil);
        assert!(!state.magic_mode);
    }

    #[test]
    fn test_tool_presets_set_width() {
        let (config, mut state) = setup();
        state.select_tool(ToolKind::Highlighter, &config);
        assert_eq!(state.width, 20.0);
        state.select_tool(ToolKind::Marker, &config);
        assert_eq!(state.width, 8.0);
        state.select_tool(ToolKind::Pencil, &config);
        assert_eq!(state.width, 3.0);
    }

    #[test]
    fn test_eraser_keeps_width() {
        let (config, mut state) = setup();
        state.select_tool(ToolKind::Marker, &config);
        state.select_tool(ToolKind::Eraser, &config);
        assert_eq!(state.width, 8.0);
        assert_eq!(state.draw_config().tool, Tool::Eraser);
    }

    #[test]
    fn test_color_pick_leaves_eraser() {
        let (config, mut state) = setup();
        state.select_tool(ToolKind::Eraser, &config);
        state.select_color("#2196F3");
        assert_eq!(state.tool, ToolKind::Pencil);
        assert_eq!(state.draw_config().color, "#2196F3");

        state.select_tool(ToolKind::Highlighter, &config);
        state.select_color("#FFEB3B");
        assert_eq!(state.tool, ToolKind::Highlighter);
    }

    #[test]
    fn test_repicking_current_color_is_not_a_change() {
        let (config, mut state) = setup();
        assert!(state.select_color("#2196F3"));
        assert!(!state.select_color("#2196F3"));

        // Still leaves the eraser even though the colour is unchanged.
        state.select_tool(ToolKind::Eraser, &config);
        assert!(!state.select_color("#2196F3"));
        assert_eq!(state.tool, ToolKind::Pencil);
    }

    #[test]
    fn test_width_steps_are_clamped() {
        let (config, mut state) = setup();
        for _ in 0..20 {
            state.step_width(1, &config);
        }
        assert_eq!(state.width, 40.0);

        for _ in 0..20 {
            state.step_width(-1, &config);
        }
        assert_eq!(state.width, 1.0);

        state.step_width(1, &config);
        assert_eq!(state.width, 4.0);
    }

    #[test]
    fn test_magic_toggle_flows_to_draw_config() {
        let (_, mut state) = setup();
        state.toggle_magic();
        assert!(state.draw_config().magic_mode);
        assert!(state.draw_config().resolve().has_glow());
        state.toggle_magic();
        assert!(!state.draw_config().magic_mode);
    }

    #[test]
    fn test_preview_colors() {
        let (config, mut state) = setup();
        assert_eq!(state.preview(&config), ("#000000".to_string(), 1.0));

        state.select_tool(ToolKind::Highlighter, &config);
        assert_eq!(state.preview(&config), ("#000000".to_string(), 0.5));

        state.select_tool(ToolKind::Eraser, &config);
        assert_eq!(state.preview(&config), (ERASER_PREVIEW.to_string(), 1.0));
    }
}
