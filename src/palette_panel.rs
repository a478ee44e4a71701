use yew::prelude::*;
use crate::utils::width_preview_style;

#[derive(Properties, PartialEq)]
pub struct PalettePanelProps {
    pub palette: Vec<String>,
    pub selected_color: String,
    pub width: f64,
    /// Colour and opacity of the width preview dot
    pub preview: (String, f64),
    pub on_select_color: Callback<String>,
    /// +1 to thicken, -1 to thin
    pub on_step_width: Callback<i32>,
}

#[function_component(PalettePanel)]
pub fn palette_panel(props: &PalettePanelProps) -> Html {
    let on_thicker = {
        let on_step = props.on_step_width.clone();
        Callback::from(move |_: MouseEvent| on_step.emit(1))
    };
    let on_thinner = {
        let on_step = props.on_step_width.clone();
        Callback::from(move |_: MouseEvent| on_step.emit(-1))
    };
    let (preview_color, preview_opacity) = &props.preview;

    html! {
        <div class="w-[110px] bg-white border-l border-stone-200 flex flex-col items-center py-6 gap-6 shrink-0 z-10 overflow-y-auto">
            // Width stepper
            <div class="flex flex-col items-center gap-2 w-full px-2">
                <span class="text-stone-700 text-base">{"선 굵기"}</span>
                <div class="bg-stone-100 p-2 rounded-2xl w-full flex flex-col items-center gap-2">
                    <button
                        onclick={on_thicker}
                        class="w-10 h-10 bg-white rounded-full shadow-sm text-stone-700 text-xl font-bold"
                    >
                        {"+"}
                    </button>
                    <div class="w-14 h-14 flex items-center justify-center bg-white rounded-xl border border-stone-200">
                        <div
                            class="rounded-full"
                            style={width_preview_style(props.width, preview_color, *preview_opacity)}
                        />
                    </div>
                    <button
                        onclick={on_thinner}
                        class="w-10 h-10 bg-white rounded-full shadow-sm text-stone-700 text-xl font-bold"
                    >
                        {"-"}
                    </button>
                </div>
            </div>

            <div class="w-16 h-[2px] bg-stone-100 rounded-full my-2" />

            // Colours
            <div class="flex flex-col gap-3 w-full px-2 items-center flex-1">
                <span class="text-stone-700 text-base shrink-0">{"색상"}</span>
                <div class="grid grid-cols-2 gap-2 w-full">
                    {
                        props.palette.iter().map(|color| {
                            let is_selected = props.selected_color.eq_ignore_ascii_case(color);
                            let on_select = props.on_select_color.clone();
                            let value = color.clone();
                            let onclick = Callback::from(move |_| {
                                on_select.emit(value.clone());
                            });

                            html! {
                                <button
                                    key={color.clone()}
                                    {onclick}
                                    class={classes!(
                                        "aspect-square",
                                        "w-full",
                                        "rounded-xl",
                                        "shadow-sm",
                                        "relative",
                                        if is_selected { "scale-105 ring-2 ring-stone-400 ring-offset-2 z-10" } else { "ring-1 ring-black/5" }
                                    )}
                                    style={format!("background-color: {}", color)}
                                >
                                    if is_selected {
                                        <span class={classes!(
                                            "absolute",
                                            "inset-0",
                                            "flex",
                                            "items-center",
                                            "justify-center",
                                            if color.eq_ignore_ascii_case("#FFFFFF") { "text-stone-400" } else { "text-white" }
                                        )}>
                                            {"✓"}
                                        </span>
                                    }
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </div>
            </div>
        </div>
    }
}
