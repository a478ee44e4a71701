use yew::prelude::*;
use crate::types::{ToolKind, ToolPreset};

#[derive(Properties, PartialEq)]
pub struct ToolPanelProps {
    pub tools: Vec<ToolPreset>,
    pub active_tool: ToolKind,
    pub magic_mode: bool,
    pub on_select: Callback<ToolKind>,
    pub on_toggle_magic: Callback<()>,
}

#[function_component(ToolPanel)]
pub fn tool_panel(props: &ToolPanelProps) -> Html {
    let on_toggle = {
        let on_toggle_magic = props.on_toggle_magic.clone();
        Callback::from(move |_: MouseEvent| on_toggle_magic.emit(()))
    };

    html! {
        <div class="w-[110px] bg-white border-r border-stone-200 flex flex-col items-center py-6 gap-4 shrink-0 z-10 overflow-y-auto">
            // Magic pen
            <button
                onclick={on_toggle}
                class={classes!(
                    "flex",
                    "flex-col",
                    "items-center",
                    "justify-center",
                    "w-20",
                    "h-24",
                    "rounded-2xl",
                    "border-2",
                    if props.magic_mode {
                        "bg-indigo-100 border-indigo-300 text-indigo-600 shadow-md scale-105"
                    } else {
                        "bg-white border-stone-200 text-stone-400 hover:bg-stone-100"
                    }
                )}
            >
                <span class="text-2xl mb-1">{"✨"}</span>
                <span class="text-sm">{"AI 매직펜"}</span>
                <span class={classes!("text-xs", "font-bold", if props.magic_mode { "text-indigo-500" } else { "text-stone-300" })}>
                    { if props.magic_mode { "ON" } else { "OFF" } }
                </span>
            </button>

            <div class="w-16 h-[1px] bg-stone-200 shrink-0" />

            {
                props.tools.iter().map(|tool| {
                    let is_active = props.active_tool == tool.kind;
                    let kind = tool.kind;
                    let on_select = props.on_select.clone();
                    let onclick = Callback::from(move |_| {
                        on_select.emit(kind);
                    });

                    html! {
                        <button
                            key={format!("{:?}", kind)}
                            {onclick}
                            class={classes!(
                                "flex",
                                "flex-col",
                                "items-center",
                                "justify-center",
                                "w-20",
                                "h-24",
                                "rounded-2xl",
                                if is_active {
                                    "bg-[#4C8F7E] text-white shadow-md scale-105"
                                } else {
                                    "bg-stone-100 text-stone-400 hover:text-stone-700"
                                }
                            )}
                        >
                            <span class="text-3xl mb-2">{tool.kind.icon()}</span>
                            <span class="text-base">{&tool.label}</span>
                        </button>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}
