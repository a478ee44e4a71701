use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, TouchEvent};
use yew::prelude::*;

use crate::components::Canvas2d;
use crate::error::SurfaceError;
use crate::surface::{backing_size, DrawingEngine, PointerSample};
use crate::types::{Dimensions, DrawConfig, Tool};
use crate::utils::{device_pixel_ratio, display_rect, mouse_sample, touch_sample};

/// Props for the freehand drawing surface
#[derive(Properties, Clone, PartialEq)]
pub struct DrawingSurfaceProps {
    /// Stroke colour; ignored while erasing
    #[prop_or(AttrValue::Static("#000000"))]
    pub color: AttrValue,

    /// Stroke width in backing-store pixels
    #[prop_or(5.0)]
    pub line_width: f64,

    #[prop_or_default]
    pub tool: Tool,

    /// Soft glow around brush strokes
    #[prop_or_default]
    pub magic_mode: bool,

    /// Fired once at the start of every stroke
    #[prop_or_default]
    pub on_interact: Callback<()>,
}

impl DrawingSurfaceProps {
    fn draw_config(&self) -> DrawConfig {
        DrawConfig::new(self.color.to_string(), self.line_width, self.tool, self.magic_mode)
    }
}

type SharedEngine = Rc<RefCell<DrawingEngine<Canvas2d>>>;

/// Everything the input handlers need, cheap to clone into closures.
#[derive(Clone)]
struct StrokeHandlers {
    engine: SharedEngine,
    canvas_ref: NodeRef,
    on_interact: Rc<RefCell<Callback<()>>>,
}

impl StrokeHandlers {
    fn start(&self, sample: PointerSample) {
        let Some(canvas) = self.canvas_ref.cast::<HtmlCanvasElement>() else {
            return;
        };
        let rect = display_rect(&canvas);
        let started = self.engine.borrow_mut().pointer_down(&sample, &rect);
        if started {
            let on_interact = self.on_interact.borrow().clone();
            on_interact.emit(());
        }
    }

    fn extend(&self, sample: PointerSample) {
        let Some(canvas) = self.canvas_ref.cast::<HtmlCanvasElement>() else {
            return;
        };
        let rect = display_rect(&canvas);
        self.engine.borrow_mut().pointer_move(&sample, &rect);
    }

    fn finish(&self) {
        self.engine.borrow_mut().pointer_up();
    }
}

/// Backing-store size for `canvas`, measured from its container.
fn measure_backing(canvas: &HtmlCanvasElement) -> Result<Dimensions, SurfaceError> {
    let container = canvas
        .parent_element()
        .ok_or(SurfaceError::MissingContainer)?;
    Ok(backing_size(display_rect(&container).size, device_pixel_ratio()))
}

fn attach(engine: &SharedEngine, canvas_ref: &NodeRef) -> Result<HtmlCanvasElement, SurfaceError> {
    let canvas = canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or(SurfaceError::MissingCanvas)?;
    let backing = measure_backing(&canvas)?;
    let target = Canvas2d::acquire(canvas.clone())?;
    engine.borrow_mut().attach(target, backing);
    Ok(canvas)
}

fn touch_listener(
    canvas: &HtmlCanvasElement,
    event_type: &'static str,
    handler: impl Fn(&TouchEvent) + 'static,
) -> EventListener {
    // Non-passive so the browser neither scrolls nor replays the touch as mouse events.
    EventListener::new_with_options(
        canvas,
        event_type,
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            if let Some(touch) = event.dyn_ref::<TouchEvent>() {
                touch.prevent_default();
                handler(touch);
            }
        },
    )
}

/// Canvas that captures mouse and touch input and paints freehand strokes.
/// Fills its parent; the backing store follows the parent's size times the
/// device pixel ratio and is rebuilt (and cleared) on window resize.
#[function_component(DrawingSurface)]
pub fn drawing_surface(props: &DrawingSurfaceProps) -> Html {
    let canvas_ref = use_node_ref();
    let engine: SharedEngine = use_mut_ref({
        let config = props.draw_config();
        move || DrawingEngine::new(config)
    });
    let on_interact = use_mut_ref(Callback::<()>::default);
    *on_interact.borrow_mut() = props.on_interact.clone();

    let handlers = StrokeHandlers {
        engine: engine.clone(),
        canvas_ref: canvas_ref.clone(),
        on_interact,
    };

    // Acquire the context, size the backing store and wire window/touch listeners
    {
        let handlers = handlers.clone();
        use_effect_with((), move |_| {
            let mut listeners = Vec::new();

            match attach(&handlers.engine, &handlers.canvas_ref) {
                Ok(canvas) => {
                    let resize = {
                        let engine = handlers.engine.clone();
                        EventListener::new(&gloo_utils::window(), "resize", move |_| {
                            let canvas = engine.borrow().target().map(|t| t.canvas().clone());
                            let Some(canvas) = canvas else {
                                return;
                            };
                            match measure_backing(&canvas) {
                                Ok(backing) => engine.borrow_mut().resize(backing),
                                Err(e) => log::warn!("skipping canvas resize: {}", e),
                            }
                        })
                    };
                    listeners.push(resize);

                    let h = handlers.clone();
                    listeners.push(touch_listener(&canvas, "touchstart", move |e| {
                        h.start(touch_sample(e))
                    }));
                    let h = handlers.clone();
                    listeners.push(touch_listener(&canvas, "touchmove", move |e| {
                        h.extend(touch_sample(e))
                    }));
                    for event_type in ["touchend", "touchcancel"] {
                        let h = handlers.clone();
                        listeners.push(touch_listener(&canvas, event_type, move |_| h.finish()));
                    }
                }
                Err(e) => log::warn!("drawing surface disabled: {}", e),
            }

            let engine = handlers.engine.clone();
            move || {
                drop(listeners);
                engine.borrow_mut().detach();
            }
        });
    }

    // Re-apply style whenever the configuration changes, even mid-stroke
    {
        let engine = engine.clone();
        use_effect_with(props.draw_config(), move |config| {
            engine.borrow_mut().configure(config.clone());
            || ()
        });
    }

    let onmousedown = {
        let handlers = handlers.clone();
        Callback::from(move |e: MouseEvent| handlers.start(mouse_sample(&e)))
    };

    let onmousemove = {
        let handlers = handlers.clone();
        Callback::from(move |e: MouseEvent| handlers.extend(mouse_sample(&e)))
    };

    let onmouseup = {
        let handlers = handlers.clone();
        Callback::from(move |_: MouseEvent| handlers.finish())
    };

    let onmouseleave = {
        let handlers = handlers.clone();
        Callback::from(move |_: MouseEvent| handlers.finish())
    };

    html! {
        <canvas
            ref={canvas_ref}
            class="w-full h-full block touch-none"
            style="width: 100%; height: 100%; touch-action: none;"
            {onmousedown}
            {onmousemove}
            {onmouseup}
            {onmouseleave}
        />
    }
}
