#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use healing_canvas::components::{Canvas2d, DrawingSurface};
use healing_canvas::surface::{backing_size, DisplayRect, DrawingEngine, PointerSample};
use healing_canvas::types::{Dimensions, DrawConfig, Point, Tool};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, MouseEvent, MouseEventInit};
use yew::prelude::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mounted_canvas(width: u32, height: u32) -> HtmlCanvasElement {
    let document = gloo_utils::document();
    let container = document.create_element("div").unwrap();
    container
        .set_attribute("style", &format!("width: {}px; height: {}px;", width, height))
        .unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas
        .set_attribute("style", "width: 100%; height: 100%; display: block;")
        .unwrap();
    container.append_child(&canvas).unwrap();
    gloo_utils::body().append_child(&container).unwrap();
    canvas
}

fn attached_engine(canvas: &HtmlCanvasElement, dpr: f64) -> DrawingEngine<Canvas2d> {
    let mut engine = DrawingEngine::new(DrawConfig::new("#FF5252", 6.0, Tool::Brush, true));
    let target = Canvas2d::acquire(canvas.clone()).unwrap();
    engine.attach(target, backing_size(Dimensions::new(200.0, 100.0), dpr));
    engine
}

#[wasm_bindgen_test]
fn backing_store_matches_display_times_dpr() {
    let canvas = mounted_canvas(200, 100);
    let engine = attached_engine(&canvas, 2.0);

    assert_eq!(canvas.width(), 400);
    assert_eq!(canvas.height(), 200);
    assert_eq!(engine.backing(), Dimensions::new(400.0, 200.0));
}

#[wasm_bindgen_test]
fn style_is_applied_to_context() {
    let canvas = mounted_canvas(200, 100);
    let mut engine = attached_engine(&canvas, 1.0);
    let ctx = engine.target().unwrap().context().clone();

    assert_eq!(ctx.line_width(), 6.0);
    assert_eq!(ctx.line_cap(), "round");
    assert_eq!(ctx.line_join(), "round");
    assert_eq!(ctx.shadow_blur(), 10.0);

    engine.configure(DrawConfig::new("#FF5252", 12.0, Tool::Eraser, true));
    assert_eq!(ctx.line_width(), 12.0);
    assert_eq!(ctx.shadow_blur(), 0.0);
}

#[wasm_bindgen_test]
fn stroke_paints_pixels_and_resize_clears_them() {
    let canvas = mounted_canvas(200, 100);
    let mut engine = attached_engine(&canvas, 1.0);
    let rect = DisplayRect::new(Point::zero(), Dimensions::new(200.0, 100.0));

    assert!(engine.pointer_down(&PointerSample::mouse(10.0, 50.0), &rect));
    engine.pointer_move(&PointerSample::mouse(190.0, 50.0), &rect);
    engine.pointer_up();

    let ctx = engine.target().unwrap().context().clone();
    let painted = ctx.get_image_data(100.0, 50.0, 1.0, 1.0).unwrap().data();
    assert!(painted[3] > 0);

    engine.resize(backing_size(Dimensions::new(200.0, 100.0), 1.0));
    let cleared = ctx.get_image_data(100.0, 50.0, 1.0, 1.0).unwrap().data();
    assert_eq!(cleared[3], 0);
}

#[derive(Properties, PartialEq)]
struct SurfaceHostProps {
    on_interact: Callback<()>,
}

#[function_component(SurfaceHost)]
fn surface_host(props: &SurfaceHostProps) -> Html {
    html! {
        <div style="width: 200px; height: 100px;">
            <DrawingSurface color="#3F51B5" on_interact={props.on_interact.clone()} />
        </div>
    }
}

fn mouse(kind: &str, x: i32, y: i32) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_client_x(x);
    init.set_client_y(y);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

#[wasm_bindgen_test]
async fn interaction_fires_on_down_only() {
    let root = gloo_utils::document().create_element("div").unwrap();
    gloo_utils::body().append_child(&root).unwrap();

    let interactions = Rc::new(Cell::new(0));
    let on_interact = {
        let interactions = interactions.clone();
        Callback::from(move |_| interactions.set(interactions.get() + 1))
    };
    let app = yew::Renderer::<SurfaceHost>::with_root_and_props(
        root.clone(),
        SurfaceHostProps { on_interact },
    )
    .render();
    yew::platform::time::sleep(Duration::from_millis(50)).await;

    let canvas = root
        .query_selector("canvas")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    let dpr = gloo_utils::window().device_pixel_ratio();
    assert_eq!(canvas.width(), (200.0 * dpr).round() as u32);

    let origin = canvas.get_bounding_client_rect();
    let (x, y) = (origin.left() as i32, origin.top() as i32);

    // Moves before any down are ignored.
    canvas.dispatch_event(&mouse("mousemove", x + 5, y + 5)).unwrap();
    assert_eq!(interactions.get(), 0);

    canvas.dispatch_event(&mouse("mousedown", x + 10, y + 50)).unwrap();
    assert_eq!(interactions.get(), 1);
    for step in 1..=5 {
        canvas
            .dispatch_event(&mouse("mousemove", x + 10 + step * 30, y + 50))
            .unwrap();
    }
    canvas.dispatch_event(&mouse("mouseup", x + 160, y + 50)).unwrap();
    assert_eq!(interactions.get(), 1);

    let ctx = canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .unwrap();
    let pixel = ctx
        .get_image_data((100.0 * dpr).round(), (50.0 * dpr).round(), 1.0, 1.0)
        .unwrap()
        .data();
    assert!(pixel[3] > 0);

    canvas.dispatch_event(&mouse("mousedown", x + 20, y + 20)).unwrap();
    assert_eq!(interactions.get(), 2);
    canvas.dispatch_event(&mouse("mouseup", x + 20, y + 20)).unwrap();
    assert_eq!(interactions.get(), 2);

    app.destroy();
}
