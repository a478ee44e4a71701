use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::SurfaceError;
use crate::surface::StrokeTarget;
use crate::types::{Dimensions, Point, ResolvedStyle};

/// A canvas element together with its 2D context.
pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn acquire(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::ContextUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| SurfaceError::ContextUnavailable("no context returned".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::NotCanvas2d)?;

        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl StrokeTarget for Canvas2d {
    fn resize_backing(&mut self, size: Dimensions) {
        // Assigning width/height wipes the bitmap and all context state.
        self.canvas.set_width(size.width.round().max(0.0) as u32);
        self.canvas.set_height(size.height.round().max(0.0) as u32);

        if let Err(e) = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0) {
            log::warn!("failed to reset canvas transform: {:?}", e);
        }
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
    }

    #[allow(deprecated)]
    fn apply_style(&mut self, style: &ResolvedStyle) {
        self.ctx
            .set_stroke_style(&JsValue::from_str(&style.stroke_color));
        self.ctx.set_line_width(style.line_width);
        self.ctx.set_shadow_blur(style.shadow_blur);
        self.ctx.set_shadow_color(&style.shadow_color);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, point: Point) {
        self.ctx.move_to(point.x, point.y);
    }

    fn line_to(&mut self, point: Point) {
        self.ctx.line_to(point.x, point.y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }
}
