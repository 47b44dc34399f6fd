use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::ScreenError;
use crate::surface::{Surface, TextRun};

/// Offscreen `<canvas>` the clock face is painted on.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn create(document: &Document, width: u32, height: u32) -> Result<Self, ScreenError> {
        let unavailable = |what: &str| ScreenError::SurfaceUnavailable(what.to_string());

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|_| unavailable("cannot create canvas element"))?
            .dyn_into()
            .map_err(|_| unavailable("canvas element has unexpected type"))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| unavailable("2d context request failed"))?
            .ok_or_else(|| unavailable("2d context not supported"))?
            .dyn_into()
            .map_err(|_| unavailable("2d context has unexpected type"))?;

        Ok(Self { canvas, context })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn fill_background(&mut self, color: &str) {
        let (width, height) = self.size();
        self.context.set_fill_style_str(color);
        self.context
            .fill_rect(0.0, 0.0, f64::from(width), f64::from(height));
    }

    fn draw_text(&mut self, run: &TextRun, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.set_font(&run.font());
        self.context.set_text_align(run.align.as_css());
        self.context.set_text_baseline(run.baseline.as_css());
        if let Err(err) = self.context.fill_text(&run.text, run.x, run.y) {
            log::warn!("fillText failed: {err:?}");
        }
    }
}
