//! Canvas2D drawing and browser downloads

use glam::DVec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, Url,
};

use crate::persistence::ExportedScene;
use crate::renderer::DrawSurface;
use crate::transform::{Dimensions, RenderTransform};

/// Axis guide stroke width in CSS pixels
const AXIS_LINE_WIDTH: f64 = 1.0;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawSurface for CanvasSurface {
    type Error = JsValue;

    fn begin_frame(&mut self, dims: &Dimensions) -> Result<(), JsValue> {
        let (width, height) = dims.backing_size();
        // Assigning the size clears the canvas, so only do it on change
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        self.ctx.set_transform(dims.ratio, 0.0, 0.0, dims.ratio, 0.0, 0.0)
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: &str) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(origin.x, origin.y, size.x, size.y);
        Ok(())
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: &str) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(AXIS_LINE_WIDTH);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        Ok(())
    }

    fn fill_rotated_rect(&mut self, transform: &RenderTransform, color: &str) -> Result<(), JsValue> {
        let half = transform.size / 2.0;
        self.ctx.save();
        self.ctx.translate(transform.center.x, transform.center.y)?;
        self.ctx.rotate(transform.rotation)?;
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(-half.x, -half.y, transform.size.x, transform.size.y);
        self.ctx.restore();
        Ok(())
    }
}

/// Offer an export to the user as a file download
pub fn download_json(export: &ExportedScene) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&export.json));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&export.filename);
    anchor.click();

    Url::revoke_object_url(&url)?;
    log::info!("Download offered as {}", export.filename);
    Ok(())
}

/// High-resolution time in milliseconds, same clock as animation frames
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
