//! Procedurally tessellated spheres and a morphing blob, rendered with
//! WebGL from a wasm module.
//!
//! Geometry, sizing, timing and configuration are plain Rust and build on
//! any target. The DOM and WebGL glue only exists on wasm32.

pub mod config;
pub mod geometry;
pub mod shaders;
pub mod stage;
pub mod viewport;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use log::error;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use crate::config::DemoConfig;

    pub mod demos;
    pub mod gl;
    pub mod render;

    fn to_js(e: anyhow::Error) -> JsValue {
        JsValue::from_str(&format!("{e:#}"))
    }

    fn start_canvas(canvas: HtmlCanvasElement) -> anyhow::Result<()> {
        let dataset = canvas.dataset();
        let config = DemoConfig::from_attributes(|name| dataset.get(name))?;
        render::start(canvas, &config)
    }

    /// Starts every `<canvas data-demo>` on the page, plus `#c` with the
    /// default demo. A canvas that fails to start is logged and skipped.
    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        // Errors only if a logger is already installed.
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvases = document.query_selector_all("canvas[data-demo], canvas#c")?;

        for i in 0..canvases.length() {
            let Some(node) = canvases.item(i) else {
                continue;
            };
            let canvas = node.dyn_into::<HtmlCanvasElement>()?;
            let id = canvas.id();
            if let Err(e) = start_canvas(canvas) {
                error!("Canvas {id}: {e:#}");
            }
        }
        Ok(())
    }

    /// Starts the demo configured on the canvas with id `canvas_id`.
    #[wasm_bindgen]
    pub fn run(canvas_id: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        start_canvas(canvas).map_err(to_js)
    }
}
