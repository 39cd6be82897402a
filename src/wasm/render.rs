use std::{cell::RefCell, rc::Rc};

use log::{debug, error, info};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlCanvasElement, Window};

use super::{
    demos,
    gl::{self, js_err, Gl},
};
use crate::{
    config::DemoConfig,
    viewport::{aspect_ratio, backing_size, ResizeState},
};

/// What a demo sees each frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub ratio: f32,
    /// `requestAnimationFrame` timestamp.
    pub time_ms: f64,
}

pub trait Scene {
    fn draw(&mut self, gl: &Gl, frame: &Frame);
}

// Resizes the backing store to the canvas' layout size in device pixels.
fn apply_resize(window: &Window, canvas: &HtmlCanvasElement, gl: &Gl, state: &mut ResizeState) {
    if !state.is_requested() {
        return;
    }

    let size = backing_size(
        canvas.client_width() as f64,
        canvas.client_height() as f64,
        window.device_pixel_ratio(),
    );
    if let Some((w, h)) = state.take(size) {
        canvas.set_width(w);
        canvas.set_height(h);
        gl.viewport(0, 0, w as i32, h as i32);
        debug!("Canvas {} resized to {w}x{h}.", canvas.id());
    }
}

/// Creates the demo described by `config` on `canvas` and drives it from
/// `requestAnimationFrame` until the page goes away.
pub fn start(canvas: HtmlCanvasElement, config: &DemoConfig) -> anyhow::Result<()> {
    let window = window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let gl = gl::context(&canvas, config.antialias)?;
    let mut scene = demos::create(&gl, config)?;
    info!("Started {} demo on canvas {}.", config.demo, canvas.id());

    // Resizing happens at the start of the next frame.
    let resize = Rc::new(RefCell::new(ResizeState::new()));
    let resize_closure = {
        let resize = resize.clone();
        Closure::wrap(Box::new(move || resize.borrow_mut().request()) as Box<dyn FnMut()>)
    };
    window
        .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    resize_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let frame_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let (width, height) = {
            let mut state = resize.borrow_mut();
            apply_resize(&frame_window, &canvas, &gl, &mut state);
            state.size()
        };

        let frame = Frame {
            width,
            height,
            ratio: aspect_ratio(width, height),
            time_ms: now,
        };
        scene.draw(&gl, &frame);

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(e) = frame_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                error!("Failed to schedule frame: {:#}", js_err(e));
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(first) = g.borrow().as_ref() {
        window
            .request_animation_frame(first.as_ref().unchecked_ref())
            .map_err(js_err)?;
    }

    Ok(())
}
