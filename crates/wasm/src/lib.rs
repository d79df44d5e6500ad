#![deny(unsafe_code)]
//! Browser entry point for the nodefield background.
//!
//! ```js
//! import init, { start_background } from "./nodefield_wasm.js";
//! await init();
//! const bg = start_background("node-field", JSON.stringify({ base_count: 50 }));
//! // later: bg.free();
//! ```
//!
//! A missing canvas or 2D context is logged as a console warning and
//! reported as an `Err`; the page keeps working without the background.

mod canvas;
mod frames;
mod host;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use nodefield_core::{FieldConfig, FieldError, FrameScheduler, ParticleField};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

use canvas::CanvasSurface;
use frames::AnimationFrames;

struct State {
    field: ParticleField,
    surface: CanvasSurface,
    frames: AnimationFrames,
    reduced_motion: bool,
    /// Set by `Background::stop`; the page becoming visible does not
    /// restart a paused field.
    paused: bool,
}

/// A running background. Dropping it (or calling `free()` from JS) cancels
/// the pending frame and removes the window listeners.
#[wasm_bindgen]
pub struct Background {
    state: Rc<RefCell<State>>,
    window: Window,
    document: Document,
    on_resize: Closure<dyn FnMut()>,
    on_visibility: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl Background {
    /// Cancels the animation. The last frame stays on the canvas.
    pub fn stop(&self) {
        let mut guard = self.state.borrow_mut();
        let State {
            field,
            frames,
            paused,
            ..
        } = &mut *guard;
        *paused = true;
        field.stop(frames);
    }

    /// Restarts the animation. No-op if it is already running.
    pub fn resume(&self) -> Result<(), JsValue> {
        let mut guard = self.state.borrow_mut();
        let State {
            field,
            frames,
            paused,
            ..
        } = &mut *guard;
        *paused = false;
        field.start(frames).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn node_count(&self) -> usize {
        self.state.borrow().field.node_count()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.state.borrow().field.is_running()
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.state.try_borrow_mut() {
            let State { field, frames, .. } = &mut *guard;
            field.stop(frames);
        }
        self.window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .ok();
        self.document
            .remove_event_listener_with_callback(
                "visibilitychange",
                self.on_visibility.as_ref().unchecked_ref(),
            )
            .ok();
    }
}

/// Attaches the background to `<canvas id={canvas_id}>` and starts it.
///
/// `params` is an optional JSON object of config overrides; see
/// `FieldConfig::param_schema` for the accepted keys.
#[wasm_bindgen]
pub fn start_background(canvas_id: &str, params: Option<String>) -> Result<Background, JsValue> {
    console_error_panic_hook::set_once();
    start(canvas_id, params.as_deref()).map_err(|e| {
        web_sys::console::warn_1(&format!("nodefield: {e}").into());
        to_js(e)
    })
}

fn start(canvas_id: &str, params: Option<&str>) -> Result<Background, FieldError> {
    let window = web_sys::window()
        .ok_or_else(|| FieldError::SurfaceUnavailable("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| FieldError::SurfaceUnavailable("no document".into()))?;

    let config = parse_params(params)?;
    let surface = CanvasSurface::from_document(&document, canvas_id)?;
    let reduced_motion = host::reduced_motion(&window);
    let viewport = host::viewport(&window, reduced_motion);
    let field = ParticleField::new(config, viewport, js_sys::Date::now() as u64)?;

    let state = Rc::new(RefCell::new(State {
        field,
        surface,
        frames: AnimationFrames::new(window.clone()),
        reduced_motion,
        paused: false,
    }));

    let tick_state = Rc::downgrade(&state);
    let on_frame = Closure::wrap(Box::new(move || {
        with_state(&tick_state, |s| {
            let State {
                field,
                surface,
                frames,
                ..
            } = s;
            field.tick(surface, frames)
        })
    }) as Box<dyn FnMut()>);

    let resize_state = Rc::downgrade(&state);
    let resize_window = window.clone();
    let on_resize = Closure::wrap(Box::new(move || {
        with_state(&resize_state, |s| {
            let viewport = host::viewport(&resize_window, s.reduced_motion);
            let State {
                field,
                surface,
                frames,
                ..
            } = s;
            field.resize(viewport, surface, frames)
        })
    }) as Box<dyn FnMut()>);

    let visibility_state = Rc::downgrade(&state);
    let visibility_document = document.clone();
    let on_visibility = Closure::wrap(Box::new(move || {
        let hidden = visibility_document.hidden();
        with_state(&visibility_state, |s| {
            let State {
                field,
                frames,
                paused,
                ..
            } = s;
            follow_visibility(field, frames, hidden, *paused)
        })
    }) as Box<dyn FnMut()>);

    {
        let mut guard = state.borrow_mut();
        let State {
            field,
            surface,
            frames,
            ..
        } = &mut *guard;
        frames.set_callback(on_frame);
        field.size_surface(surface);
        field.start(frames)?;
    }

    // Dropping `background` on a failed listener registration cancels the
    // frame that was just requested.
    let background = Background {
        state,
        window,
        document,
        on_resize,
        on_visibility,
    };
    background
        .window
        .add_event_listener_with_callback("resize", background.on_resize.as_ref().unchecked_ref())
        .map_err(|e| FieldError::Schedule(format!("resize listener: {e:?}")))?;
    background
        .document
        .add_event_listener_with_callback(
            "visibilitychange",
            background.on_visibility.as_ref().unchecked_ref(),
        )
        .map_err(|e| FieldError::Schedule(format!("visibility listener: {e:?}")))?;
    Ok(background)
}

/// Runs `f` against the live state; logs instead of throwing on failure.
fn with_state(state: &Weak<RefCell<State>>, f: impl FnOnce(&mut State) -> Result<(), FieldError>) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let Ok(mut guard) = state.try_borrow_mut() else {
        return;
    };
    if let Err(e) = f(&mut *guard) {
        web_sys::console::error_1(&format!("nodefield: {e}").into());
    }
}

/// Stops the field while the page is hidden and restarts it when shown,
/// unless the embedder paused it.
fn follow_visibility(
    field: &mut ParticleField,
    frames: &mut dyn FrameScheduler,
    hidden: bool,
    paused: bool,
) -> Result<(), FieldError> {
    if hidden {
        field.stop(frames);
        Ok(())
    } else if paused {
        Ok(())
    } else {
        field.start(frames)
    }
}

/// Parses optional JSON overrides on top of the defaults.
fn parse_params(params: Option<&str>) -> Result<FieldConfig, FieldError> {
    match params.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(FieldConfig::default()),
        Some(json) => {
            let value: serde_json::Value = serde_json::from_str(json)
                .map_err(|e| FieldError::InvalidConfig(format!("params: {e}")))?;
            FieldConfig::from_json(&value)
        }
    }
}

fn to_js(e: FieldError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
