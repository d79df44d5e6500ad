//! `requestAnimationFrame` as a [`FrameScheduler`].

use nodefield_core::{FieldError, FrameHandle, FrameScheduler};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Schedules one shared tick closure per frame.
///
/// The closure is installed after construction because it needs a handle to
/// the state that owns this scheduler.
pub struct AnimationFrames {
    window: Window,
    callback: Option<Closure<dyn FnMut()>>,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    pub fn set_callback(&mut self, callback: Closure<dyn FnMut()>) {
        self.callback = Some(callback);
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&mut self) -> Result<FrameHandle, FieldError> {
        let callback = self
            .callback
            .as_ref()
            .ok_or_else(|| FieldError::Schedule("no frame callback installed".into()))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| FieldError::Schedule(format!("{e:?}")))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.window.cancel_animation_frame(handle.0).ok();
    }
}
