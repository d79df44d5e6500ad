//! Reads viewport and motion preferences from the browser window.

use nodefield_core::Viewport;
use web_sys::Window;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// `true` if the user asked for reduced motion. Unsupported media queries
/// read as `false`.
pub fn reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|mql| mql.matches())
}

/// Current inner size and device pixel ratio.
pub fn viewport(window: &Window, reduced_motion: bool) -> Viewport {
    let dimension = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
        window.device_pixel_ratio(),
    )
    .with_reduced_motion(reduced_motion)
}
