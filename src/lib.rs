//! Live screen texture for the Watchy model.
//!
//! The core modules are plain Rust and build on every target; the browser
//! backends live in the wasm32-only `wasm` module.

pub mod clock_face;
pub mod config;
pub mod controller;
pub mod error;
pub mod font;
pub mod mode;
pub mod platform;
pub mod schedule;
pub mod surface;
pub mod texture;

pub use config::ScreenConfig;
pub use controller::ScreenTextureController;
pub use error::ScreenError;
pub use font::{FontReadiness, FontState};
pub use mode::{ClockSubMode, DisplayMode};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod canvas;
    mod platform;
    mod render;
    mod screen;

    pub use screen::WatchScreen;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        // Pages that only use the exported class have no preview canvas.
        let Some(canvas) = document.get_element_by_id("c") else {
            return Ok(());
        };
        let canvas = canvas.dyn_into::<web_sys::HtmlCanvasElement>()?;

        render::start(canvas)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::WatchScreen;
