use wasm_bindgen::prelude::*;

use super::platform::{self, SharedController};
use crate::config::ScreenConfig;
use crate::font::FontReadiness;
use crate::mode::DisplayMode;
use crate::texture::ScreenTexture;

/// Screen texture for a three.js scene.
///
/// ```js
/// const screen = new WatchScreen({ sid: "12345678" });
/// screen.initialize(active, false);
/// screen.loadFont();
/// // every frame:
/// if (screen.textureEpoch() !== boundEpoch) { rebind(screen.textureSource()); }
/// if (screen.takeNeedsUpdate()) { texture.needsUpdate = true; }
/// ```
#[wasm_bindgen]
pub struct WatchScreen {
    controller: SharedController,
}

#[wasm_bindgen]
impl WatchScreen {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WatchScreen, JsValue> {
        let controller = platform::mount(read_config(&config), FontReadiness::new())?;
        Ok(WatchScreen { controller })
    }

    pub fn initialize(&self, active: u32, font_ready: bool) {
        self.controller
            .borrow_mut()
            .initialize(active as usize, font_ready);
    }

    #[wasm_bindgen(js_name = "loadFont")]
    pub fn load_font(&self) {
        platform::load_font(&self.controller);
    }

    #[wasm_bindgen(js_name = "setShowTime")]
    pub fn set_show_time(&self, show_time: bool) {
        self.controller
            .borrow_mut()
            .set_mode(DisplayMode::from_show_time(show_time));
    }

    #[wasm_bindgen(js_name = "toggleShowTime")]
    pub fn toggle_show_time(&self) -> bool {
        let mut screen = self.controller.borrow_mut();
        screen.toggle_display();
        screen.mode() == DisplayMode::Clock
    }

    #[wasm_bindgen(js_name = "setActive")]
    pub fn set_active(&self, active: u32) {
        self.controller.borrow_mut().set_active_index(active as usize);
    }

    /// Re-rolls the "NOW" face; returns whether it is now shown.
    #[wasm_bindgen(js_name = "toggleNow")]
    pub fn toggle_now(&self) -> bool {
        self.controller.borrow_mut().toggle_clock_now().is_now()
    }

    #[wasm_bindgen(js_name = "isNow")]
    pub fn is_now(&self) -> bool {
        self.controller.borrow().sub_mode().is_now()
    }

    #[wasm_bindgen(js_name = "isDynamic")]
    pub fn is_dynamic(&self) -> bool {
        self.controller
            .borrow()
            .texture()
            .is_some_and(|texture| texture.is_dynamic())
    }

    /// The `<canvas>` or `<img>` currently backing the screen, or `null`.
    #[wasm_bindgen(js_name = "textureSource")]
    pub fn texture_source(&self) -> JsValue {
        match self.controller.borrow().texture() {
            Some(ScreenTexture::Canvas(surface)) => surface.element().clone().into(),
            Some(ScreenTexture::Image(image)) => image.clone().into(),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = "takeNeedsUpdate")]
    pub fn take_needs_update(&self) -> bool {
        self.controller.borrow_mut().take_needs_refresh()
    }

    #[wasm_bindgen(js_name = "textureEpoch")]
    pub fn texture_epoch(&self) -> f64 {
        self.controller.borrow().texture_epoch() as f64
    }

    pub fn teardown(&self) {
        self.controller.borrow_mut().teardown();
    }
}

fn number(config: &JsValue, key: &str) -> Option<u32> {
    js_sys::Reflect::get(config, &JsValue::from_str(key))
        .ok()?
        .as_f64()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value as u32)
}

fn string(config: &JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(config, &JsValue::from_str(key))
        .ok()?
        .as_string()
}

/// Reads `{ width, height, padding, sid, ... }`; missing or mistyped fields
/// keep their defaults.
fn read_config(config: &JsValue) -> ScreenConfig {
    let mut parsed = ScreenConfig::default();
    if !config.is_object() {
        return parsed;
    }

    if let Some(width) = number(config, "width") {
        parsed.width = width;
    }
    if let Some(height) = number(config, "height") {
        parsed.height = height;
    }
    if let Some(padding) = number(config, "padding") {
        parsed.padding = padding;
    }
    if let Some(total) = number(config, "editionTotal") {
        parsed.edition_total = total;
    }
    if let Some(sid) = string(config, "sid") {
        parsed.sid = sid;
    }
    if let Some(family) = string(config, "fontFamily") {
        parsed.font_family = family;
    }
    if let Some(url) = string(config, "fontUrl") {
        parsed.font_url = url;
    }
    if let Some(base) = string(config, "projectBase") {
        parsed.project_base = base;
    }
    if let Some(file) = string(config, "imageFile") {
        parsed.image_file = file;
    }
    parsed
}
