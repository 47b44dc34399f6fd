#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use watchy_screen::WatchScreen;

wasm_bindgen_test_configure!(run_in_browser);

fn config(entries: &[(&str, JsValue)]) -> JsValue {
    let object = js_sys::Object::new();
    for (key, value) in entries {
        js_sys::Reflect::set(&object, &JsValue::from_str(key), value).unwrap();
    }
    object.into()
}

#[wasm_bindgen_test]
fn clock_mode_exposes_the_canvas() {
    let screen = WatchScreen::new(JsValue::UNDEFINED).unwrap();
    screen.initialize(0, true);
    screen.set_show_time(true);

    assert!(screen.is_dynamic());
    assert!(screen.take_needs_update());
    assert!(!screen.take_needs_update());

    let canvas = screen
        .texture_source()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .expect("clock texture is a canvas");
    assert_eq!((canvas.width(), canvas.height()), (400, 400));
    screen.teardown();
}

#[wasm_bindgen_test]
fn config_object_sizes_the_canvas() {
    let screen = WatchScreen::new(config(&[
        ("width", JsValue::from_f64(256.0)),
        ("height", JsValue::from_f64(128.0)),
        ("sid", JsValue::from_str("00000042")),
    ]))
    .unwrap();
    screen.initialize(3, true);
    screen.set_show_time(true);

    let canvas = screen
        .texture_source()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    assert_eq!((canvas.width(), canvas.height()), (256, 128));
    screen.teardown();
}

#[wasm_bindgen_test]
fn clock_waits_for_the_font() {
    let screen = WatchScreen::new(JsValue::UNDEFINED).unwrap();
    screen.initialize(0, false);
    screen.set_show_time(true);

    assert!(screen.texture_source().is_null());
    assert!(!screen.take_needs_update());
    screen.teardown();
}

#[wasm_bindgen_test]
fn teardown_clears_the_texture() {
    let screen = WatchScreen::new(JsValue::UNDEFINED).unwrap();
    screen.initialize(0, true);
    screen.set_show_time(true);
    let epoch = screen.texture_epoch();

    screen.teardown();
    screen.teardown();
    assert!(screen.texture_source().is_null());
    assert!(screen.texture_epoch() > epoch);
}
