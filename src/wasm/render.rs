use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent};

use super::canvas::CanvasSurface;
use super::platform;
use crate::config::ScreenConfig;
use crate::error::ScreenError;
use crate::font::FontReadiness;
use crate::mode::DisplayMode;
use crate::texture::{
    MaterialBinder, ScreenTexture, SCREEN_EMISSIVE_INTENSITY, SCREEN_TINT, SCREEN_TRANSFORM,
};

enum Bound {
    Canvas(HtmlCanvasElement),
    Image(HtmlImageElement),
}

/// Stand-in for the screen material: paints the bound texture onto the page
/// canvas, mirrored and tinted the way the watch mesh shows it.
struct PreviewBinder {
    target: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    bound: Option<Bound>,
}

impl PreviewBinder {
    fn new(target: HtmlCanvasElement) -> Result<Self, ScreenError> {
        let context = target
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| ScreenError::SurfaceUnavailable("preview has no 2d context".into()))?;
        Ok(Self {
            target,
            context,
            bound: None,
        })
    }

    fn present(&self) {
        let width = f64::from(self.target.width());
        let height = f64::from(self.target.height());
        let ctx = &self.context;

        ctx.set_global_composite_operation("source-over").ok();
        ctx.clear_rect(0.0, 0.0, width, height);
        let Some(bound) = &self.bound else {
            return;
        };

        let (repeat_x, repeat_y) = SCREEN_TRANSFORM.repeat;
        let (center_x, center_y) = SCREEN_TRANSFORM.center;
        ctx.save();
        ctx.translate(width * center_x, height * center_y).ok();
        ctx.scale(repeat_x, repeat_y).ok();
        ctx.translate(-width * center_x, -height * center_y).ok();
        let drawn = match bound {
            Bound::Canvas(canvas) => {
                ctx.draw_image_with_html_canvas_element_and_dw_and_dh(canvas, 0.0, 0.0, width, height)
            }
            Bound::Image(image) => {
                ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, width, height)
            }
        };
        ctx.restore();
        if let Err(err) = drawn {
            log::warn!("preview draw failed: {err:?}");
            return;
        }

        // emissive strength scales how much of the tint is multiplied in
        ctx.set_global_composite_operation("multiply").ok();
        ctx.set_global_alpha(SCREEN_EMISSIVE_INTENSITY.clamp(0.0, 1.0));
        ctx.set_fill_style_str(SCREEN_TINT);
        ctx.fill_rect(0.0, 0.0, width, height);
        ctx.set_global_alpha(1.0);
        ctx.set_global_composite_operation("source-over").ok();
    }
}

impl MaterialBinder<CanvasSurface, HtmlImageElement> for PreviewBinder {
    fn bind(
        &mut self,
        texture: Option<ScreenTexture<'_, CanvasSurface, HtmlImageElement>>,
        is_dynamic: bool,
    ) {
        self.bound = texture.map(|texture| match texture {
            ScreenTexture::Canvas(surface) => Bound::Canvas(surface.element().clone()),
            ScreenTexture::Image(image) => Bound::Image(image.clone()),
        });
        log::debug!("preview bound (dynamic: {is_dynamic})");
        self.present();
    }

    fn refresh(&mut self, _texture: ScreenTexture<'_, CanvasSurface, HtmlImageElement>) {
        self.present();
    }
}

/// Mount the watch screen on `canvas`: screenshot first, clock on click.
pub fn start(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let mut binder = PreviewBinder::new(canvas.clone())?;

    let active = canvas
        .get_attribute("data-active")
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);
    let controller = platform::mount(ScreenConfig::default(), FontReadiness::new())?;
    {
        let mut screen = controller.borrow_mut();
        screen.initialize(active, false);
        screen.set_mode(DisplayMode::Static);
    }
    platform::load_font(&controller);

    let click_closure = {
        let controller = controller.clone();
        Closure::wrap(Box::new(move |_event: MouseEvent| {
            let mut screen = controller.borrow_mut();
            screen.toggle_display();
            log::info!("screen shows {:?} ({:?})", screen.mode(), screen.sub_mode());
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    canvas.add_event_listener_with_callback("click", click_closure.as_ref().unchecked_ref())?;
    click_closure.forget();

    // Preview loop: the closure re-queues itself from the shared slot each frame.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let frame_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Ok(mut screen) = controller.try_borrow_mut() {
            screen.sync(&mut binder);
        }

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(err) = frame_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("preview loop stopped: {err:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }

    Ok(())
}
