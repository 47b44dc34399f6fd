use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::NaiveDateTime;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, FontFace, HtmlImageElement, Window};

use super::canvas::CanvasSurface;
use crate::config::ScreenConfig;
use crate::controller::ScreenTextureController;
use crate::error::ScreenError;
use crate::font::FontReadiness;
use crate::platform::{Clock, ImageRequest, LocalClock, Platform};
use crate::schedule::{Scheduler, TaskHandle};

pub type SharedController = Rc<RefCell<ScreenTextureController<WebPlatform>>>;
type WeakController = Weak<RefCell<ScreenTextureController<WebPlatform>>>;

impl From<ScreenError> for JsValue {
    fn from(err: ScreenError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Browser side of the controller: requestAnimationFrame, setTimeout and
/// asset loading. Callbacks reach the controller through a weak handle so a
/// dropped controller simply stops receiving them.
pub struct WebPlatform {
    window: Window,
    document: Document,
    controller: WeakController,
    on_frame: Closure<dyn FnMut()>,
    on_minute: Closure<dyn FnMut()>,
}

impl WebPlatform {
    fn new(window: Window, document: Document, controller: WeakController) -> Self {
        let on_frame = {
            let controller = controller.clone();
            Closure::wrap(Box::new(move || {
                with_controller(&controller, |screen| screen.on_frame());
            }) as Box<dyn FnMut()>)
        };
        let on_minute = {
            let controller = controller.clone();
            Closure::wrap(Box::new(move || {
                with_controller(&controller, |screen| screen.on_minute_timer());
            }) as Box<dyn FnMut()>)
        };

        Self {
            window,
            document,
            controller,
            on_frame,
            on_minute,
        }
    }
}

/// Creates a controller wired to the page's window.
pub fn mount(config: ScreenConfig, font: FontReadiness) -> Result<SharedController, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    Ok(Rc::new_cyclic(|weak: &WeakController| {
        let platform = WebPlatform::new(window, document, weak.clone());
        RefCell::new(ScreenTextureController::new(platform, config, font))
    }))
}

/// Registers the configured font face with the document and reports the
/// outcome to the controller.
pub fn load_font(controller: &SharedController) {
    let (family, url) = {
        let screen = controller.borrow();
        (
            screen.config().font_family.clone(),
            screen.config().font_url.clone(),
        )
    };
    let controller = Rc::downgrade(controller);

    spawn_local(async move {
        let result = load_font_face(&family, &url).await;
        with_controller(&controller, |screen| screen.on_font_loaded(result));
    });
}

async fn load_font_face(family: &str, url: &str) -> Result<(), ScreenError> {
    let fail = |err: JsValue| ScreenError::asset(url, format!("{err:?}"));

    let face = FontFace::new_with_str(family, &format!("url({url})")).map_err(fail)?;
    JsFuture::from(face.load().map_err(fail)?)
        .await
        .map_err(fail)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ScreenError::asset(url, "no document"))?;
    document.fonts().add(&face).map_err(fail)?;
    Ok(())
}

fn with_controller<F>(controller: &WeakController, f: F)
where
    F: FnOnce(&mut ScreenTextureController<WebPlatform>),
{
    let Some(controller) = controller.upgrade() else {
        return;
    };
    match controller.try_borrow_mut() {
        Ok(mut screen) => f(&mut screen),
        Err(_) => log::warn!("screen controller busy, callback dropped"),
    };
}

fn schedule_error(err: JsValue) -> ScreenError {
    ScreenError::Schedule(format!("{err:?}"))
}

impl Scheduler for WebPlatform {
    fn request_frame(&mut self) -> Result<TaskHandle, ScreenError> {
        self.window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .map(TaskHandle)
            .map_err(schedule_error)
    }

    fn cancel_frame(&mut self, handle: TaskHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {err:?}");
        }
    }

    fn set_timeout(&mut self, delay_ms: u32) -> Result<TaskHandle, ScreenError> {
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.on_minute.as_ref().unchecked_ref(),
                delay,
            )
            .map(TaskHandle)
            .map_err(schedule_error)
    }

    fn clear_timeout(&mut self, handle: TaskHandle) {
        self.window.clear_timeout_with_handle(handle.0);
    }
}

impl Clock for WebPlatform {
    fn now(&self) -> NaiveDateTime {
        LocalClock.now()
    }
}

impl Platform for WebPlatform {
    type Surface = CanvasSurface;
    type Image = HtmlImageElement;

    fn create_surface(&mut self, width: u32, height: u32) -> Result<CanvasSurface, ScreenError> {
        CanvasSurface::create(&self.document, width, height)
    }

    fn request_image(&mut self, request: &ImageRequest) -> Result<(), ScreenError> {
        let image = HtmlImageElement::new()
            .map_err(|err| ScreenError::asset(&request.url, format!("{err:?}")))?;
        image.set_src(&request.url);

        let controller = self.controller.clone();
        let ticket = request.ticket;
        let url = request.url.clone();
        spawn_local(async move {
            let result = JsFuture::from(image.decode())
                .await
                .map(|_| image)
                .map_err(|err| ScreenError::asset(url, format!("{err:?}")));
            with_controller(&controller, |screen| screen.on_image_loaded(ticket, result));
        });
        Ok(())
    }

    fn random(&mut self) -> f64 {
        js_sys::Math::random()
    }
}
