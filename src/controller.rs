//! Screen texture controller.
//!
//! Owns the clock canvas and decides which texture the watch screen shows: the
//! project screenshot in [`DisplayMode::Static`], or the clock face drawn onto
//! the canvas in [`DisplayMode::Clock`]. Two triggers keep the clock current
//! while it is shown, a per-frame loop and a timer aimed at each minute
//! boundary. Both funnel into [`ScreenTextureController::redraw`], which only
//! paints when the minute changed or the face was invalidated.
//!
//! Everything runs on one cooperative thread. Mode transitions cancel the old
//! mode's triggers and start the new ones within the same call, so a firing
//! from a cancelled trigger is never observed as a live one.

use chrono::Timelike;

use crate::clock_face::ClockFace;
use crate::config::ScreenConfig;
use crate::error::ScreenError;
use crate::font::FontReadiness;
use crate::mode::{ClockSubMode, DisplayMode};
use crate::platform::{ImageRequest, Platform};
use crate::schedule::{FrameLoop, MinuteTimer};
use crate::texture::{MaterialBinder, ScreenTexture};

enum SurfaceSlot<S> {
    Unallocated,
    Ready(S),
    /// Creation failed; every operation is a no-op from here on.
    Unavailable,
    Released,
}

impl<S> SurfaceSlot<S> {
    fn get(&self) -> Option<&S> {
        match self {
            SurfaceSlot::Ready(surface) => Some(surface),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Current {
    Blank,
    Canvas,
    Static,
}

pub struct ScreenTextureController<P: Platform> {
    platform: P,
    config: ScreenConfig,
    font: FontReadiness,
    surface: SurfaceSlot<P::Surface>,

    mode: DisplayMode,
    sub_mode: ClockSubMode,
    active_index: usize,

    current: Current,
    // bumped whenever the texture the scene should bind changes
    texture_epoch: u64,
    bound_epoch: Option<u64>,
    last_drawn_minute: Option<u32>,
    needs_refresh: bool,

    minute_timer: MinuteTimer,
    frame_loop: FrameLoop,

    static_image: Option<(usize, P::Image)>,
    pending_load: Option<ImageRequest>,
    next_ticket: u64,
}

impl<P: Platform> ScreenTextureController<P> {
    pub fn new(platform: P, config: ScreenConfig, font: FontReadiness) -> Self {
        Self {
            platform,
            config,
            font,
            surface: SurfaceSlot::Unallocated,
            mode: DisplayMode::Static,
            sub_mode: ClockSubMode::Normal,
            active_index: 0,
            current: Current::Blank,
            texture_epoch: 0,
            bound_epoch: None,
            last_drawn_minute: None,
            needs_refresh: false,
            minute_timer: MinuteTimer::default(),
            frame_loop: FrameLoop::default(),
            static_image: None,
            pending_load: None,
            next_ticket: 0,
        }
    }

    /// Allocates the canvas (once) and records the mount-time inputs. Nothing
    /// is drawn until the font is ready.
    pub fn initialize(&mut self, active_index: usize, font_ready: bool) {
        if matches!(self.surface, SurfaceSlot::Released) {
            log::warn!("initialize called on a torn down screen texture");
            return;
        }
        self.active_index = active_index;
        if font_ready {
            self.font.mark_ready();
        }

        if matches!(self.surface, SurfaceSlot::Unallocated) {
            self.surface = match self
                .platform
                .create_surface(self.config.width, self.config.height)
            {
                Ok(surface) => {
                    log::debug!(
                        "screen canvas allocated ({}x{})",
                        self.config.width,
                        self.config.height
                    );
                    SurfaceSlot::Ready(surface)
                }
                Err(err) => {
                    log::warn!("screen texture disabled: {err}");
                    SurfaceSlot::Unavailable
                }
            };
        }

        if self.mode == DisplayMode::Clock {
            self.activate_clock();
        }
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.is_disabled() {
            return;
        }
        let entering_clock = mode == DisplayMode::Clock && self.mode != DisplayMode::Clock;
        self.mode = mode;

        match mode {
            DisplayMode::Clock => {
                self.abort_pending_load();
                if entering_clock {
                    self.roll_sub_mode();
                }
                self.activate_clock();
            }
            DisplayMode::Static => {
                self.stop_clock();
                self.show_static();
            }
        }
        log::debug!("screen mode {:?} ({:?})", self.mode, self.sub_mode);
    }

    /// Click handler: flips between the screenshot and the clock.
    pub fn toggle_display(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn set_active_index(&mut self, index: usize) {
        if index == self.active_index {
            return;
        }
        self.active_index = index;
        if self.is_disabled() {
            return;
        }

        match self.mode {
            DisplayMode::Static => self.request_static(),
            DisplayMode::Clock => {
                // edition label changed
                self.last_drawn_minute = None;
                self.redraw();
            }
        }
    }

    /// Draws a fresh sub-mode and repaints the face right away.
    pub fn toggle_clock_now(&mut self) -> ClockSubMode {
        if self.is_disabled() {
            return self.sub_mode;
        }
        self.roll_sub_mode();
        self.redraw();
        self.sub_mode
    }

    pub fn texture(&self) -> Option<ScreenTexture<'_, P::Surface, P::Image>> {
        match self.current {
            Current::Blank => None,
            Current::Canvas => self.surface.get().map(ScreenTexture::Canvas),
            Current::Static => self
                .static_image
                .as_ref()
                .map(|(_, image)| ScreenTexture::Image(image)),
        }
    }

    /// Consumes the "needs refresh" signal. Polled once per displayed frame.
    pub fn take_needs_refresh(&mut self) -> bool {
        std::mem::take(&mut self.needs_refresh)
    }

    /// Hands the current texture to the scene: binds it when it changed since
    /// the last call and refreshes it when the canvas was repainted. Returns
    /// true when the binder was called.
    pub fn sync<B>(&mut self, binder: &mut B) -> bool
    where
        B: MaterialBinder<P::Surface, P::Image>,
    {
        if self.current != Current::Canvas {
            self.adopt_settled_font();
        }
        let mut touched = false;
        if self.bound_epoch != Some(self.texture_epoch) {
            self.bound_epoch = Some(self.texture_epoch);
            let texture = self.texture();
            binder.bind(texture, texture.is_some_and(|t| t.is_dynamic()));
            touched = true;
        }
        if self.take_needs_refresh() {
            if let Some(texture) = self.texture() {
                binder.refresh(texture);
                touched = true;
            }
        }
        touched
    }

    /// Repaints the clock face if the wall-clock minute moved since the last
    /// paint or the face was invalidated. Returns true when it painted.
    pub fn redraw(&mut self) -> bool {
        if self.current != Current::Canvas {
            return self.adopt_settled_font();
        }
        if !self.font.is_ready() {
            return false;
        }
        let SurfaceSlot::Ready(surface) = &mut self.surface else {
            return false;
        };

        let now = self.platform.now();
        let minute = now.minute();
        if self.last_drawn_minute == Some(minute) {
            return false;
        }

        ClockFace::new(now, self.sub_mode, self.active_index, &self.config).draw(surface);
        self.last_drawn_minute = Some(minute);
        self.needs_refresh = true;
        log::trace!("clock face painted for minute {minute}");
        true
    }

    pub fn on_frame(&mut self) {
        if !self.frame_loop.acknowledge() {
            log::trace!("ignoring cancelled animation frame");
            return;
        }
        self.redraw();
        if let Err(err) = self.frame_loop.request(&mut self.platform) {
            log::warn!("clock frame loop stopped: {err}");
        }
    }

    pub fn on_minute_timer(&mut self) {
        if !self.minute_timer.acknowledge() {
            log::trace!("ignoring cancelled minute timer");
            return;
        }
        self.redraw();
        let now = self.platform.now();
        if let Err(err) = self.minute_timer.arm(&mut self.platform, &now) {
            log::warn!("minute timer stopped: {err}");
        }
    }

    pub fn on_font_loaded(&mut self, result: Result<(), ScreenError>) {
        match result {
            Ok(()) => {
                if self.font.mark_ready() {
                    log::info!("{} font loaded", self.config.font_family);
                }
                if self.mode == DisplayMode::Clock && !self.is_disabled() {
                    self.activate_clock();
                }
            }
            Err(err) => {
                self.font.mark_failed();
                log::error!("failed to load {} font: {err}", self.config.font_family);
            }
        }
    }

    pub fn on_image_loaded(&mut self, ticket: u64, result: Result<P::Image, ScreenError>) {
        let request = match self.pending_load.take() {
            Some(request) if request.ticket == ticket => request,
            other => {
                self.pending_load = other;
                log::debug!("dropping stale screen image #{ticket}");
                return;
            }
        };

        if request.index != self.active_index {
            log::debug!("dropping screen image {} for a deselected project", request.url);
            return;
        }

        match result {
            Ok(image) => {
                log::debug!("screen image {} ready", request.url);
                self.static_image = Some((request.index, image));
                if self.current == Current::Static {
                    self.texture_epoch += 1;
                }
            }
            Err(err) => log::error!("error loading screen image: {err}"),
        }
    }

    /// Cancels every pending trigger and load and releases the canvas.
    pub fn teardown(&mut self) {
        if matches!(self.surface, SurfaceSlot::Released) {
            return;
        }
        self.stop_clock();
        self.abort_pending_load();
        self.surface = SurfaceSlot::Released;
        self.static_image = None;
        self.current = Current::Blank;
        self.last_drawn_minute = None;
        self.texture_epoch += 1;
        log::debug!("screen texture torn down");
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn sub_mode(&self) -> ClockSubMode {
        self.sub_mode
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn last_drawn_minute(&self) -> Option<u32> {
        self.last_drawn_minute
    }

    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    pub fn texture_epoch(&self) -> u64 {
        self.texture_epoch
    }

    pub fn surface(&self) -> Option<&P::Surface> {
        self.surface.get()
    }

    pub fn is_clock_running(&self) -> bool {
        self.minute_timer.is_armed() || self.frame_loop.is_running()
    }

    pub fn is_torn_down(&self) -> bool {
        matches!(self.surface, SurfaceSlot::Released)
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn font(&self) -> &FontReadiness {
        &self.font
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    fn is_disabled(&self) -> bool {
        matches!(
            self.surface,
            SurfaceSlot::Unavailable | SurfaceSlot::Released
        )
    }

    fn roll_sub_mode(&mut self) {
        self.sub_mode = ClockSubMode::from_draw(self.platform.random());
        self.last_drawn_minute = None;
    }

    fn activate_clock(&mut self) {
        if !self.font.is_ready() {
            log::debug!("clock face waits for the {} font", self.config.font_family);
            return;
        }
        if self.surface.get().is_none() {
            return;
        }
        if self.current != Current::Canvas {
            self.current = Current::Canvas;
            self.texture_epoch += 1;
            self.last_drawn_minute = None;
        }

        self.redraw();
        let now = self.platform.now();
        if let Err(err) = self.minute_timer.arm(&mut self.platform, &now) {
            log::warn!("minute timer not started: {err}");
        }
        if let Err(err) = self.frame_loop.request(&mut self.platform) {
            log::warn!("clock frame loop not started: {err}");
        }
    }

    /// Starts the clock when CLOCK was requested before the font settled and
    /// the shared font handle has since become ready. Returns true when the
    /// face was painted.
    fn adopt_settled_font(&mut self) -> bool {
        if self.mode != DisplayMode::Clock || !self.font.is_ready() || self.is_disabled() {
            return false;
        }
        if self.surface.get().is_none() {
            return false;
        }
        log::debug!("{} font settled elsewhere, starting the clock", self.config.font_family);
        self.activate_clock();
        self.needs_refresh
    }

    fn stop_clock(&mut self) {
        self.minute_timer.cancel(&mut self.platform);
        self.frame_loop.cancel(&mut self.platform);
        self.needs_refresh = false;
    }

    fn show_static(&mut self) {
        if self.current != Current::Static {
            self.current = Current::Static;
            self.texture_epoch += 1;
        }
        self.request_static();
    }

    fn request_static(&mut self) {
        let index = self.active_index;
        if matches!(&self.pending_load, Some(request) if request.index != index) {
            self.abort_pending_load();
        }
        if matches!(&self.static_image, Some((loaded, _)) if *loaded == index) {
            return;
        }
        if self.pending_load.is_some() {
            return;
        }

        let request = ImageRequest {
            ticket: self.next_ticket,
            index,
            url: self.config.image_url(index),
        };
        self.next_ticket += 1;
        log::debug!("loading screen image {}", request.url);
        match self.platform.request_image(&request) {
            Ok(()) => self.pending_load = Some(request),
            Err(err) => log::error!("error loading screen image: {err}"),
        }
    }

    fn abort_pending_load(&mut self) {
        if let Some(request) = self.pending_load.take() {
            log::debug!("cancelling screen image {}", request.url);
            self.platform.abort_image(&request);
        }
    }
}

impl<P: Platform> Drop for ScreenTextureController<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}
