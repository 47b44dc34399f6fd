#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use watchy_screen::error::ScreenError;
use watchy_screen::platform::{Clock, ImageRequest, Platform};
use watchy_screen::schedule::{Scheduler, TaskHandle};
use watchy_screen::surface::RecordingSurface;
use watchy_screen::{FontReadiness, ScreenConfig, ScreenTextureController};

/// Screenshot stand-in: remembers which url it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeImage(pub String);

#[derive(Debug)]
pub struct World {
    pub now: NaiveDateTime,
    pub draws: VecDeque<f64>,
    pub frames: Vec<TaskHandle>,
    pub timeouts: Vec<(TaskHandle, NaiveDateTime)>,
    pub image_requests: Vec<ImageRequest>,
    pub aborted: Vec<u64>,
    pub surfaces_created: usize,
    pub fail_surface: bool,
    next_handle: i32,
}

#[derive(Clone)]
pub struct FakePlatform(pub Rc<RefCell<World>>);

pub type Controller = ScreenTextureController<FakePlatform>;

pub fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_milli_opt(h, m, s, ms)
        .unwrap()
}

pub fn world(now: NaiveDateTime) -> Rc<RefCell<World>> {
    Rc::new(RefCell::new(World {
        now,
        draws: VecDeque::new(),
        frames: Vec::new(),
        timeouts: Vec::new(),
        image_requests: Vec::new(),
        aborted: Vec::new(),
        surfaces_created: 0,
        fail_surface: false,
        next_handle: 0,
    }))
}

pub fn controller(world: &Rc<RefCell<World>>) -> Controller {
    sharing_font(world, FontReadiness::new())
}

/// Controller whose font handle is shared with other controllers.
pub fn sharing_font(world: &Rc<RefCell<World>>, font: FontReadiness) -> Controller {
    ScreenTextureController::new(FakePlatform(world.clone()), ScreenConfig::default(), font)
}

/// Controller mounted with the font already loaded.
pub fn mounted(world: &Rc<RefCell<World>>, active: usize) -> Controller {
    let mut screen = controller(world);
    screen.initialize(active, true);
    screen
}

pub fn queue_draws(world: &Rc<RefCell<World>>, draws: &[f64]) {
    world.borrow_mut().draws.extend(draws.iter().copied());
}

pub fn set_now(world: &Rc<RefCell<World>>, now: NaiveDateTime) {
    world.borrow_mut().now = now;
}

/// Moves simulated time forward, firing every timeout that falls due on the way.
pub fn advance(screen: &mut Controller, world: &Rc<RefCell<World>>, ms: i64) {
    let end = world.borrow().now + Duration::milliseconds(ms);
    loop {
        let due = {
            let w = world.borrow();
            w.timeouts.iter().copied().min_by_key(|(_, due)| *due)
        };
        match due {
            Some((handle, due)) if due <= end => {
                {
                    let mut w = world.borrow_mut();
                    w.now = due;
                    w.timeouts.retain(|(pending, _)| *pending != handle);
                }
                screen.on_minute_timer();
            }
            _ => break,
        }
    }
    world.borrow_mut().now = end;
}

/// Delivers one animation frame if one was requested.
pub fn frame(screen: &mut Controller, world: &Rc<RefCell<World>>) -> bool {
    let requested = std::mem::take(&mut world.borrow_mut().frames);
    if requested.is_empty() {
        return false;
    }
    screen.on_frame();
    true
}

pub fn last_request(world: &Rc<RefCell<World>>) -> ImageRequest {
    world
        .borrow()
        .image_requests
        .last()
        .cloned()
        .expect("no image requested")
}

/// Completes the most recent image request successfully.
pub fn finish_last_load(screen: &mut Controller, world: &Rc<RefCell<World>>) -> ImageRequest {
    let request = last_request(world);
    screen.on_image_loaded(request.ticket, Ok(FakeImage(request.url.clone())));
    request
}

pub fn fills(screen: &Controller) -> usize {
    screen.surface().map_or(0, |surface| surface.fills())
}

impl FakePlatform {
    fn handle(&self) -> TaskHandle {
        let mut w = self.0.borrow_mut();
        w.next_handle += 1;
        TaskHandle(w.next_handle)
    }
}

impl Scheduler for FakePlatform {
    fn request_frame(&mut self) -> Result<TaskHandle, ScreenError> {
        let handle = self.handle();
        self.0.borrow_mut().frames.push(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: TaskHandle) {
        self.0.borrow_mut().frames.retain(|pending| *pending != handle);
    }

    fn set_timeout(&mut self, delay_ms: u32) -> Result<TaskHandle, ScreenError> {
        let handle = self.handle();
        let mut w = self.0.borrow_mut();
        let due = w.now + Duration::milliseconds(i64::from(delay_ms));
        w.timeouts.push((handle, due));
        Ok(handle)
    }

    fn clear_timeout(&mut self, handle: TaskHandle) {
        self.0
            .borrow_mut()
            .timeouts
            .retain(|(pending, _)| *pending != handle);
    }
}

impl Clock for FakePlatform {
    fn now(&self) -> NaiveDateTime {
        self.0.borrow().now
    }
}

impl Platform for FakePlatform {
    type Surface = RecordingSurface;
    type Image = FakeImage;

    fn create_surface(&mut self, width: u32, height: u32) -> Result<RecordingSurface, ScreenError> {
        let mut w = self.0.borrow_mut();
        if w.fail_surface {
            return Err(ScreenError::SurfaceUnavailable("headless".to_string()));
        }
        w.surfaces_created += 1;
        Ok(RecordingSurface::new(width, height))
    }

    fn request_image(&mut self, request: &ImageRequest) -> Result<(), ScreenError> {
        self.0.borrow_mut().image_requests.push(request.clone());
        Ok(())
    }

    fn abort_image(&mut self, request: &ImageRequest) {
        self.0.borrow_mut().aborted.push(request.ticket);
    }

    /// Queued draws first, then 0.5 (a plain clock face).
    fn random(&mut self) -> f64 {
        self.0.borrow_mut().draws.pop_front().unwrap_or(0.5)
    }
}
