//! Host capabilities the screen controller is driven by.

use chrono::NaiveDateTime;

use crate::error::ScreenError;
use crate::schedule::Scheduler;
use crate::surface::Surface;

/// Local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock of the running process. In the browser chrono reads the time
/// and the local offset from `Date`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A fetch of the screenshot for one project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRequest {
    /// Matches the completion to the request; completions for older tickets are dropped.
    pub ticket: u64,
    pub index: usize,
    pub url: String,
}

pub trait Platform: Scheduler + Clock {
    type Surface: Surface;
    type Image;

    fn create_surface(&mut self, width: u32, height: u32) -> Result<Self::Surface, ScreenError>;

    /// Starts loading an image. The result is delivered later through
    /// `ScreenTextureController::on_image_loaded` with the request's ticket.
    fn request_image(&mut self, request: &ImageRequest) -> Result<(), ScreenError>;

    /// Hint that a started load is no longer wanted.
    fn abort_image(&mut self, _request: &ImageRequest) {}

    /// Uniform draw in `[0, 1)`.
    fn random(&mut self) -> f64;
}
