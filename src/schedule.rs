//! Frame and minute-boundary triggers.
//!
//! Both triggers are one-shot requests that re-arm themselves when they fire,
//! so stopping one is always a single `cancel` of the request in flight.

use chrono::{NaiveDateTime, Timelike};

use crate::error::ScreenError;

/// Id of a pending animation frame or timeout, as handed out by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub i32);

pub trait Scheduler {
    fn request_frame(&mut self) -> Result<TaskHandle, ScreenError>;
    fn cancel_frame(&mut self, handle: TaskHandle);
    fn set_timeout(&mut self, delay_ms: u32) -> Result<TaskHandle, ScreenError>;
    fn clear_timeout(&mut self, handle: TaskHandle);
}

/// Milliseconds until the wall clock reaches the next `:00` second.
pub fn millis_to_next_minute(now: &NaiveDateTime) -> u32 {
    // chrono reports leap seconds as second 59 with nanos >= 1e9
    let seconds = now.second().min(59);
    let millis = (now.nanosecond() / 1_000_000).min(999);
    (60 - seconds) * 1000 - millis
}

/// One-shot timeout aimed at the next minute boundary, re-armed on every firing.
#[derive(Debug, Default)]
pub struct MinuteTimer {
    pending: Option<TaskHandle>,
}

impl MinuteTimer {
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn arm<S: Scheduler>(
        &mut self,
        scheduler: &mut S,
        now: &NaiveDateTime,
    ) -> Result<(), ScreenError> {
        if self.pending.is_some() {
            return Ok(());
        }
        let delay = millis_to_next_minute(now);
        self.pending = Some(scheduler.set_timeout(delay)?);
        log::trace!("minute timer armed for {delay} ms");
        Ok(())
    }

    /// Consumes a firing. Returns false when nothing was armed, i.e. the
    /// firing is stale and must be ignored.
    pub fn acknowledge(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.clear_timeout(handle);
        }
    }
}

/// Per-frame callback that keeps requesting the next frame while running.
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<TaskHandle>,
}

impl FrameLoop {
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn request<S: Scheduler>(&mut self, scheduler: &mut S) -> Result<(), ScreenError> {
        if self.pending.is_none() {
            self.pending = Some(scheduler.request_frame()?);
        }
        Ok(())
    }

    pub fn acknowledge(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }
}
