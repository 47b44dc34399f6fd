//! Display modes of the watch screen.

/// Probability of the "NOW" easter egg each time the clock face is (re-)entered.
pub const NOW_PROBABILITY: f64 = 0.3;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Preloaded per-project screenshot.
    #[default]
    Static,
    /// Live clock face drawn onto the canvas.
    Clock,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Static => DisplayMode::Clock,
            DisplayMode::Clock => DisplayMode::Static,
        }
    }

    pub fn from_show_time(show_time: bool) -> Self {
        if show_time {
            DisplayMode::Clock
        } else {
            DisplayMode::Static
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ClockSubMode {
    /// Hour, minute, period, date, edition and id fields.
    #[default]
    Normal,
    /// The word "NOW", centered.
    Now,
}

impl ClockSubMode {
    /// Maps a uniform draw in `[0, 1)` onto a sub-mode.
    pub fn from_draw(draw: f64) -> Self {
        if draw < NOW_PROBABILITY {
            ClockSubMode::Now
        } else {
            ClockSubMode::Normal
        }
    }

    pub fn is_now(self) -> bool {
        self == ClockSubMode::Now
    }
}
