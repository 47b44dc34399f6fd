//! Layout of the watch face.
//!
//! Coordinates are authored for a 400x400 screen and scaled to the configured
//! size; font sizes follow the smaller of the two scales.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::config::ScreenConfig;
use crate::mode::ClockSubMode;
use crate::surface::{Surface, TextAlign, TextBaseline, TextRun};

pub const BACKGROUND: &str = "black";
pub const INK: &str = "white";

const REFERENCE_SIZE: f64 = 400.0;

const TIME_PX: f64 = 110.0;
const PERIOD_PX: f64 = 32.0;
const DETAIL_PX: f64 = 28.0;
const NOW_PX: f64 = 140.0;

const TIME_X: f64 = 135.0;
const HOUR_Y: f64 = 90.0;
const MINUTE_Y: f64 = 185.0;
const PERIOD_X: f64 = 170.0;
const PERIOD_Y: f64 = 300.0;
const EDITION_X: f64 = 310.0;
const FOOTER_RISE: f64 = 40.0;

pub struct ClockFace<'a> {
    pub time: NaiveDateTime,
    pub sub_mode: ClockSubMode,
    pub active_index: usize,
    pub config: &'a ScreenConfig,
}

impl<'a> ClockFace<'a> {
    pub fn new(
        time: NaiveDateTime,
        sub_mode: ClockSubMode,
        active_index: usize,
        config: &'a ScreenConfig,
    ) -> Self {
        Self {
            time,
            sub_mode,
            active_index,
            config,
        }
    }

    pub fn runs(&self) -> Vec<TextRun> {
        let width = f64::from(self.config.width);
        let height = f64::from(self.config.height);
        let sx = width / REFERENCE_SIZE;
        let sy = height / REFERENCE_SIZE;
        let font_scale = sx.min(sy);

        let run = |text: String, px: f64, x: f64, y: f64| TextRun {
            text,
            font_px: px * font_scale,
            family: self.config.font_family.clone(),
            x,
            y,
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
        };

        if self.sub_mode.is_now() {
            return vec![TextRun {
                align: TextAlign::Center,
                baseline: TextBaseline::Middle,
                ..run("NOW".to_string(), NOW_PX, width / 2.0, height / 2.0)
            }];
        }

        let (is_pm, hour) = self.time.hour12();
        let period = if is_pm { "PM" } else { "AM" };
        let date = format!(
            "{}.{}.{}",
            self.time.day(),
            self.time.month(),
            self.time.year()
        );
        let padding = f64::from(self.config.padding);
        let footer_y = height - FOOTER_RISE * sy;

        vec![
            run(format!("{hour:02}"), TIME_PX, TIME_X * sx, HOUR_Y * sy),
            run(
                format!("{:02}", self.time.minute()),
                TIME_PX,
                TIME_X * sx,
                MINUTE_Y * sy,
            ),
            run(period.to_string(), PERIOD_PX, PERIOD_X * sx, PERIOD_Y * sy),
            run(date, DETAIL_PX, padding, footer_y),
            run(
                self.config.edition_label(self.active_index),
                DETAIL_PX,
                EDITION_X * sx,
                footer_y,
            ),
            run(
                format!("S#ID: {}", self.config.sid),
                DETAIL_PX,
                padding,
                padding,
            ),
        ]
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_background(BACKGROUND);
        for run in self.runs() {
            surface.draw_text(&run, INK);
        }
    }
}
