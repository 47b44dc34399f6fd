//! Drawing surface behind the clock face.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
}

impl TextBaseline {
    pub fn as_css(self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
        }
    }
}

/// One `fillText` call.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font_px: f64,
    pub family: String,
    pub x: f64,
    pub y: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextRun {
    /// CSS font shorthand, e.g. `110px MonoFonto`.
    pub fn font(&self) -> String {
        format!("{}px {}", self.font_px, self.family)
    }
}

pub trait Surface {
    fn size(&self) -> (u32, u32);
    /// Paints the whole surface, discarding what was drawn before.
    fn fill_background(&mut self, color: &str);
    fn draw_text(&mut self, run: &TextRun, color: &str);
}

/// Surface that keeps the runs drawn since the last background fill.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    background: Option<String>,
    runs: Vec<TextRun>,
    fills: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn texts(&self) -> Vec<&str> {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.runs.iter().any(|run| run.text == text)
    }

    /// Number of full redraws so far.
    pub fn fills(&self) -> usize {
        self.fills
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_background(&mut self, color: &str) {
        self.background = Some(color.to_string());
        self.runs.clear();
        self.fills += 1;
    }

    fn draw_text(&mut self, run: &TextRun, _color: &str) {
        self.runs.push(run.clone());
    }
}
