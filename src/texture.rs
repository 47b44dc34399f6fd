//! What the scene receives from the screen controller.

/// Tint and emissive colour of the screen material.
pub const SCREEN_TINT: &str = "#FFCA88";
pub const SCREEN_EMISSIVE_INTENSITY: f64 = 1.0;

/// Texture placement on the screen mesh: centred, mirrored horizontally
/// (`repeat = (-1, 1)`) with repeat wrapping on both axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextureTransform {
    pub center: (f64, f64),
    pub repeat: (f64, f64),
}

pub const SCREEN_TRANSFORM: TextureTransform = TextureTransform {
    center: (0.5, 0.5),
    repeat: (-1.0, 1.0),
};

/// The texture currently shown on the screen.
#[derive(Debug)]
pub enum ScreenTexture<'a, S, I> {
    /// Canvas drawn by the controller; re-upload whenever it is refreshed.
    Canvas(&'a S),
    /// Loaded project screenshot; never changes after binding.
    Image(&'a I),
}

impl<S, I> Clone for ScreenTexture<'_, S, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, I> Copy for ScreenTexture<'_, S, I> {}

impl<S, I> ScreenTexture<'_, S, I> {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ScreenTexture::Canvas(_))
    }
}

/// Scene-side consumer that assigns the texture to the screen material's
/// colour and emission channels.
pub trait MaterialBinder<S, I> {
    /// Called once per texture change. `None` leaves the screen blank.
    fn bind(&mut self, texture: Option<ScreenTexture<'_, S, I>>, is_dynamic: bool);

    /// Called when the bound canvas has new pixels to upload.
    fn refresh(&mut self, texture: ScreenTexture<'_, S, I>);
}
