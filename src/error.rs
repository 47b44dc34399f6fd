use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScreenError {
    /// No drawing surface could be created (headless page, missing 2d context).
    SurfaceUnavailable(String),
    /// An image or font fetch failed.
    AssetLoad { url: String, reason: String },
    /// The host refused a frame request or timeout.
    Schedule(String),
}

impl ScreenError {
    pub fn asset(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ScreenError::AssetLoad {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenError::SurfaceUnavailable(reason) => {
                write!(f, "drawing surface unavailable: {reason}")
            }
            ScreenError::AssetLoad { url, reason } => write!(f, "failed to load {url}: {reason}"),
            ScreenError::Schedule(reason) => write!(f, "scheduling failed: {reason}"),
        }
    }
}

impl std::error::Error for ScreenError {}
