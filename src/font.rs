use std::cell::Cell;
use std::rc::Rc;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FontState {
    #[default]
    Pending,
    Ready,
    Failed,
}

/// Shared readiness of the clock face font.
///
/// Handed to every controller that draws with the font instead of a page-wide
/// flag. The state leaves `Pending` at most once; later signals are ignored.
#[derive(Clone, Debug, Default)]
pub struct FontReadiness(Rc<Cell<FontState>>);

impl FontReadiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FontState {
        self.0.get()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == FontState::Ready
    }

    /// Returns true when this call made the font ready.
    pub fn mark_ready(&self) -> bool {
        self.settle(FontState::Ready)
    }

    pub fn mark_failed(&self) -> bool {
        self.settle(FontState::Failed)
    }

    fn settle(&self, state: FontState) -> bool {
        if self.0.get() != FontState::Pending {
            return false;
        }
        self.0.set(state);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_settles_once() {
        let font = FontReadiness::new();
        let shared = font.clone();
        assert!(!font.is_ready());

        assert!(shared.mark_ready());
        assert!(font.is_ready());

        assert!(!font.mark_failed());
        assert!(!font.mark_ready());
        assert_eq!(font.state(), FontState::Ready);
    }

    #[test]
    fn failure_is_permanent() {
        let font = FontReadiness::new();
        assert!(font.mark_failed());
        assert!(!font.mark_ready());
        assert!(!font.is_ready());
    }
}
