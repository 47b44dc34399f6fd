//! Screen texture configuration.
//!
//! Defaults reproduce the Watchy face: a 400x400 canvas, the MonoFonto face and
//! one screenshot per project under `/projects/{n}/sc_1.png`.

#[derive(Clone, Debug, PartialEq)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    /// Identifier printed in the top-left corner of the clock face.
    pub sid: String,
    /// Number of editions shown after the slash in `NN/17`.
    pub edition_total: u32,
    pub font_family: String,
    pub font_url: String,
    pub project_base: String,
    pub image_file: String,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            padding: 20,
            sid: "12345678".to_string(),
            edition_total: 17,
            font_family: "MonoFonto".to_string(),
            font_url: "/font/monofonto.otf".to_string(),
            project_base: "/projects".to_string(),
            image_file: "sc_1.png".to_string(),
        }
    }
}

impl ScreenConfig {
    /// Screenshot for the project at `index` (projects are numbered from 1 on disk).
    pub fn image_url(&self, index: usize) -> String {
        format!(
            "{}/{}/{}",
            self.project_base.trim_end_matches('/'),
            index + 1,
            self.image_file
        )
    }

    pub fn edition_label(&self, index: usize) -> String {
        format!("{:02}/{}", index + 1, self.edition_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_is_one_based() {
        let config = ScreenConfig::default();
        assert_eq!(config.image_url(0), "/projects/1/sc_1.png");
        assert_eq!(config.image_url(4), "/projects/5/sc_1.png");
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let config = ScreenConfig {
            project_base: "https://cdn.example.org/projects/".to_string(),
            ..ScreenConfig::default()
        };
        assert_eq!(
            config.image_url(2),
            "https://cdn.example.org/projects/3/sc_1.png"
        );
    }

    #[test]
    fn edition_label_is_zero_padded() {
        let config = ScreenConfig::default();
        assert_eq!(config.edition_label(0), "01/17");
        assert_eq!(config.edition_label(16), "17/17");
    }
}
