//! Per-level styles for colorized output.
//!
//! One style per schema level plus a failure style, mapped to concrete
//! colors by the active theme. The theme is chosen once at startup and never
//! changes during a traversal.

use termcolor::{Color, ColorSpec};

/// Style tag of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Root-level lines and separators outside any group.
    Plain,
    Sap,
    Beam,
    Dataset,
    Coord,
    /// "doesn't exist" placeholders.
    Fail,
}

/// Terminal background the palette is picked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The color spec for a style under this theme.
    pub fn spec(self, style: Style) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match style {
            Style::Plain => {}
            Style::Sap => {
                spec.set_fg(Some(Color::Blue));
            }
            Style::Beam => {
                spec.set_fg(Some(Color::Green));
            }
            Style::Dataset => {
                match self {
                    Theme::Dark => spec.set_fg(Some(Color::Red)),
                    Theme::Light => spec.set_fg(Some(Color::Yellow)),
                };
            }
            Style::Coord => {
                spec.set_fg(Some(Color::White)).set_bold(true);
            }
            Style::Fail => {
                spec.set_fg(Some(Color::Red)).set_intense(true);
            }
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_style_has_no_color() {
        assert_eq!(Theme::Dark.spec(Style::Plain), ColorSpec::new());
    }

    #[test]
    fn dataset_color_depends_on_theme() {
        let dark = Theme::Dark.spec(Style::Dataset);
        let light = Theme::Light.spec(Style::Dataset);
        assert_eq!(dark.fg(), Some(&Color::Red));
        assert_eq!(light.fg(), Some(&Color::Yellow));
    }

    #[test]
    fn level_styles_are_stable_across_themes() {
        for style in [Style::Sap, Style::Beam, Style::Coord, Style::Fail] {
            assert_eq!(Theme::Dark.spec(style), Theme::Light.spec(style));
        }
    }
}
