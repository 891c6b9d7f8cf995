use crate::gui::button::ButtonStyle;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub const WINDOW_CLASS: &str = "circle-button-window";
pub const AREA_CLASS: &str = "circle-button-area";

/// Both the window and the drawing area are see-through, so only the
/// circle and its label are painted.
const CSS: &str = "
.circle-button-window, .circle-button-area {
    background: none;
    background-color: transparent;
}
";

pub struct ThemeColors {
    pub button: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl ThemeColors {
    /// Themes may override the configured colours with
    /// `@define-color circle_button_bg` and `@define-color circle_button_fg`.
    pub fn from_context(context: &gtk::StyleContext, style: &ButtonStyle) -> Self {
        Self {
            button: Self::lookup_color(context, "circle_button_bg", style.button_color),
            label: Self::lookup_color(context, "circle_button_fg", style.text_color),
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(CSS);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_covers_window_and_area() {
        let selector = CSS.split('{').next().unwrap();
        for class in [WINDOW_CLASS, AREA_CLASS] {
            assert!(selector.contains(&format!(".{}", class)), "{} unstyled", class);
        }
    }
}
