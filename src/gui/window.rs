use crate::gui::button::ButtonStyle;
use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;

/// Room for the fully expanded circle, which sits on the bottom edge, plus
/// the label above it.
pub fn preferred_size(style: &ButtonStyle) -> (i32, i32) {
    let p = &style.padding;
    let expand = style.expand_radius as i32;
    let label = (style.text_size * 2.0).ceil() as i32;
    (
        2 * expand + p.left + p.right,
        expand + label + p.top + p.bottom,
    )
}

pub fn init_window(window: &gtk::ApplicationWindow, style: &ButtonStyle) {
    let (width, height) = preferred_size(style);
    window.set_default_size(width, height);
    window.add_css_class(theme::WINDOW_CLASS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Padding;

    #[test]
    fn test_preferred_size_fits_expanded_circle() {
        let mut style = ButtonStyle::default();
        assert_eq!(preferred_size(&style), (720, 540));

        style.padding = Padding {
            left: 5,
            top: 6,
            right: 7,
            bottom: 8,
        };
        assert_eq!(preferred_size(&style), (732, 554));
    }
}
