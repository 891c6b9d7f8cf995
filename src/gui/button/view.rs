use super::LABEL_FONT;
use super::model::{CircleButton, FontMetrics};
use super::tilt::Projection;
use crate::geometry::Point;
use crate::gui::theme::ThemeColors;
use cairo::{Context, FontExtents, PathSegment};
use palette::Srgba;
use std::f64::consts::PI;

impl From<FontExtents> for FontMetrics {
    // cairo has no separate top/bottom, so the line extents stand in for them
    fn from(ext: FontExtents) -> Self {
        Self {
            top: -ext.ascent(),
            ascent: -ext.ascent(),
            descent: ext.descent(),
            bottom: ext.height() - ext.ascent(),
        }
    }
}

struct ButtonRenderer<'a> {
    button: &'a CircleButton,
    colors: &'a ThemeColors,
    projection: Option<&'a Projection>,
}

impl<'a> ButtonRenderer<'a> {
    fn new(button: &'a CircleButton, colors: &'a ThemeColors) -> Self {
        Self {
            button,
            colors,
            projection: button.dragged.then_some(&button.tilt),
        }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_circle(cr)?;
        self.draw_label(cr)
    }

    fn draw_circle(&self, cr: &Context) -> Result<(), cairo::Error> {
        let centre = self.button.centre;
        set_source(cr, self.colors.button);
        cr.new_path();
        cr.arc(centre.x, centre.y, self.button.radius(), 0.0, 2.0 * PI);
        self.fill(cr)
    }

    fn draw_label(&self, cr: &Context) -> Result<(), cairo::Error> {
        let size = self.button.label_font_size();
        // a zero font size would leave the context with a singular font matrix
        if size <= f64::EPSILON {
            return Ok(());
        }

        let text = self.button.style.label.as_str();
        cr.select_font_face(LABEL_FONT, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(size);

        let metrics = FontMetrics::from(cr.font_extents()?);
        let ext = cr.text_extents(text)?;
        let baseline = self.button.label_baseline(&metrics);

        set_source(cr, self.colors.label);
        cr.new_path();
        cr.move_to(self.button.centre.x - ext.x_advance() / 2.0, baseline);
        cr.text_path(text);
        self.fill(cr)
    }

    /// Fills the current path, first pushing every point through the tilt
    /// projection while a drag is active.
    fn fill(&self, cr: &Context) -> Result<(), cairo::Error> {
        if let Some(projection) = self.projection {
            let path = cr.copy_path_flat()?;
            cr.new_path();
            let map = |(x, y): (f64, f64)| projection.map(Point::new(x, y));
            for segment in path.iter() {
                match segment {
                    PathSegment::MoveTo(p) => {
                        let p = map(p);
                        cr.move_to(p.x, p.y);
                    }
                    PathSegment::LineTo(p) => {
                        let p = map(p);
                        cr.line_to(p.x, p.y);
                    }
                    PathSegment::CurveTo(a, b, c) => {
                        let (a, b, c) = (map(a), map(b), map(c));
                        cr.curve_to(a.x, a.y, b.x, b.y, c.x, c.y);
                    }
                    PathSegment::ClosePath => cr.close_path(),
                }
            }
        }
        cr.fill()
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(cr: &Context, button: &CircleButton, colors: &ThemeColors) -> Result<(), cairo::Error> {
    ButtonRenderer::new(button, colors).draw(cr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Label;
    use crate::gui::button::{ButtonStyle, PointerEvent, TiltAngles};
    use cairo::{Format, ImageSurface};

    const RED: u32 = 0xffff0000;

    fn button(width: i32, height: i32, label: &str) -> CircleButton {
        let style = ButtonStyle {
            label: Label::new(label),
            ..ButtonStyle::default()
        };
        let mut button = CircleButton::new(style);
        button.layout(width, height);
        button
    }

    fn render(button: &CircleButton, width: i32, height: i32) -> ImageSurface {
        let mut surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            let colors = ThemeColors {
                button: button.style.button_color,
                label: button.style.text_color,
            };
            draw(&cr, button, &colors).unwrap();
        }
        surface.flush();
        surface
    }

    /// Premultiplied `0xAARRGGBB` at (x, y).
    fn pixel(surface: &mut ImageSurface, x: i32, y: i32) -> u32 {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let i = y as usize * stride + x as usize * 4;
        u32::from_ne_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]])
    }

    fn pixels(surface: &mut ImageSurface) -> Vec<(i32, i32, u32)> {
        let (w, h) = (surface.width(), surface.height());
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let mut out = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            for x in 0..w {
                let i = y as usize * stride + x as usize * 4;
                let p = u32::from_ne_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
                out.push((x, y, p));
            }
        }
        out
    }

    fn green(p: u32) -> u32 {
        (p >> 8) & 0xff
    }

    #[test]
    fn test_collapsed_circle_fills_its_radius() {
        let b = button(200, 200, "Go");
        assert_eq!(b.centre, Point::new(100.0, 200.0));
        let mut surface = render(&b, 200, 200);

        assert_eq!(pixel(&mut surface, 100, 199), RED);
        // top edge sits at y = 80
        assert_eq!(pixel(&mut surface, 100, 82), RED);
        assert_eq!(pixel(&mut surface, 100, 77), 0);
        assert_eq!(pixel(&mut surface, 5, 195), 0);
    }

    #[test]
    fn test_no_label_when_collapsed() {
        let b = button(200, 200, "Go");
        let mut surface = render(&b, 200, 200);
        // the label colour is grey, the button has no green or blue
        assert!(pixels(&mut surface).iter().all(|&(_, _, p)| p & 0xffff == 0));
    }

    #[test]
    fn test_tilt_applies_only_while_dragged() {
        let mut b = button(200, 200, "Go");
        b.tilt = TiltAngles {
            rotate_x: 30.0,
            rotate_y: 0.0,
        }
        .projection(b.centre);

        b.dragged = false;
        assert_eq!(pixel(&mut render(&b, 200, 200), 100, 85), RED);

        // the upper half recedes, pulling the top edge down to about y = 106
        b.dragged = true;
        let mut tilted = render(&b, 200, 200);
        assert_eq!(pixel(&mut tilted, 100, 85), 0);
        assert_eq!(pixel(&mut tilted, 100, 199), RED);
    }

    #[test]
    fn test_expanded_label_is_centred_on_advance() {
        let mut b = button(800, 600, "HOH");
        b.handle_pointer(PointerEvent::Press(b.centre));
        b.tick(0);
        b.tick(1_000_000);
        assert_eq!(b.progress(), 1.0);

        let mut surface = render(&b, 800, 600);
        let ink: Vec<i32> = pixels(&mut surface)
            .into_iter()
            .filter(|&(_, _, p)| green(p) > 0)
            .map(|(x, _, _)| x)
            .collect();
        // nothing to measure without a usable font
        if ink.is_empty() {
            return;
        }

        let (min, max) = (ink.iter().min().unwrap(), ink.iter().max().unwrap());
        let mid = f64::from(min + max) / 2.0;
        assert!((mid - b.centre.x).abs() < 4.0, "label centred at {}", mid);
        // above the circle's top edge at y = 240
        assert!(pixels(&mut surface).iter().all(|&(_, y, p)| y <= 240 || green(p) == 0));
    }

    #[test]
    fn test_font_metrics_from_extents() {
        let surface = ImageSurface::create(Format::ARgb32, 10, 10).unwrap();
        let cr = Context::new(&surface).unwrap();
        cr.set_font_size(20.0);
        let ext = cr.font_extents().unwrap();
        let metrics = FontMetrics::from(ext);

        assert_eq!(metrics.top, metrics.ascent);
        assert!(metrics.ascent < 0.0);
        assert!(metrics.descent >= 0.0);
        assert!((metrics.bottom - metrics.top - ext.height()).abs() < 1e-9);
    }
}
