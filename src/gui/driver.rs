use crate::gui::button::CircleButton;
use gdk4::FrameClock;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Feeds frame clock timestamps into the button while an animation runs.
/// At most one tick callback is installed; a replaced animation keeps the
/// same callback.
#[derive(Clone, Default)]
pub struct AnimationDriver {
    ticking: Rc<Cell<bool>>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_running(&self, area: &gtk::DrawingArea, button: &Rc<RefCell<CircleButton>>) {
        if self.ticking.replace(true) {
            return;
        }

        let button = button.clone();
        let ticking = self.ticking.clone();
        area.add_tick_callback(move |area, clock: &FrameClock| {
            let action = button.borrow_mut().tick(clock.frame_time());
            if action.should_redraw {
                area.queue_draw();
            }
            if action.finished {
                ticking.set(false);
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });
    }
}
