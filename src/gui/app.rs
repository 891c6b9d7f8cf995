use crate::config::{self, Config, Label};
use crate::events::AppEvent;
use crate::geometry::Point;
use crate::gui::button::{self, ButtonStyle, CircleButton, PointerEvent, PointerResponse};
use crate::gui::driver::AnimationDriver;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub button: Rc<RefCell<CircleButton>>,
    pub config_path: Option<PathBuf>,
    pub label_override: Option<Label>,
    pub drawing_area: gtk::DrawingArea,
    driver: AnimationDriver,
}

pub struct AppInit {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub label_override: Option<Label>,
    pub rx: async_channel::Receiver<AppEvent>,
}

#[derive(Debug)]
pub enum AppMsg {
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Style for `cfg`. The command line label wins over the file.
pub fn build_style(mut cfg: Config, label_override: Option<&Label>) -> ButtonStyle {
    if let Some(label) = label_override {
        cfg.label = label.clone();
    }
    ButtonStyle::from_config(&cfg)
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Circle Button"),

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: theme::AREA_CLASS,
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            label_override,
            rx,
        } = init;

        let button = CircleButton::new(build_style(config, label_override.as_ref()));

        theme::load_css();
        window::init_window(&root, &button.style);

        let model = AppModel {
            button: Rc::new(RefCell::new(button)),
            config_path,
            label_override,
            drawing_area: gtk::DrawingArea::default(),
            driver: AnimationDriver::new(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let button_draw = model.button.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let button = button_draw.borrow();
                let colors = ThemeColors::from_context(&drawing_area.style_context(), &button.style);
                if let Err(e) = button::draw(cr, &button, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let button_layout = model.button.clone();
        widgets
            .drawing_area
            .connect_resize(move |_, width, height| {
                button_layout.borrow_mut().layout(width, height);
            });

        connect_pointer(&widgets.drawing_area, &model.button, &model.driver);

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::ConfigReload => match config::load_config(self.config_path.as_deref()) {
                Ok(new_config) => {
                    let style = build_style(new_config, self.label_override.as_ref());
                    if self.button.borrow_mut().restyle(style) {
                        self.drawing_area.queue_draw();
                        log::info!("Configuration reloaded");
                    } else {
                        log::info!("Configuration reloaded, applying once the button is idle");
                    }
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

/// Routes one drag gesture per contact into the button. Presses that miss
/// the circle deny the sequence so it propagates to widgets underneath.
fn connect_pointer(
    area: &gtk::DrawingArea,
    button: &Rc<RefCell<CircleButton>>,
    driver: &AnimationDriver,
) {
    let drag = gtk::GestureDrag::new();

    {
        let (button, driver) = (button.clone(), driver.clone());
        drag.connect_drag_begin(move |gesture, x, y| {
            let response = button
                .borrow_mut()
                .handle_pointer(PointerEvent::Press(Point::new(x, y)));
            gesture.set_state(if response.handled {
                gtk::EventSequenceState::Claimed
            } else {
                gtk::EventSequenceState::Denied
            });
            apply_response(gesture, response, &button, &driver);
        });
    }

    {
        let (button, driver) = (button.clone(), driver.clone());
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            let pointer = Point::new(start_x + offset_x, start_y + offset_y);
            let response = button.borrow_mut().handle_pointer(PointerEvent::Move(pointer));
            apply_response(gesture, response, &button, &driver);
        });
    }

    {
        let (button, driver) = (button.clone(), driver.clone());
        drag.connect_drag_end(move |gesture, _, _| {
            let response = button.borrow_mut().handle_pointer(PointerEvent::Release);
            apply_response(gesture, response, &button, &driver);
        });
    }

    {
        let (button, driver) = (button.clone(), driver.clone());
        drag.connect_cancel(move |gesture, _| {
            let response = button.borrow_mut().handle_pointer(PointerEvent::Cancel);
            apply_response(gesture, response, &button, &driver);
        });
    }

    area.add_controller(drag);
}

fn apply_response(
    gesture: &gtk::GestureDrag,
    response: PointerResponse,
    button: &Rc<RefCell<CircleButton>>,
    driver: &AnimationDriver,
) {
    let Some(area) = gesture.widget().and_downcast::<gtk::DrawingArea>() else {
        return;
    };
    if response.animation_started {
        driver.ensure_running(&area, button);
    }
    if response.should_redraw {
        area.queue_draw();
    }
}
